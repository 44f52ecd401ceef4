use dioxus::prelude::*;

/// Pick any number of options from a fixed list.
///
/// Options render as toggle chips in list order; `selected` keeps the
/// order in which they were picked and is shown as a summary line.
#[component]
pub fn MultiSelect(
    #[props(default)] id: String,
    options: Vec<String>,
    selected: Vec<String>,
    on_toggle: EventHandler<String>,
    #[props(default = "Nothing selected".to_string())] placeholder: String,
    #[props(default = false)] disabled: bool,
    #[props(default = false)] invalid: bool,
) -> Element {
    let summary = selection_summary(&selected, &placeholder);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            id: "{id}",
            class: "multi-select",
            role: "group",
            "aria-invalid": invalid,
            p { class: "multi-select-summary", "{summary}" }
            div { class: "multi-select-options",
                for option in options {
                    button {
                        key: "{option}",
                        r#type: "button",
                        class: "multi-select-chip",
                        disabled: disabled,
                        "aria-pressed": selected.contains(&option),
                        onclick: {
                            let option = option.clone();
                            move |_| on_toggle.call(option.clone())
                        },
                        "{option}"
                    }
                }
            }
        }
    }
}

fn selection_summary(selected: &[String], placeholder: &str) -> String {
    if selected.is_empty() {
        placeholder.to_string()
    } else {
        selected.join(", ")
    }
}
