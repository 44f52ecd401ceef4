use dioxus::prelude::*;

/// Form wrapper that prevents the browser's default submission.
#[component]
pub fn Form(
    #[props(default)] onsubmit: EventHandler<FormEvent>,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        form {
            novalidate: true,
            onsubmit: move |evt| {
                evt.prevent_default();
                onsubmit.call(evt);
            },
            ..merged,
            {children}
        }
    }
}

/// One labelled control with optional helper text and an inline error.
///
/// `html_for` must match the control's `id`. The error renders beneath
/// the description.
#[component]
pub fn FormField(
    label: String,
    html_for: String,
    #[props(default)] description: String,
    /// Validation message; empty when the value is acceptable.
    #[props(default)]
    error: String,
    children: Element,
) -> Element {
    let invalid = !error.is_empty();

    rsx! {
        div { class: "form-field", "data-invalid": invalid,
            label { class: "form-label", r#for: "{html_for}", "{label}" }
            {children}
            if !description.is_empty() {
                p { class: "form-description", id: "{html_for}-description", "{description}" }
            }
            if invalid {
                p {
                    class: "form-message",
                    id: "{html_for}-message",
                    role: "alert",
                    "{error}"
                }
            }
        }
    }
}
