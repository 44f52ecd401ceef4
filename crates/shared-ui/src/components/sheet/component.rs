use dioxus::prelude::*;

/// Which edge of the screen the sheet slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SheetSide {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

impl SheetSide {
    fn class(&self) -> &'static str {
        match self {
            SheetSide::Top => "top",
            SheetSide::Right => "right",
            SheetSide::Bottom => "bottom",
            SheetSide::Left => "left",
        }
    }
}

/// Drawer panel over a dimmed backdrop. Clicking the backdrop or pressing
/// Escape calls `on_close`.
#[component]
pub fn Sheet(
    open: bool,
    on_close: EventHandler<()>,
    #[props(default)] side: SheetSide,
    #[props(default)] label: String,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sheet-overlay",
            onclick: move |_| on_close.call(()),
            onkeydown: move |evt| {
                if evt.key() == Key::Escape {
                    on_close.call(());
                }
            },
            div {
                class: "sheet-panel",
                role: "dialog",
                "aria-modal": "true",
                "aria-label": "{label}",
                "data-side": side.class(),
                onclick: move |evt| evt.stop_propagation(),
                {children}
            }
        }
    }
}

#[component]
pub fn SheetHeader(children: Element) -> Element {
    rsx! {
        div { class: "sheet-header", {children} }
    }
}

#[component]
pub fn SheetTitle(children: Element) -> Element {
    rsx! {
        h2 { class: "sheet-title", {children} }
    }
}

#[component]
pub fn SheetContent(children: Element) -> Element {
    rsx! {
        nav { class: "sheet-content", {children} }
    }
}

#[component]
pub fn SheetFooter(children: Element) -> Element {
    rsx! {
        div { class: "sheet-footer", {children} }
    }
}
