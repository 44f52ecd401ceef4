use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMenu, LdSparkles};
use dioxus_free_icons::Icon;
use shared_ui::theme::{ThemeMode, ThemeToggle};
use shared_ui::{
    Button, ButtonVariant, Sheet, SheetContent, SheetFooter, SheetHeader, SheetSide, SheetTitle,
};

use crate::routes::Route;

const HEADER_CSS: Asset = asset!("./header.css");

/// Top navigation tabs, in display order.
pub fn nav_tabs() -> [(&'static str, Route); 2] {
    [
        ("Sales Agent", Route::Landing {}),
        ("Scheduled Calls", Route::ScheduledCalls {}),
    ]
}

/// Where "Customise Agent" leads until agent settings get their own page.
pub fn customise_agent_route() -> Route {
    Route::Landing {}
}

/// Site header with brand, tabs, call-to-action and theme switch. On narrow
/// screens the tabs collapse into a sheet.
#[component]
pub fn Header(theme: Signal<ThemeMode>) -> Element {
    let mut menu_open = use_signal(|| false);

    rsx! {
        document::Link { rel: "stylesheet", href: HEADER_CSS }
        header { class: "site-header",
            Link { to: Route::Landing {}, class: "brand",
                Icon { icon: LdSparkles, width: 20, height: 20 }
                span { "Leadline" }
            }
            nav { class: "site-tabs", "aria-label": "Main",
                for (label, route) in nav_tabs() {
                    Link {
                        key: "{label}",
                        to: route,
                        class: "site-tab",
                        active_class: "active",
                        "{label}"
                    }
                }
            }
            div { class: "site-actions",
                Link { to: customise_agent_route(), class: "site-cta",
                    Button { variant: ButtonVariant::Secondary, "Customise Agent" }
                }
                ThemeToggle { mode: theme }
                Button {
                    variant: ButtonVariant::Ghost,
                    class: "site-menu-trigger",
                    aria_label: "Open menu",
                    onclick: move |_| menu_open.set(true),
                    Icon { icon: LdMenu, width: 20, height: 20 }
                }
            }
        }
        Sheet {
            open: menu_open(),
            on_close: move |_| menu_open.set(false),
            side: SheetSide::Bottom,
            label: "Menu",
            SheetHeader {
                SheetTitle { "Leadline" }
            }
            SheetContent {
                for (label, route) in nav_tabs() {
                    Link {
                        key: "{label}",
                        to: route,
                        class: "sheet-link",
                        onclick: move |_| menu_open.set(false),
                        "{label}"
                    }
                }
            }
            SheetFooter {
                div { class: "sheet-theme",
                    span { "Theme" }
                    ThemeToggle { mode: theme }
                }
                Link {
                    to: customise_agent_route(),
                    onclick: move |_| menu_open.set(false),
                    Button { variant: ButtonVariant::Secondary, "Customise Agent" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| menu_open.set(false),
                    "Cancel"
                }
            }
        }
    }
}
