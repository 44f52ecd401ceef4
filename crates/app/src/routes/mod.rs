pub mod landing;
pub mod not_found;
pub mod scheduled_calls;

use dioxus::prelude::*;
use shared_ui::theme::ThemeMode;

use crate::components::Header;
use landing::Landing;
use not_found::NotFound;
use scheduled_calls::ScheduledCalls;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(SiteLayout)]
    #[route("/")]
    Landing {},
    #[route("/scheduled-calls")]
    ScheduledCalls {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Header above every page except the 404.
#[component]
fn SiteLayout() -> Element {
    let theme = use_context::<Signal<ThemeMode>>();

    rsx! {
        Header { theme }
        main { class: "site-main",
            Outlet::<Route> {}
        }
    }
}
