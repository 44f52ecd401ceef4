use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::routes::Route;

#[component]
pub fn ScheduledCalls() -> Element {
    rsx! {
        document::Title { "Scheduled Calls | Leadline" }
        document::Link { rel: "stylesheet", href: asset!("./landing.css") }

        section { class: "landing",
            Card { class: "landing-card",
                CardHeader {
                    CardTitle { "Scheduled calls" }
                    CardDescription { "Calls booked for a later time will be listed here." }
                }
                CardContent {
                    p { class: "placeholder-text", "No calls are scheduled yet." }
                    Link { to: Route::Landing {}, "Request a call now" }
                }
            }
        }
    }
}
