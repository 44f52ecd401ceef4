use dioxus::prelude::*;
use shared_types::{CallMode, FeatureFlags};
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};

use crate::components::LeadForm;

/// Banner shown while submissions are echoed instead of called.
pub fn echo_banner(mode: CallMode, flags: &FeatureFlags) -> Option<&'static str> {
    if !mode.is_echo() {
        return None;
    }
    Some(if flags.echo_submissions {
        "Demo mode: submissions are echoed back and no call is placed."
    } else {
        "Calling is not configured on this server: submissions are echoed back and no call is placed."
    })
}

/// Landing page: pitch plus the lead capture form.
#[component]
pub fn Landing() -> Element {
    let flags = use_context::<FeatureFlags>();
    let mode_resource =
        use_server_future(move || async move { server::api::get_call_mode().await })?;
    let mode = mode_resource
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok().copied())
        .unwrap_or_default();
    let banner = echo_banner(mode, &flags);

    rsx! {
        document::Title { "Leadline | AI sales calls for your showroom" }
        document::Link { rel: "stylesheet", href: asset!("./landing.css") }

        section { class: "landing",
            div { class: "landing-intro",
                h1 { "Talk to every lead within minutes" }
                p {
                    "Leave a name and number and our sales agent will call to walk through "
                    "the models you are interested in."
                }
            }
            Card { class: "landing-card",
                CardHeader {
                    CardTitle { "Request a call" }
                    CardDescription { "The agent calls the number below as soon as you submit." }
                }
                CardContent {
                    if let Some(text) = banner {
                        p { class: "echo-banner", role: "status", "{text}" }
                    }
                    LeadForm {}
                }
            }
        }
    }
}
