use shared_types::{Notice, NoticeLevel};
use shared_ui::{ToastOptions, Toasts};

#[cfg(feature = "desktop")]
const APP_NAME: &str = "Leadline";

/// Show `notice` as a toast, and as a desktop notification on desktop builds.
pub fn show(toast: &Toasts, notice: &Notice) {
    let text = notice.text.clone();
    match notice.level {
        NoticeLevel::Success => toast.success(text, ToastOptions::new()),
        NoticeLevel::Error => toast.error(text, ToastOptions::new()),
        NoticeLevel::Info => toast.info(text, ToastOptions::new()),
    }
    send(title_for(notice.level), &notice.text);
}

/// Title used for the desktop notification.
fn title_for(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "Call requested",
        NoticeLevel::Error => "Call not placed",
        NoticeLevel::Info => "Submission received",
    }
}

/// Send a desktop notification (no-op on non-desktop platforms).
#[allow(unused_variables)]
pub fn send(title: &str, body: &str) {
    #[cfg(feature = "desktop")]
    {
        if let Err(e) = dioxus_sdk_notification::Notification::new()
            .app_name(APP_NAME.to_string())
            .summary(title.to_string())
            .body(body.to_string())
            .show()
        {
            tracing::warn!("Failed to show desktop notification: {e}");
        }
    }
}
