//! Progress bar and error banner shown under the drop target.

use dioxus::prelude::*;

/// Indeterminate progress strip, rendered only while reads are in flight.
#[component]
pub fn ProgressBar(visible: bool) -> Element {
    rsx! {
        if visible {
            div {
                class: "fd-progress",
                role: "progressbar",
                aria_label: "Reading files",
                div { class: "fd-progress-fill" }
            }
        }
    }
}

/// The most recent rejection or read-failure message.
///
/// Expiry is driven by the owning component; this only renders.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    rsx! {
        if let Some(ref text) = message {
            div { class: "fd-banner", role: "alert", "{text}" }
        }
    }
}
