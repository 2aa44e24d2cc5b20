//! Status badge for booking and verification rows

use dioxus::prelude::*;
use sejour_core::StatusTone;

/// Rounded label coloured by tone
#[component]
pub fn StatusBadge(label: String, tone: StatusTone) -> Element {
    let tone_class = tone.badge_class();
    rsx! {
        span {
            class: "inline-flex items-center px-2 py-0.5 rounded-full text-xs font-medium {tone_class}",
            "{label}"
        }
    }
}
