use dioxus::prelude::*;

use crate::dashboard::CafeDashboard;

/// Routed dashboard page.
#[component]
pub fn Dashboard() -> Element {
    // Subscribe so the page title follows language switches.
    let _lang = crate::i18n::use_language_tag();
    let title = crate::t!("app-name");

    rsx! {
        document::Title { "{title}" }
        CafeDashboard {}
    }
}
