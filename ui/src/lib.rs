//! Shared UI crate for Café Analytics: data model, providers, chart
//! renderers and the dashboard views used by the web and desktop launchers.

pub mod charts;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

use dioxus::prelude::*;

/// Shared theme stylesheet.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
/// Same stylesheet inlined, for packaged desktop builds.
pub const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
