//! Localization for `cafe-dashboard-ui`.
//!
//! Bundles live under `i18n/<lang>/cafe-dashboard-ui.ftl` and are embedded at
//! compile time. `en-US` is the fallback and the reference key set.
//!
//! ```ignore
//! use crate::t;
//! crate::i18n::init(); // idempotent
//! let label = t!("nav-dashboard");
//! let growth = t!("card-sales-growth", growth = "+15.4%");
//! ```
//!
//! Desktop builds pick the OS locale list, web builds `navigator.languages`.
//! Number formatting follows the selected language via
//! [`NumberLocale::for_language`](crate::core::format::NumberLocale::for_language).
use std::sync::Once;

use dioxus::prelude::*;
use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Message lookup through [`LOADER`], with optional `name = value` arguments.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; also the FTL filename stem.
const DOMAIN: &str = "cafe-dashboard-ui";

pub const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("valid fallback language identifier");
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    // Plain output; no Unicode bidi isolation marks around placeables.
    loader.set_use_isolating(false);
    loader
});

static INIT: Once = Once::new();

/// Load bundles for the user's preferred languages (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match select(&requested) {
            Ok(selected) => tracing::debug!(?selected, "i18n languages selected"),
            Err(err) => tracing::warn!(%err, "i18n selection failed; using fallback"),
        }
    });
}

/// Switch language at runtime. Unparseable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    select(&[lang]).map(|_| ())
}

/// Reload bundles for `requested`. Selecting rebuilds the bundles, which
/// resets the isolation flag, so it is cleared again afterwards.
fn select(
    requested: &[LanguageIdentifier],
) -> Result<Vec<LanguageIdentifier>, i18n_embed::I18nEmbedError> {
    let selected = i18n_embed::select(&*LOADER, &Localizations, requested)?;
    LOADER.set_use_isolating(false);
    Ok(selected)
}

/// Tag of the language currently answering lookups.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Subscribe the calling component to the shared language signal, if the
/// app provides one, so its `t!` lookups re-run after a switch.
pub fn use_language_tag() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_else(current_language)
}

/// Display name for a language tag in the switcher.
pub fn language_name(tag: &str) -> &str {
    match tag {
        "en-US" => "English",
        "es-ES" => "Español",
        "fr-FR" => "Français",
        other => other,
    }
}

/// Embedded language tags, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

/// Serializes tests that switch the process-wide language.
#[cfg(test)]
pub(crate) fn lock_language() -> std::sync::MutexGuard<'static, ()> {
    static LANGUAGE: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LANGUAGE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_languages_are_embedded() {
        assert_eq!(available_languages(), vec!["en-US", "es-ES", "fr-FR"]);
    }

    #[test]
    fn fallback_lookup_and_arguments() {
        let _guard = lock_language();
        set_language(FALLBACK_LANGUAGE).unwrap();
        assert_eq!(fl!(&*LOADER, "nav-dashboard"), "Dashboard");
        assert_eq!(
            fl!(&*LOADER, "card-sales-growth", growth = "+15.4%"),
            "Growth: +15.4%"
        );
    }

    #[test]
    fn placeables_carry_no_bidi_marks_after_switching() {
        let _guard = lock_language();
        set_language("es-ES").unwrap();
        let spanish = fl!(&*LOADER, "dayparts-busiest", hour = "8");
        set_language(FALLBACK_LANGUAGE).unwrap();
        let english = fl!(&*LOADER, "card-sales-growth", growth = "+15.4%");
        for text in [spanish, english] {
            assert!(
                !text.contains(['\u{2068}', '\u{2069}']),
                "isolation marks in {text:?}"
            );
        }
    }

    #[test]
    fn switcher_names_known_languages() {
        assert_eq!(language_name("es-ES"), "Español");
        assert_eq!(language_name("de-DE"), "de-DE");
    }

    #[test]
    fn invalid_tag_keeps_current_language() {
        let _guard = lock_language();
        init();
        let before = fl!(&*LOADER, "nav-dashboard");
        let _ = set_language("not a tag");
        assert_eq!(fl!(&*LOADER, "nav-dashboard"), before);
    }
}
