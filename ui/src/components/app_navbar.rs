use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::i18n;
use crate::t;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Link constructors supplied by each launcher, since only the launcher
/// knows its `Route` enum. Each closure receives the localized label and
/// returns a `Link` containing it.
///
/// ```ignore
/// register_nav(NavBuilder {
///     dashboard: |label| rsx!(Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" }),
/// });
/// ```
pub struct NavBuilder {
    pub dashboard: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::debug!("navbar builder already registered");
    }
}

/// Brand, page links and the language switcher.
///
/// Switching language updates the shared loader and the `Signal<String>`
/// language context, which drives number formatting and re-renders
/// localized components.
#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let lang_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let mut current = use_signal(i18n::current_language);
    let langs = use_signal(i18n::available_languages);
    let active = lang_ctx.map(|code| code()).unwrap_or_else(|| current());

    let on_change = move |evt: FormEvent| {
        let tag = evt.value();
        match i18n::set_language(&tag) {
            Ok(()) => {
                tracing::info!(language = %tag, "language switched");
                current.set(tag.clone());
                if let Some(mut code) = lang_ctx {
                    code.set(tag);
                }
            }
            Err(err) => tracing::warn!(language = %tag, %err, "language switch failed"),
        }
    };

    let links = NAV_BUILDER
        .get()
        .map(|builder| (builder.dashboard)(&t!("nav-dashboard")));
    let tagline = t!("tagline");
    let brand = t!("app-name");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "{brand}" }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                nav { class: "navbar__links",
                    if let Some(links) = links {
                        {links}
                    } else {
                        {children}
                    }
                }

                if langs().len() > 1 {
                    div { class: "navbar__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{active}",
                            oninput: on_change,
                            for tag in langs().into_iter() {
                                option {
                                    key: "{tag}",
                                    value: "{tag}",
                                    selected: tag == active,
                                    {i18n::language_name(&tag)}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
