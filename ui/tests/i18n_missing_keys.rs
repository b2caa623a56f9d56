use std::collections::BTreeMap;

/// Bundles checked at compile time; register new locales here.
const LOCALES: &[(&str, &str)] = &[
    ("en-US", include_str!("../i18n/en-US/cafe-dashboard-ui.ftl")),
    ("es-ES", include_str!("../i18n/es-ES/cafe-dashboard-ui.ftl")),
    ("fr-FR", include_str!("../i18n/fr-FR/cafe-dashboard-ui.ftl")),
];

/// Message id -> placeables used in its value, e.g. `card-sales-growth -> [growth]`.
fn messages(src: &str) -> BTreeMap<String, Vec<String>> {
    let mut out = BTreeMap::new();
    for (line_no, line) in src.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || id.contains(char::is_whitespace) {
            continue;
        }
        let mut vars: Vec<String> = value
            .split("{ $")
            .skip(1)
            .filter_map(|rest| rest.split_once(' ').map(|(name, _)| name.to_string()))
            .collect();
        vars.sort();
        let previous = out.insert(id.to_string(), vars);
        assert!(previous.is_none(), "duplicate key `{id}` on line {}", line_no + 1);
    }
    out
}

#[test]
fn locales_define_the_same_messages_with_the_same_arguments() {
    let (fallback_name, fallback_src) = LOCALES[0];
    let fallback = messages(fallback_src);
    assert!(!fallback.is_empty(), "{fallback_name} has no messages");

    let mut failures = Vec::new();
    for (locale, src) in &LOCALES[1..] {
        let translated = messages(src);
        for (id, vars) in &fallback {
            match translated.get(id) {
                None => failures.push(format!("{locale}: missing `{id}`")),
                Some(found) if found != vars => failures.push(format!(
                    "{locale}: `{id}` uses {found:?}, expected {vars:?}"
                )),
                Some(_) => {}
            }
        }
    }

    assert!(failures.is_empty(), "translation check failed:\n  {}", failures.join("\n  "));
}

#[test]
fn dashboard_titles_are_translated() {
    for (locale, src) in &LOCALES[1..] {
        let msgs = messages(src);
        assert!(msgs.contains_key("dashboard-title"), "{locale}");
        assert!(
            !src.contains("dashboard-title = Advanced Cafe Analytics"),
            "{locale} still carries the English title"
        );
    }
}
