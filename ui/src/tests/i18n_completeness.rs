//! Every `t!` key used in `src/` must exist in the fallback bundle, and every
//! other locale must define every fallback key.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "cafe-dashboard-ui.ftl";
const FALLBACK: &str = "en-US";

fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Message ids defined in a Fluent file; terms and attributes are skipped.
fn ftl_keys(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| !id.is_empty() && id.chars().all(is_key_char))
        .map(str::to_string)
        .collect()
}

/// Literal first arguments of `t!(...)` calls in `.rs` files under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(source) = fs::read_to_string(&path) else {
            continue;
        };
        for chunk in source.split("t!(\"").skip(1) {
            if let Some((key, _)) = chunk.split_once('"') {
                if !key.is_empty() && key.chars().all(is_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }
    found
}

fn bundle(root: &Path, locale: &str) -> BTreeSet<String> {
    let path = root.join("i18n").join(locale).join(FTL_FILENAME);
    let content = fs::read_to_string(&path).unwrap_or_else(|err| panic!("{path:?}: {err}"));
    ftl_keys(&content)
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = bundle(&root, FALLBACK);
    let missing: Vec<_> = referenced_keys(&root.join("src"))
        .into_iter()
        .filter(|key| !fallback.contains(key))
        .collect();
    assert!(missing.is_empty(), "keys missing from {FALLBACK}: {missing:?}");
}

#[test]
fn every_locale_matches_fallback() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = bundle(&root, FALLBACK);
    for locale in crate::i18n::available_languages() {
        let keys = bundle(&root, &locale);
        let missing: Vec<_> = fallback.difference(&keys).collect();
        let extra: Vec<_> = keys.difference(&fallback).collect();
        assert!(missing.is_empty(), "{locale} is missing {missing:?}");
        assert!(extra.is_empty(), "{locale} defines unknown keys {extra:?}");
    }
}
