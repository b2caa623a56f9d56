//! Formatting helpers for presenting metrics.
//!
//! Currency is rendered in whole dollars (no minor units) and integers with
//! locale thousands grouping. Output depends only on the value and the
//! [`NumberLocale`], so repeated calls always agree.

/// Where the currency symbol sits relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub tag: &'static str,
    pub currency_symbol: &'static str,
    pub symbol_position: SymbolPosition,
    pub group_separator: &'static str,
    pub decimal_separator: char,
    /// Smallest number of integer digits before grouping kicks in
    /// (Spanish leaves four-digit numbers ungrouped).
    pub min_grouping_digits: usize,
}

pub const EN_US: NumberLocale = NumberLocale {
    tag: "en-US",
    currency_symbol: "$",
    symbol_position: SymbolPosition::Prefix,
    group_separator: ",",
    decimal_separator: '.',
    min_grouping_digits: 4,
};

pub const ES_ES: NumberLocale = NumberLocale {
    tag: "es-ES",
    currency_symbol: "US$",
    symbol_position: SymbolPosition::Suffix,
    group_separator: ".",
    decimal_separator: ',',
    min_grouping_digits: 5,
};

pub const FR_FR: NumberLocale = NumberLocale {
    tag: "fr-FR",
    currency_symbol: "$US",
    symbol_position: SymbolPosition::Suffix,
    group_separator: "\u{202f}",
    decimal_separator: ',',
    min_grouping_digits: 4,
};

const PLACEHOLDER: &str = "—";

impl NumberLocale {
    /// Preset for a language tag; unknown tags fall back to `en-US`.
    pub fn for_language(tag: &str) -> NumberLocale {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "es" => ES_ES,
            "fr" => FR_FR,
            _ => EN_US,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        EN_US
    }
}

/// Whole-dollar currency, rounding half away from zero (`27.78 → "$28"`).
pub fn format_currency(value: f64, locale: &NumberLocale) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = group_digits(&format!("{:.0}", rounded.abs()), locale);
    let sign = if negative { "-" } else { "" };

    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{}{digits}", locale.currency_symbol),
        SymbolPosition::Suffix => format!("{sign}{digits}\u{a0}{}", locale.currency_symbol),
    }
}

pub fn format_integer(value: u64, locale: &NumberLocale) -> String {
    group_digits(&value.to_string(), locale)
}

/// Signed percentage with one decimal at most, e.g. `+15.4%`.
pub fn format_percent_signed(value: f64, locale: &NumberLocale) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let sign = if value >= 0.0 { "+" } else { "-" };
    format!("{sign}{}%", format_decimal(value.abs(), 1, locale))
}

/// Compact decimal used for ratings (`4.8`, `4`).
pub fn format_decimal(value: f64, max_fraction_digits: usize, locale: &NumberLocale) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let fixed = format!("{value:.max_fraction_digits$}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    trimmed.replace('.', &locale.decimal_separator.to_string())
}

fn group_digits(digits: &str, locale: &NumberLocale) -> String {
    if digits.len() < locale.min_grouping_digits {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    let lead = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (idx + 3 - lead) % 3 == 0 {
            out.push_str(locale.group_separator);
        }
        out.push(ch);
    }
    out
}
