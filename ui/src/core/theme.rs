//! Named series colors used by cards and charts.
//!
//! The nine recognized keys double as the categorical palette, in declaration
//! order, for charts that color by index (donut segments, treemap categories).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries in [`Theme::palette`].
pub const PALETTE_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub tertiary: String,
    pub quaternary: String,
    pub success: String,
    pub warning: String,
    pub info: String,
    pub neutral: String,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("theme color `{key}` is blank")]
    BlankColor { key: &'static str },
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#4F46E5".into(),
            secondary: "#10B981".into(),
            accent: "#F59E0B".into(),
            tertiary: "#EC4899".into(),
            quaternary: "#8B5CF6".into(),
            success: "#059669".into(),
            warning: "#DC2626".into(),
            info: "#0EA5E9".into(),
            neutral: "#6B7280".into(),
        }
    }
}

impl Theme {
    /// Parse a TOML override; keys that are absent keep their default color.
    ///
    /// ```toml
    /// primary = "#1D4ED8"
    /// accent = "orange"
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self, ThemeError> {
        let theme: Theme = toml::from_str(raw)?;
        for (key, color) in theme.entries() {
            if color.trim().is_empty() {
                return Err(ThemeError::BlankColor { key });
            }
        }
        Ok(theme)
    }

    /// Colors in palette order.
    pub fn palette(&self) -> [&str; PALETTE_LEN] {
        self.entries().map(|(_, color)| color)
    }

    /// Palette color for a position, wrapping around after the ninth entry.
    pub fn palette_color(&self, index: usize) -> &str {
        self.palette()[index % PALETTE_LEN]
    }

    fn entries(&self) -> [(&'static str, &str); PALETTE_LEN] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("tertiary", self.tertiary.as_str()),
            ("quaternary", self.quaternary.as_str()),
            ("success", self.success.as_str()),
            ("warning", self.warning.as_str()),
            ("info", self.info.as_str()),
            ("neutral", self.neutral.as_str()),
        ]
    }
}

/// Load `theme.toml` from the user config directory, if one exists.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_user_theme() -> Theme {
    let Some(dirs) = directories::ProjectDirs::from("com", "CafeAnalytics", "CafeAnalytics") else {
        return Theme::default();
    };
    let path = dirs.config_dir().join("theme.toml");
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return Theme::default(),
    };
    match Theme::from_toml_str(&raw) {
        Ok(theme) => {
            tracing::info!(path = %path.display(), "loaded theme override");
            theme
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring theme override");
            Theme::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_user_theme() -> Theme {
    Theme::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_follows_key_order() {
        let theme = Theme::default();
        let palette = theme.palette();
        assert_eq!(palette[0], "#4F46E5");
        assert_eq!(palette[2], "#F59E0B");
        assert_eq!(palette[8], "#6B7280");
    }

    #[test]
    fn palette_wraps_after_nine() {
        let theme = Theme::default();
        assert_eq!(theme.palette_color(9), theme.primary);
        assert_eq!(theme.palette_color(10), theme.secondary);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let theme = Theme::from_toml_str("primary = \"#000000\"\n").unwrap();
        assert_eq!(theme.primary, "#000000");
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Theme::from_toml_str("magenta = \"#ff00ff\"\n"),
            Err(ThemeError::Parse(_))
        ));
    }

    #[test]
    fn blank_colors_are_rejected() {
        assert!(matches!(
            Theme::from_toml_str("info = \"  \"\n"),
            Err(ThemeError::BlankColor { key: "info" })
        ));
    }
}
