//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    /// Whether the export pipeline can rasterize the dashboard sheet.
    pub fn renders_png(self) -> bool {
        matches!(self, Self::Desktop)
    }
}
