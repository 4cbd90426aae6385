#![forbid(unsafe_code)]

//! Palette configuration.

/// Behavior switches for a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaletteConfig {
    /// Wrap highlight around the ends of the list.
    pub loop_navigation: bool,
    /// Open the palette as soon as it is constructed.
    pub default_open: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            loop_navigation: true,
            default_open: false,
        }
    }
}

impl PaletteConfig {
    /// Default configuration: looping on, initially closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set wrap-around navigation (builder).
    #[must_use]
    pub fn with_loop(mut self, loop_navigation: bool) -> Self {
        self.loop_navigation = loop_navigation;
        self
    }

    /// Set whether the palette starts open (builder).
    #[must_use]
    pub fn with_default_open(mut self, default_open: bool) -> Self {
        self.default_open = default_open;
        self
    }
}
