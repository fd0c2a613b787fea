//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes ship with the plugin, `shopdash-dark` (default) and
//! `shopdash-light`. The user's [`Settings`] pick one of them and recolour its
//! accent. A custom palette can also be loaded from a TOML file, in which case
//! it is used as-is.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f1f5f9"
//! accent = "#6366f1"
//! selection_fg = "#f8fafc"
//! selection_bg = "#312e81"
//! cursor_bg = "#334155"
//! text_normal = "#e2e8f0"
//! text_dim = "#94a3b8"
//! border = "#475569"
//! success = "#22c55e"
//! warning = "#eab308"
//! danger = "#ef4444"
//! empty_state_fg = "#818cf8"
//! ```
//!
//! # Example
//!
//! ```
//! use shopdash::ui::Theme;
//!
//! let theme = Theme::from_name("shopdash-dark").unwrap();
//! let line = format!("{}{}Bold{}", Theme::fg(&theme.colors.accent), Theme::bold(), Theme::reset());
//! assert!(line.ends_with("\u{1b}[0m"));
//! ```

use crate::domain::{Accent, Result, Settings, ShopdashError, ThemeMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Color scheme used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active navigation entry, focused column, filter border.
    pub accent: String,

    /// Checked rows.
    pub selection_fg: String,
    pub selection_bg: String,
    /// Row under the cursor.
    pub cursor_bg: String,

    pub text_normal: String,
    /// Footer, hints and secondary text.
    pub text_dim: String,
    pub border: String,

    pub success: String,
    pub warning: String,
    pub danger: String,

    pub empty_state_fg: String,
}

/// Where the active theme comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeSource {
    /// Light or dark built-in chosen by [`Settings`], with its accent.
    #[default]
    FollowSettings,
    /// A built-in by name; the accent from [`Settings`] still applies.
    Named(String),
    /// A custom palette file, used unchanged.
    File(PathBuf),
}

impl ThemeSource {
    /// Produces the theme for the current settings.
    ///
    /// Falls back to the settings-driven built-in when a named theme is
    /// unknown or a theme file cannot be loaded.
    #[must_use]
    pub fn resolve(&self, settings: &Settings) -> Theme {
        match self {
            Self::FollowSettings => Theme::for_settings(settings),
            Self::Named(name) => Theme::from_name(name).map_or_else(
                || {
                    tracing::warn!(theme = %name, "unknown theme name, following settings");
                    Theme::for_settings(settings)
                },
                |theme| theme.with_accent(settings.accent()),
            ),
            Self::File(path) => Theme::from_file(path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "failed to load theme file, following settings");
                Theme::for_settings(settings)
            }),
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `shopdash-dark`, `shopdash-light`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "shopdash-dark" => include_str!("../../themes/shopdash-dark.toml"),
            "shopdash-light" => include_str!("../../themes/shopdash-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ShopdashError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ShopdashError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| ShopdashError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Built-in palette for a light/dark mode.
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        let name = match mode {
            ThemeMode::Light => "shopdash-light",
            ThemeMode::Dark => "shopdash-dark",
        };
        Self::from_name(name).unwrap_or_else(Self::fallback)
    }

    /// Built-in palette for `settings`, recoloured with its accent.
    #[must_use]
    pub fn for_settings(settings: &Settings) -> Self {
        Self::for_mode(settings.theme_mode()).with_accent(settings.accent())
    }

    /// Replaces the accent colour, leaving the rest of the palette alone.
    #[must_use]
    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.colors.accent = accent.hex().to_string();
        self
    }

    // Only reached if a bundled TOML stops parsing.
    fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: c("#ffffff"),
                header_bg: None,
                accent: c(Accent::default().hex()),
                selection_fg: c("#ffffff"),
                selection_bg: c("#312e81"),
                cursor_bg: c("#334155"),
                text_normal: c("#e2e8f0"),
                text_dim: c("#94a3b8"),
                border: c("#475569"),
                success: c("#22c55e"),
                warning: c("#eab308"),
                danger: c("#ef4444"),
                empty_state_fg: c("#818cf8"),
            },
        }
    }

    /// Converts a hex color to an RGB tuple. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        assert_eq!(Theme::from_name("shopdash-dark").unwrap().name, "shopdash-dark");
        assert_eq!(Theme::from_name("shopdash-light").unwrap().name, "shopdash-light");
        assert!(Theme::from_name("nope").is_none());
    }

    #[test]
    fn settings_pick_palette_and_accent() {
        let settings = Settings::new(ThemeMode::Light, Accent::Orange, false);
        let theme = Theme::for_settings(&settings);
        assert_eq!(theme.name, "shopdash-light");
        assert_eq!(theme.colors.accent, Accent::Orange.hex());
    }

    #[test]
    fn file_theme_ignores_accent_and_bad_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut custom = Theme::for_mode(ThemeMode::Dark);
        custom.name = "custom".to_string();
        custom.colors.accent = "#123456".to_string();
        fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let settings = Settings::new(ThemeMode::Dark, Accent::Green, false);
        let theme = ThemeSource::File(path).resolve(&settings);
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors.accent, "#123456");

        let missing = ThemeSource::File(dir.path().join("missing.toml")).resolve(&settings);
        assert_eq!(missing.name, "shopdash-dark");
        assert_eq!(missing.colors.accent, Accent::Green.hex());
    }

    #[test]
    fn escapes_are_24_bit() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("zzz"), "\u{1b}[48;2;255;255;255m");
    }
}
