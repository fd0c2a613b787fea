//! User preferences for appearance and layout.
//!
//! [`Settings`] is a plain value passed to whoever needs it. The worker
//! persists it and the plugin thread owns the live copy.

use serde::{Deserialize, Serialize};

/// Light or dark base palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Accent colour applied on top of the base palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Indigo,
    Blue,
    Green,
    Purple,
    Red,
    Orange,
}

impl Accent {
    pub const ALL: [Self; 6] = [
        Self::Indigo,
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Red,
        Self::Orange,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Indigo => "Indigo",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Purple => "Purple",
            Self::Red => "Red",
            Self::Orange => "Orange",
        }
    }

    /// Hex colour used for highlights.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Indigo => "#6366f1",
            Self::Blue => "#3b82f6",
            Self::Green => "#22c55e",
            Self::Purple => "#a855f7",
            Self::Red => "#ef4444",
            Self::Orange => "#f97316",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Appearance and layout preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    theme_mode: ThemeMode,
    accent: Accent,
    sidebar_collapsed: bool,
}

impl Settings {
    #[must_use]
    pub const fn new(theme_mode: ThemeMode, accent: Accent, sidebar_collapsed: bool) -> Self {
        Self {
            theme_mode,
            accent,
            sidebar_collapsed,
        }
    }

    /// Light or dark.
    #[must_use]
    pub const fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// Flips light and dark, returning the new mode.
    pub fn toggle_theme_mode(&mut self) -> ThemeMode {
        self.theme_mode = self.theme_mode.toggled();
        self.theme_mode
    }

    #[must_use]
    pub const fn accent(&self) -> Accent {
        self.accent
    }

    /// Moves to the next accent, returning it.
    pub fn cycle_accent(&mut self) -> Accent {
        self.accent = self.accent.next();
        self.accent
    }

    #[must_use]
    pub const fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    /// Flips the sidebar, returning whether it is now collapsed.
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}
