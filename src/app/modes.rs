//! Screen, input mode and load state types.
//!
//! The plugin shows one [`Screen`] at a time. [`InputMode`] decides whether
//! printable keys are commands, filter text or product form input, and [`LoadState`] tracks the
//! outstanding fetch of a screen's data.

use crate::domain::EntityKind;

/// Top-level screens, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Users,
    Products,
    Orders,
    Settings,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::Settings,
    ];

    /// Heading shown in the header and the navigation.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Settings => "Settings",
        }
    }

    /// Digit key that jumps to this screen.
    #[must_use]
    pub const fn hotkey(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Users => '2',
            Self::Products => '3',
            Self::Orders => '4',
            Self::Settings => '5',
        }
    }

    /// Screen whose hotkey is `c`, if any.
    #[must_use]
    pub fn from_hotkey(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.hotkey() == c)
    }

    /// Collection listed by this screen, if it is a list screen.
    #[must_use]
    pub const fn entity(self) -> Option<EntityKind> {
        match self {
            Self::Users => Some(EntityKind::Users),
            Self::Products => Some(EntityKind::Products),
            Self::Orders => Some(EntityKind::Orders),
            Self::Dashboard | Self::Settings => None,
        }
    }
}

/// How printable keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys edit the filter of the active list.
    Filter,
    /// Keys edit the product form.
    Form,
}

/// Progress of the one outstanding fetch of a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; previous rows, if any, are still shown.
    Failed(String),
}

impl LoadState {
    /// Whether a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
