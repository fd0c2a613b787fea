//! Shopdash: an e-commerce admin dashboard that runs as a Zellij plugin.
//!
//! The plugin shows four screens over a small document store:
//! - a dashboard of order, revenue, user and product figures with the newest orders
//! - filterable, sortable, paginated tables of users, products and orders
//! - multi-row selection with a confirmed bulk delete on users and products
//! - an order detail modal that can change the order status in place

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, actions                          │
//! │  - Bulk action bar, detail modal, notifications     │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ View Layer    │   │ UI Layer      │   │ Worker Layer  │
//! │ (view/)       │   │ (ui/)         │   │ (worker/)     │
//! │ - DataView    │   │ - Components  │   │ - IPC bridge  │
//! │ - Selection   │   │ - Theming     │   │ - StoreWorker │
//! │ - Sorting     │   │ - Renderer    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                   │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         │ - JSON store  │
//!                                         │ - Settings    │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Infrastructure · Observability  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! All file access happens on the worker. The plugin keeps only what it is
//! showing, and every row load carries a generation number so that answers
//! for a screen the user already left are dropped.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/shopdash.wasm" {
//!         page_size "15"
//!         theme "shopdash-light"
//!         trace_level "debug"
//!         seed_demo "true"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use shopdash::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default())?;
//! let (render, actions) = handle_event(&mut state, &Event::Init)?;
//!
//! assert!(render);
//! assert!(actions.iter().all(|a| matches!(a, Action::PostToWorker(_))));
//! # Ok::<(), shopdash::ShopdashError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod view;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, Screen};
pub use domain::{EntityKind, Result, ShopdashError};
pub use ui::{Theme, ThemeSource};
pub use worker::StoreLocation;

use infrastructure::{expand_tilde, get_data_dir};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Rows per page when `page_size` is absent or invalid.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Plugin configuration parsed from the KDL plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory for the store, settings and log files.
    pub data_dir: PathBuf,

    /// Store file; defaults to `store.json` in `data_dir`.
    pub store_file: Option<PathBuf>,

    /// Settings file; defaults to `settings.toml` in `data_dir`.
    pub settings_file: Option<PathBuf>,

    /// Rows per table page. Never zero.
    pub page_size: usize,

    /// Built-in theme that overrides the light/dark setting.
    pub theme_name: Option<String>,

    /// Custom TOML theme. Takes precedence over `theme_name`.
    pub theme_file: Option<PathBuf>,

    /// `EnvFilter` directive, for example `debug` or `shopdash=trace`.
    pub trace_level: Option<String>,

    /// Seed a missing store with demo data.
    pub seed_demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: get_data_dir(),
            store_file: None,
            settings_file: None,
            page_size: DEFAULT_PAGE_SIZE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            seed_demo: true,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Unknown keys are ignored and malformed values fall back to defaults.
    /// Paths starting with `~` are rewritten to the sandbox `/host` mount.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use shopdash::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "0".to_string());
    /// map.insert("store_file".to_string(), "~/shop.json".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 1);
    /// assert_eq!(config.store_location().store_file.to_str(), Some("/host/shop.json"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let path = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| PathBuf::from(expand_tilde(s)))
        };
        let text = |key: &str| config.get(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map_or(DEFAULT_PAGE_SIZE, |n| n.max(1));

        let seed_demo = config
            .get("seed_demo")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(true);

        Self {
            data_dir: path("data_dir").unwrap_or_else(get_data_dir),
            store_file: path("store_file"),
            settings_file: path("settings_file"),
            page_size,
            theme_name: text("theme"),
            theme_file: path("theme_file"),
            trace_level: text("trace_level"),
            seed_demo,
        }
    }

    /// Where the worker should open its files.
    #[must_use]
    pub fn store_location(&self) -> StoreLocation {
        StoreLocation {
            store_file: self
                .store_file
                .clone()
                .unwrap_or_else(|| self.data_dir.join("store.json")),
            settings_file: self
                .settings_file
                .clone()
                .unwrap_or_else(|| self.data_dir.join("settings.toml")),
            seed_demo: self.seed_demo,
        }
    }

    /// Where the palette comes from. An explicit file wins over a named theme.
    #[must_use]
    pub fn theme_source(&self) -> ThemeSource {
        match (&self.theme_file, &self.theme_name) {
            (Some(file), _) => ThemeSource::File(file.clone()),
            (None, Some(name)) => ThemeSource::Named(name.clone()),
            (None, None) => ThemeSource::FollowSettings,
        }
    }
}

/// Builds the initial [`AppState`] for `config`.
///
/// No file is touched here; the store is opened by the worker once
/// [`Event::Init`] has been handled.
///
/// # Errors
///
/// Fails only if a built-in column set is inconsistent with its record type.
pub fn initialize(config: &Config) -> Result<AppState> {
    let _span = tracing::debug_span!("initialize", page_size = config.page_size).entered();

    let state = AppState::new(config.store_location(), config.page_size, config.theme_source())?;
    tracing::info!(
        store = %state.store_location.store_file.display(),
        theme = %state.theme.name,
        "shopdash initialized"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());

        let location = config.store_location();
        assert_eq!(location.store_file, get_data_dir().join("store.json"));
        assert_eq!(location.settings_file, get_data_dir().join("settings.toml"));
        assert!(location.seed_demo);
    }

    #[test]
    fn files_default_relative_to_data_dir() {
        let config = Config::from_zellij(&map(&[("data_dir", "~/shop"), ("settings_file", "/tmp/s.toml")]));
        let location = config.store_location();
        assert_eq!(location.store_file, PathBuf::from("/host/shop/store.json"));
        assert_eq!(location.settings_file, PathBuf::from("/tmp/s.toml"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = Config::from_zellij(&map(&[("page_size", "lots"), ("seed_demo", "maybe"), ("theme", "  ")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.seed_demo);
        assert_eq!(config.theme_name, None);

        assert!(!Config::from_zellij(&map(&[("seed_demo", "false")])).seed_demo);
        assert_eq!(Config::from_zellij(&map(&[("page_size", "25")])).page_size, 25);
    }

    #[test]
    fn theme_file_beats_theme_name() {
        let both = Config::from_zellij(&map(&[("theme", "shopdash-light"), ("theme_file", "/t.toml")]));
        assert_eq!(both.theme_source(), ThemeSource::File(PathBuf::from("/t.toml")));

        let named = Config::from_zellij(&map(&[("theme", "shopdash-light")]));
        assert_eq!(named.theme_source(), ThemeSource::Named("shopdash-light".to_string()));

        assert_eq!(Config::default().theme_source(), ThemeSource::FollowSettings);
    }

    #[test]
    fn initialize_uses_configured_page_size_and_location() {
        let config = Config {
            page_size: 3,
            ..Config::default()
        };
        let state = initialize(&config).unwrap();
        assert_eq!(state.store_location, config.store_location());
        assert_eq!(state.screen, Screen::default());
    }
}
