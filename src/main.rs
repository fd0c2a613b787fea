//! Zellij plugin wrapper and entry point.
//!
//! A thin shim between Zellij and the shopdash library. It translates Zellij
//! events into [`Event`]s, hands them to [`handle_event`], and carries out the
//! returned [`Action`]s. All file access lives in the store worker:
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │ JSON IPC     │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   StoreWorker    │   │  ← JSON store, settings file
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Normal mode:
//! - `1`-`5`: Dashboard, Users, Products, Orders, Settings
//! - `j`/`k`, `Down`/`Up`: Move the cursor
//! - `h`/`l`, `Left`/`Right`: Previous / next page
//! - `Tab`/`Shift+Tab`: Focus next / previous column, `s`: sort by it
//! - `/`: Filter, `Space`: select row, `a`: select page, `A`: select all
//! - `d`: Delete selected, `c`: clear selection
//! - `Enter`: Open order or product details, `r`: reload
//! - `n`: New product, `e`: edit the product under the cursor
//! - `t`: Light/dark, `p`: accent, `b`: sidebar, `q`: hide
//!
//! Filter mode: printable keys edit the filter, `Enter` keeps it, `Esc` clears it.
//!
//! Confirm dialog: `y`/`Enter` deletes, `n`/`Esc` cancels.
//!
//! Detail modal: `s`/`S` cycle an order's status, `e` edits a product,
//! `Esc`/`q` close.
//!
//! Product form: printable keys type into the focused field, `Tab`/`Down` and
//! `Shift+Tab`/`Up` move between fields, `Left`/`Right` pick category, brand or
//! status, `Enter` saves, `Esc` cancels.
//!
//! Built for any target other than wasm32 this binary only prints a hint.

#![allow(clippy::multiple_crate_versions)]

use shopdash::app::AppState;
use shopdash::{Event, InputMode, Screen};
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

#[cfg(target_arch = "wasm32")]
use plugin::State;
#[cfg(target_arch = "wasm32")]
use shopdash::worker::StoreWorker;
#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(State);
#[cfg(target_arch = "wasm32")]
register_worker!(StoreWorker, store_worker, STORE_WORKER);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("shopdash is a Zellij plugin: build it for wasm32-wasip1 and load the .wasm from a Zellij layout");
}

/// Maps a key press to an application event for the current context.
///
/// The confirm dialog captures keys first, then the product form, then the
/// detail modal, then filter input. Returns `None` for keys that mean nothing in that context.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn map_key_event(app: &AppState, key: &KeyWithModifier) -> Option<Event> {
    tracing::debug!(bare_key = ?key.bare_key, "key event");

    if app.bulk_bar.is_confirming() {
        return match key.bare_key {
            BareKey::Char('y') | BareKey::Enter => Some(Event::Confirm),
            BareKey::Char('n') | BareKey::Esc => Some(Event::CancelConfirm),
            _ => None,
        };
    }

    if app.input_mode == InputMode::Form {
        return match key.bare_key {
            BareKey::Esc => Some(Event::Escape),
            BareKey::Enter => Some(Event::Enter),
            BareKey::Backspace => Some(Event::Backspace),
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Some(Event::PrevField),
            BareKey::Tab | BareKey::Down => Some(Event::NextField),
            BareKey::Up => Some(Event::PrevField),
            BareKey::Right => Some(Event::NextChoice),
            BareKey::Left => Some(Event::PrevChoice),
            BareKey::Char(c) => Some(Event::Char(c)),
            _ => None,
        };
    }

    if app.modal.is_open() {
        return match key.bare_key {
            BareKey::Char('e') => Some(Event::EditProduct),
            BareKey::Char('s') => Some(Event::NextStatus),
            BareKey::Char('S') => Some(Event::PrevStatus),
            BareKey::Esc | BareKey::Char('q') => Some(Event::Escape),
            _ => None,
        };
    }

    if app.input_mode == InputMode::Filter {
        return match key.bare_key {
            BareKey::Esc => Some(Event::Escape),
            BareKey::Enter => Some(Event::Enter),
            BareKey::Backspace => Some(Event::Backspace),
            BareKey::Down => Some(Event::CursorDown),
            BareKey::Up => Some(Event::CursorUp),
            BareKey::Char(c) => Some(Event::Char(c)),
            _ => None,
        };
    }

    if let BareKey::Char(c) = key.bare_key {
        if let Some(screen) = Screen::from_hotkey(c) {
            return Some(Event::SwitchScreen(screen));
        }
    }

    Some(match key.bare_key {
        BareKey::Down | BareKey::Char('j') => Event::CursorDown,
        BareKey::Up | BareKey::Char('k') => Event::CursorUp,
        BareKey::Right | BareKey::Char('l') => Event::NextPage,
        BareKey::Left | BareKey::Char('h') => Event::PrevPage,
        BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::FocusPrevColumn,
        BareKey::Tab => Event::FocusNextColumn,
        BareKey::Char('s') => Event::ToggleSort,
        BareKey::Char('/') => Event::StartFilter,
        BareKey::Char(' ') => Event::ToggleRow,
        BareKey::Char('a') => Event::TogglePage,
        BareKey::Char('A') => Event::ToggleAllVisible,
        BareKey::Char('d') => Event::RequestDelete,
        BareKey::Char('c') => Event::ClearSelection,
        BareKey::Char('n') => Event::NewProduct,
        BareKey::Char('e') => Event::EditProduct,
        BareKey::Enter => Event::Enter,
        BareKey::Esc => Event::Escape,
        BareKey::Char('r') => Event::Reload,
        BareKey::Char('t') => Event::ToggleTheme,
        BareKey::Char('p') => Event::CycleAccent,
        BareKey::Char('b') => Event::ToggleSidebar,
        BareKey::Char('q') => Event::Hide,
        _ => return None,
    })
}

#[cfg(target_arch = "wasm32")]
mod plugin {
    use super::map_key_event;
    use shopdash::app::AppState;
    use shopdash::worker::{WorkerMessage, WorkerResponse};
    use shopdash::{handle_event, Action, Config, Event};
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;
    use zellij_tile::shim::post_message_to;

    /// Must match the prefix given to `register_worker!`.
    const WORKER_NAME: &str = "store";

    /// Plugin state wrapper.
    ///
    /// `app` stays `None` if initialization failed; the plugin then renders a
    /// pointer to the log and ignores input.
    #[derive(Default)]
    pub struct State {
        app: Option<AppState>,
    }

    impl ZellijPlugin for State {
        /// Parses the configuration, sets up tracing and builds the app state.
        ///
        /// Nothing is loaded until permissions are granted; the first
        /// `PermissionRequestResult` triggers [`Event::Init`].
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            shopdash::observability::init_tracing(&config);

            let _span = tracing::debug_span!("plugin_load").entered();
            tracing::debug!(config = ?config, "parsed configuration");

            self.app = match shopdash::initialize(&config) {
                Ok(app) => Some(app),
                Err(e) => {
                    tracing::error!(error = %e, "failed to initialize");
                    None
                }
            };

            request_permission(&[
                PermissionType::ReadApplicationState,
                PermissionType::ChangeApplicationState,
                PermissionType::FullHdAccess,
            ]);

            subscribe(&[
                EventType::Key,
                EventType::CustomMessage,
                EventType::Timer,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span_name = format!("plugin_update::{event_name}");
            let _span =
                tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name)
                    .entered();

            let Some(app) = self.app.as_ref() else {
                return false;
            };

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match map_key_event(app, key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                    match Self::map_custom_message_event(&message, &payload) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::Timer(_) => Event::Tick {
                    now: chrono::Utc::now(),
                },
                zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                    tracing::debug!("permissions granted - loading data");
                    Event::Init
                }
                zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                    tracing::warn!("permissions denied - store cannot be opened");
                    return false;
                }
                _ => return false,
            };

            self.dispatch(&our_event)
        }

        fn render(&mut self, rows: usize, cols: usize) {
            match self.app.as_ref() {
                Some(app) => shopdash::ui::render(app, rows, cols),
                None => println!("shopdash failed to start; see shopdash.log in the data directory"),
            }
        }
    }

    impl State {
        /// Runs one event through the library and executes its actions.
        fn dispatch(&mut self, event: &Event) -> bool {
            let Some(app) = self.app.as_mut() else {
                return false;
            };

            match handle_event(app, event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled");
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
                zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
                return None;
            }

            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::warn!(error = %e, payload_len = payload.len(), "failed to deserialize worker response");
                    None
                }
            }
        }

        fn post_worker_message(message: &WorkerMessage) {
            match serde_json::to_string(message) {
                Ok(payload) => post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                }),
                Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
            }
        }

        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::PostToWorker(message) => Self::post_worker_message(message),
                Action::SetTimeout(secs) => set_timeout(*secs),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdash::app::ProductForm;
    use shopdash::Config;

    fn app() -> AppState {
        shopdash::initialize(&Config::default()).unwrap()
    }

    fn key(c: char) -> KeyWithModifier {
        KeyWithModifier::new(BareKey::Char(c))
    }

    #[test]
    fn digits_switch_screens_in_normal_mode() {
        let app = app();
        assert_eq!(map_key_event(&app, &key('4')), Some(Event::SwitchScreen(Screen::Orders)));
        assert_eq!(map_key_event(&app, &key('9')), None);
    }

    #[test]
    fn filter_mode_turns_commands_into_text() {
        let mut app = app();
        app.input_mode = InputMode::Filter;
        assert_eq!(map_key_event(&app, &key('d')), Some(Event::Char('d')));
        assert_eq!(map_key_event(&app, &key('1')), Some(Event::Char('1')));
        assert_eq!(
            map_key_event(&app, &KeyWithModifier::new(BareKey::Esc)),
            Some(Event::Escape)
        );
    }

    #[test]
    fn shift_tab_focuses_previous_column() {
        let app = app();
        let shift_tab = KeyWithModifier::new(BareKey::Tab).with_shift_modifier();
        assert_eq!(map_key_event(&app, &shift_tab), Some(Event::FocusPrevColumn));
        assert_eq!(
            map_key_event(&app, &KeyWithModifier::new(BareKey::Tab)),
            Some(Event::FocusNextColumn)
        );
    }

    #[test]
    fn form_mode_captures_typing_and_field_keys() {
        let mut app = app();
        app.product_form = Some(ProductForm::create());
        app.input_mode = InputMode::Form;

        assert_eq!(map_key_event(&app, &key('q')), Some(Event::Char('q')));
        assert_eq!(map_key_event(&app, &key('3')), Some(Event::Char('3')));
        assert_eq!(map_key_event(&app, &KeyWithModifier::new(BareKey::Tab)), Some(Event::NextField));
        assert_eq!(
            map_key_event(&app, &KeyWithModifier::new(BareKey::Tab).with_shift_modifier()),
            Some(Event::PrevField)
        );
        assert_eq!(map_key_event(&app, &KeyWithModifier::new(BareKey::Left)), Some(Event::PrevChoice));
        assert_eq!(map_key_event(&app, &KeyWithModifier::new(BareKey::Enter)), Some(Event::Enter));
    }

    #[test]
    fn product_keys_in_normal_mode() {
        let app = app();
        assert_eq!(map_key_event(&app, &key('n')), Some(Event::NewProduct));
        assert_eq!(map_key_event(&app, &key('e')), Some(Event::EditProduct));
    }
}
