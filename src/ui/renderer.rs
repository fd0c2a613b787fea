//! Top-level rendering coordinator.
//!
//! Rendering is two steps: [`AppState::compute_viewmodel`] turns state into a
//! [`UIViewModel`], then the components draw it with the active theme.

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output positioned with absolute cursor moves. Does not
/// clear the screen; Zellij hands each render a blank pane.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols, screen = ?state.screen).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, rows, cols);
}
