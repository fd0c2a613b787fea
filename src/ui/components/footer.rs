//! Footer component renderer.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered and dimmed. Returns the next row.
///
/// Text wider than the pane is truncated so it never wraps onto another line.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&footer.keybindings, cols));
    print!("{}", Theme::reset());
    row + 1
}
