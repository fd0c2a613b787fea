//! Empty state component renderer.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message inside the content column.
///
/// ```text
/// [blank]
/// [padding] MESSAGE [padding]
/// [padding] subtitle [padding]
/// ```
pub fn render_empty_state(row: usize, col: usize, width: usize, empty: &EmptyState, theme: &Theme) {
    position_cursor(row + 1, col);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", center(&empty.message, width));
    print!("{}", Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    position_cursor(row + 2, col);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", center(&empty.subtitle, width));
    print!("{}", Theme::reset());
}
