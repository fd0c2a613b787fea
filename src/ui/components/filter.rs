//! Filter bar component renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the filter input as a 3-line box. Returns the next row.
///
/// ```text
/// ┌──────────────────────┐
/// │ / Filter by name...  │
/// └──────────────────────┘
/// ```
///
/// The border takes the accent colour while the filter is receiving keys.
/// An empty query shows the placeholder dimmed.
pub fn render_filter_bar(row: usize, col: usize, width: usize, filter: &FilterBarInfo, theme: &Theme) -> usize {
    let inner_width = width.saturating_sub(2);
    let border = if filter.active {
        &theme.colors.accent
    } else {
        &theme.colors.border
    };

    position_cursor(row, col);
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let (text, style) = if filter.query.is_empty() {
        (format!(" / {}", filter.placeholder), Theme::fg(&theme.colors.text_dim))
    } else {
        let caret = if filter.active { "_" } else { "" };
        (format!(" / {}{caret}", filter.query), Theme::fg(&theme.colors.text_normal))
    };

    position_cursor(row + 1, col);
    print!("{}│", Theme::fg(border));
    print!("{style}{}", fit(&text, inner_width));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, col);
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
