//! Bulk action bar renderer.

use crate::ui::helpers::{fit, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::BulkBarInfo;

/// Renders the selection summary and its actions on one highlighted line.
pub fn render_bulk_bar(row: usize, col: usize, width: usize, bar: &BulkBarInfo, theme: &Theme) {
    let summary = format!(" {}", bar.summary);
    let hint_width = text_width(&bar.hint) + 1;
    let summary_width = width.saturating_sub(hint_width);

    position_cursor(row, col);
    print!("{}", Theme::fg(&theme.colors.selection_fg));
    print!("{}", Theme::bg(&theme.colors.selection_bg));
    print!("{}{}", Theme::bold(), fit(&summary, summary_width));
    print!("{}", Theme::reset());
    print!("{}", Theme::bg(&theme.colors.selection_bg));
    if bar.busy {
        print!("{}{}", Theme::fg(&theme.colors.text_dim), Theme::dim());
    } else {
        print!("{}", Theme::fg(&theme.colors.danger));
    }
    print!("{} ", fit(&bar.hint, hint_width.saturating_sub(1)));
    print!("{}", Theme::reset());
}
