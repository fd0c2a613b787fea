//! Table component renderer: column headers, rows, and the pager line.

use super::empty::render_empty_state;
use crate::ui::helpers::{fit, position_cursor, render_border};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PagerInfo, TableRow, TableViewModel};

/// Narrowest a column is squeezed to before the table is allowed to clip.
const MIN_COLUMN_WIDTH: usize = 4;
/// Cells taken by the checkbox column, trailing space included.
const CHECKBOX_WIDTH: usize = 4;

/// Fits preferred column widths into `available` cells, one-cell gaps
/// included, by repeatedly narrowing the widest column.
#[must_use]
pub fn layout_columns(preferred: &[usize], available: usize) -> Vec<usize> {
    let mut widths = preferred.to_vec();
    let gaps = widths.len().saturating_sub(1);
    let mut total: usize = widths.iter().sum::<usize>() + gaps;

    while total > available {
        let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
            break;
        };
        if widest <= MIN_COLUMN_WIDTH {
            break;
        }
        widths[idx] -= 1;
        total -= 1;
    }
    widths
}

/// Renders the table body between `top` and `bottom` inclusive.
///
/// Layout:
/// ```text
/// [error line, when the last load failed]
/// [summary line, when there is one]
/// [column headers]
/// [border]
/// [page rows | empty state | loading]
/// ...
/// [pager]            <- always on `bottom`
/// ```
pub fn render_table(top: usize, bottom: usize, col: usize, width: usize, table: &TableViewModel, theme: &Theme) {
    let mut row = top;

    if let Some(error) = &table.error {
        position_cursor(row, col);
        print!("{}{}{}", Theme::fg(&theme.colors.danger), fit(error, width), Theme::reset());
        row += 1;
    }

    if let Some(summary) = &table.summary {
        position_cursor(row, col);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(summary, width), Theme::reset());
        row += 1;
    }

    let check_width = if table.header_checkbox.is_some() { CHECKBOX_WIDTH } else { 0 };
    let preferred: Vec<usize> = table.columns.iter().map(|c| c.width).collect();
    let widths = layout_columns(&preferred, width.saturating_sub(check_width));

    position_cursor(row, col);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(glyph) = table.header_checkbox {
        print!("{glyph} ");
    }
    for (column, &w) in table.columns.iter().zip(&widths) {
        let label = column
            .sort_indicator
            .map_or_else(|| column.label.clone(), |arrow| format!("{} {arrow}", column.label));
        if column.focused {
            print!("{}\u{1b}[4m{}\u{1b}[24m", Theme::fg(&theme.colors.accent), fit(&label, w));
            print!("{}", Theme::fg(&theme.colors.header_fg));
        } else {
            print!("{}", fit(&label, w));
        }
        print!(" ");
    }
    print!("{}", Theme::reset());
    row += 1;
    row = render_border(row, col, &theme.colors.border, width);

    let last_body_row = bottom.saturating_sub(1);

    if table.rows.is_empty() {
        if table.loading {
            position_cursor(row + 1, col);
            print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit("Loading...", width), Theme::reset());
        } else if let Some(empty) = &table.empty_state {
            render_empty_state(row, col, width, empty, theme);
        }
    } else {
        for table_row in &table.rows {
            if row > last_body_row {
                break;
            }
            render_row(row, col, width, table_row, &widths, theme);
            row += 1;
        }
    }

    render_pager(bottom, col, width, &table.pager, theme);
}

fn render_row(row: usize, col: usize, width: usize, table_row: &TableRow, widths: &[usize], theme: &Theme) {
    position_cursor(row, col);

    if table_row.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    if table_row.is_cursor {
        print!("{}{}", Theme::bold(), Theme::bg(&theme.colors.cursor_bg));
    }

    let mut line = String::new();
    if let Some(glyph) = table_row.checkbox {
        line.push_str(glyph);
        line.push(' ');
    }
    for (cell, &w) in table_row.cells.iter().zip(widths) {
        line.push_str(&fit(cell, w));
        line.push(' ');
    }

    // Pad to the full width so the cursor and selection backgrounds span the row.
    print!("{}", fit(&line, width));
    print!("{}", Theme::reset());
}

fn render_pager(row: usize, col: usize, width: usize, pager: &PagerInfo, theme: &Theme) {
    let text = if pager.page_count == 0 {
        format!("No rows  ({} total)", pager.total)
    } else if pager.visible == pager.total {
        format!("Page {} of {}  ·  {} rows  ·  h/l: page", pager.page, pager.page_count, pager.total)
    } else {
        format!(
            "Page {} of {}  ·  {} of {} rows match  ·  h/l: page",
            pager.page, pager.page_count, pager.visible, pager.total
        )
    };
    position_cursor(row, col);
    print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(&text, width), Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_that_fit_are_untouched() {
        assert_eq!(layout_columns(&[10, 20, 8], 40), vec![10, 20, 8]);
    }

    #[test]
    fn widest_columns_shrink_first() {
        let widths = layout_columns(&[10, 30, 8], 40);
        assert_eq!(widths.iter().sum::<usize>() + 2, 40);
        assert_eq!(widths[0], 10);
        assert_eq!(widths[2], 8);
    }

    #[test]
    fn shrinking_stops_at_minimum() {
        assert_eq!(layout_columns(&[6, 6], 4), vec![MIN_COLUMN_WIDTH, MIN_COLUMN_WIDTH]);
    }
}
