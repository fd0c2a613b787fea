//! Dashboard renderer: metric cards, orders by status, recent orders.

use crate::ui::helpers::{box_line, draw_box, fit, position_cursor, render_border, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DashboardInfo, MetricCard, RecentOrderRow};

const CARD_HEIGHT: usize = 4;
/// Below this card width the cards collapse to one line each.
const MIN_CARD_WIDTH: usize = 16;
const BAR_MAX: usize = 30;

/// Renders the dashboard body between `top` and `bottom`.
pub fn render_dashboard(top: usize, bottom: usize, col: usize, width: usize, info: &DashboardInfo, theme: &Theme) {
    let mut row = render_cards(top, col, width, &info.cards, theme);
    row += 1;

    row = render_section_title(row, col, "Orders by Status", theme);
    let max = info.status_breakdown.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
    for (label, count) in &info.status_breakdown {
        if row > bottom {
            return;
        }
        let bar = "█".repeat(count * BAR_MAX.min(width.saturating_sub(20)) / max);
        position_cursor(row, col);
        print!("{}{}", Theme::fg(&theme.colors.text_normal), fit(label, 12));
        print!("{}{bar}{} {count}", Theme::fg(&theme.colors.accent), Theme::fg(&theme.colors.text_dim));
        print!("{}", Theme::reset());
        row += 1;
    }
    row += 1;

    if row + 2 > bottom {
        return;
    }
    row = render_section_title(row, col, "Recent Orders", theme);
    row = render_border(row, col, &theme.colors.border, width);
    for order in &info.recent_orders {
        if row > bottom {
            break;
        }
        render_recent_order(row, col, width, order, theme);
        row += 1;
    }
}

fn render_section_title(row: usize, col: usize, title: &str, theme: &Theme) -> usize {
    position_cursor(row, col);
    print!("{}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    row + 1
}

/// Four cards side by side, or one line per card on narrow panes.
fn render_cards(row: usize, col: usize, width: usize, cards: &[MetricCard], theme: &Theme) -> usize {
    if cards.is_empty() {
        return row;
    }
    let gap = 1;
    let card_width = width.saturating_sub(gap * (cards.len() - 1)) / cards.len();

    if card_width < MIN_CARD_WIDTH {
        for (offset, card) in cards.iter().enumerate() {
            position_cursor(row + offset, col);
            let line = format!("{}: {}  ({})", card.label, card.value, card.hint);
            print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(&line, width), Theme::reset());
        }
        return row + cards.len();
    }

    for (idx, card) in cards.iter().enumerate() {
        let rect = Rect {
            row,
            col: col + idx * (card_width + gap),
            width: card_width,
            height: CARD_HEIGHT,
        };
        draw_box(rect, &card.label, &theme.colors.border, theme);
        let value_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
        box_line(rect, 1, &card.value, &value_style);
        box_line(rect, 2, &card.hint, &Theme::fg(&theme.colors.text_dim));
    }
    row + CARD_HEIGHT
}

fn render_recent_order(row: usize, col: usize, width: usize, order: &RecentOrderRow, theme: &Theme) {
    let customer_width = width.saturating_sub(10 + 12 + 12 + 14 + 4).max(8);
    let line = format!(
        "{} {} {} {} {}",
        fit(&order.id, 10),
        fit(&order.customer, customer_width),
        fit(&order.total, 12),
        fit(&order.status, 12),
        fit(&order.date, 14)
    );
    position_cursor(row, col);
    print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(&line, width), Theme::reset());
}
