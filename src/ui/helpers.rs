//! Shared rendering utilities.
//!
//! Everything here measures text in `char`s, so multi-byte labels such as the
//! sort arrows never split a code point.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Draws a horizontal rule of `width` cells starting at `(row, col)`.
///
/// Returns the next row.
pub fn render_border(row: usize, col: usize, color: &str, width: usize) -> usize {
    position_cursor(row, col);
    print!("{}{}{}", Theme::fg(color), "─".repeat(width), Theme::reset());
    row + 1
}

/// Number of display cells `text` occupies.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` cells, marking a cut with `…`.
///
/// ```
/// use shopdash::ui::helpers::truncate;
///
/// assert_eq!(truncate("Wireless Headphones", 8), "Wireles…");
/// assert_eq!(truncate("Mug", 8), "Mug");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Truncates or right-pads `text` to exactly `width` cells.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(text_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

/// Centers `text` in `width` cells, truncating if needed.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = text_width(&cut);
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(left + len);
    format!("{}{cut}{}", " ".repeat(left), " ".repeat(right))
}

/// Greedy word wrap to `width` cells. Words longer than a line are truncated.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            text_width(word)
        } else {
            text_width(&current) + 1 + text_width(word)
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&truncate(word, width));
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Screen rectangle, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// A `width` x `height` rectangle centered in a `rows` x `cols` pane,
    /// shrunk to leave a one-cell margin when the pane is too small.
    #[must_use]
    pub fn centered(width: usize, height: usize, rows: usize, cols: usize) -> Self {
        let width = width.min(cols.saturating_sub(2)).max(4);
        let height = height.min(rows.saturating_sub(2)).max(3);
        Self {
            row: rows.saturating_sub(height) / 2 + 1,
            col: cols.saturating_sub(width) / 2 + 1,
            width,
            height,
        }
    }

    /// Width available inside the border, less one cell of padding each side.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(4)
    }
}

/// Draws a filled box with a border in `border_color`.
///
/// `title` is embedded in the top edge. The interior is cleared to the
/// normal text colour.
pub fn draw_box(rect: Rect, title: &str, border_color: &str, theme: &Theme) {
    let inner = rect.width.saturating_sub(2);
    let title = truncate(title, inner.saturating_sub(2));
    let title_cells = if title.is_empty() { 0 } else { text_width(&title) + 2 };

    position_cursor(rect.row, rect.col);
    print!("{}┌", Theme::fg(border_color));
    if title_cells > 0 {
        print!("{}{} {title} {}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
        print!("{}", Theme::fg(border_color));
    }
    print!("{}┐{}", "─".repeat(inner.saturating_sub(title_cells)), Theme::reset());

    for r in 1..rect.height.saturating_sub(1) {
        position_cursor(rect.row + r, rect.col);
        print!(
            "{}│{}{}{}│{}",
            Theme::fg(border_color),
            Theme::fg(&theme.colors.text_normal),
            " ".repeat(inner),
            Theme::fg(border_color),
            Theme::reset()
        );
    }

    position_cursor(rect.row + rect.height.saturating_sub(1), rect.col);
    print!("{}└{}┘{}", Theme::fg(border_color), "─".repeat(inner), Theme::reset());
}

/// Writes one line of text inside `rect`, `line` rows below its top edge.
pub fn box_line(rect: Rect, line: usize, text: &str, style: &str) {
    if line == 0 || line + 1 >= rect.height {
        return;
    }
    position_cursor(rect.row + line, rect.col + 2);
    print!("{style}{}{}", fit(text, rect.inner_width()), Theme::reset());
}
