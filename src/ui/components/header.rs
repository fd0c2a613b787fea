//! Header component renderer.

use crate::ui::helpers::{center, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar across the full width. Returns the next row.
///
/// The screen title is centered with the subtitle after it; the optional
/// `header_bg` theme colour fills the whole line.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let text = if header.subtitle.is_empty() {
        header.title.clone()
    } else {
        format!("{}· {}", header.title, header.subtitle)
    };

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", center(&text, cols));
    print!("{}", Theme::reset());
    row + 1
}
