//! Sidebar navigation renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavInfo;

/// Width of the expanded sidebar, separator excluded.
pub const NAV_WIDTH: usize = 16;
/// Width of the collapsed sidebar: hotkeys only.
pub const NAV_WIDTH_COLLAPSED: usize = 4;

/// Renders the screen list from `top` down to `bottom` and a separator to its
/// right. Returns the number of columns used, separator included.
pub fn render_nav(top: usize, bottom: usize, nav: &NavInfo, theme: &Theme) -> usize {
    let width = if nav.collapsed { NAV_WIDTH_COLLAPSED } else { NAV_WIDTH };

    for (offset, item) in nav.items.iter().enumerate() {
        let row = top + 1 + offset;
        if row > bottom {
            break;
        }
        let label = if nav.collapsed {
            format!(" {} ", item.hotkey)
        } else {
            format!(" {} {}", item.hotkey, item.label)
        };

        position_cursor(row, 1);
        if item.active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", fit(&label, width));
        print!("{}", Theme::reset());
    }

    for row in top..=bottom {
        position_cursor(row, width + 1);
        print!("{}│{}", Theme::fg(&theme.colors.border), Theme::reset());
    }

    width + 1
}
