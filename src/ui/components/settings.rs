//! Settings screen renderer.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SettingsInfo;

const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 32;

/// One line per setting: label, current value, and the key that changes it.
pub fn render_settings(top: usize, col: usize, width: usize, info: &SettingsInfo, theme: &Theme) {
    for (offset, entry) in info.entries.iter().enumerate() {
        let row = top + 1 + offset * 2;
        position_cursor(row, col);
        print!("{}{}", Theme::fg(&theme.colors.text_dim), fit(&entry.label, LABEL_WIDTH));
        print!("{}{}{}", Theme::bold(), Theme::fg(&theme.colors.accent), fit(&entry.value, VALUE_WIDTH));
        print!("{}", Theme::reset());
        if !entry.key_hint.is_empty() {
            let hint = format!("press {}", entry.key_hint);
            let room = width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH);
            print!("{}{}{}", Theme::fg(&theme.colors.text_dim), fit(&hint, room), Theme::reset());
        }
    }
}
