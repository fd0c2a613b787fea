//! Status line notification renderer.

use crate::app::NotificationLevel;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NotificationInfo;

/// Renders the latest notification, or clears the line when there is none.
pub fn render_notification(row: usize, notification: Option<&NotificationInfo>, theme: &Theme, cols: usize) {
    position_cursor(row, 1);
    let Some(notification) = notification else {
        print!("{}", " ".repeat(cols));
        return;
    };

    let (icon, color) = match notification.level {
        NotificationLevel::Info => ("i", &theme.colors.accent),
        NotificationLevel::Success => ("✓", &theme.colors.success),
        NotificationLevel::Error => ("✗", &theme.colors.danger),
    };
    let text = format!(" {icon} {}", notification.message);
    print!("{}{}{}", Theme::fg(color), fit(&text, cols), Theme::reset());
}
