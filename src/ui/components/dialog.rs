//! Overlays drawn on top of the screen: the delete confirmation, the detail
//! modal and the product form.

use crate::ui::helpers::{box_line, draw_box, wrap, Rect};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmInfo, FormInfo, ModalInfo};

const CONFIRM_WIDTH: usize = 56;
const MODAL_WIDTH: usize = 72;
const FORM_WIDTH: usize = 64;
/// Label column of the product form, colon included.
const FORM_LABEL_WIDTH: usize = 14;

/// Renders the delete confirmation centered in the pane.
pub fn render_confirm(confirm: &ConfirmInfo, theme: &Theme, rows: usize, cols: usize) {
    let sizing = Rect::centered(CONFIRM_WIDTH, rows, rows, cols);
    let body = wrap(&confirm.body, sizing.inner_width());
    // Border, blank, body, blank, hint, border.
    let rect = Rect::centered(CONFIRM_WIDTH, body.len() + 5, rows, cols);

    draw_box(rect, &confirm.title, &theme.colors.danger, theme);
    let text = Theme::fg(&theme.colors.text_normal);
    for (idx, line) in body.iter().enumerate() {
        box_line(rect, 2 + idx, line, &text);
    }
    box_line(rect, rect.height.saturating_sub(2), &confirm.hint, &Theme::fg(&theme.colors.text_dim));
}

/// Renders the detail modal centered in the pane.
///
/// Sections that do not fit are cut off at the bottom; the hint line is
/// always shown.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let mut lines: Vec<(String, bool)> = vec![(modal.subtitle.clone(), false), (String::new(), false)];
    for (title, body) in &modal.sections {
        lines.push((title.clone(), true));
        lines.extend(body.iter().map(|line| (format!("  {line}"), false)));
        lines.push((String::new(), false));
    }

    // Border, lines, hint, border.
    let rect = Rect::centered(MODAL_WIDTH, lines.len() + 3, rows, cols);
    draw_box(rect, &modal.title, &theme.colors.accent, theme);

    let heading = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    let text = Theme::fg(&theme.colors.text_normal);
    let last_body_line = rect.height.saturating_sub(3);
    for (idx, (line, is_heading)) in lines.iter().enumerate() {
        let at = idx + 1;
        if at > last_body_line {
            break;
        }
        box_line(rect, at, line, if *is_heading { &heading } else { &text });
    }
    box_line(rect, rect.height.saturating_sub(2), &modal.hint, &Theme::fg(&theme.colors.text_dim));
}

/// Renders the product form centered in the pane.
///
/// Each field takes one line, followed by its validation message when it has
/// one. The focused field is marked with `>` and shows a cursor.
pub fn render_form(form: &FormInfo, theme: &Theme, rows: usize, cols: usize) {
    let text = Theme::fg(&theme.colors.text_normal);
    let focused = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    let danger = Theme::fg(&theme.colors.danger);

    let mut lines: Vec<(String, &str)> = Vec::new();
    if let Some(error) = &form.error {
        lines.push((error.clone(), &danger));
        lines.push((String::new(), &text));
    }
    for field in &form.fields {
        let marker = if field.focused { ">" } else { " " };
        let value = match (field.choice, field.focused) {
            (true, true) => format!("< {} >", field.value),
            (false, true) => format!("{}_", field.value),
            _ => field.value.clone(),
        };
        let label = format!("{}:", field.label);
        let line = format!("{marker} {label:<width$} {value}", width = FORM_LABEL_WIDTH);
        lines.push((line, if field.focused { &focused } else { &text }));
        if let Some(error) = field.error {
            lines.push((format!("  {:width$} {error}", "", width = FORM_LABEL_WIDTH), &danger));
        }
    }

    // Border, blank, lines, blank, hint, border.
    let rect = Rect::centered(FORM_WIDTH, lines.len() + 5, rows, cols);
    let border = if form.saving { &theme.colors.text_dim } else { &theme.colors.accent };
    draw_box(rect, &form.title, border, theme);

    let last_body_line = rect.height.saturating_sub(3);
    for (idx, (line, style)) in lines.iter().enumerate() {
        let at = idx + 2;
        if at > last_body_line {
            break;
        }
        box_line(rect, at, line, style);
    }
    box_line(rect, rect.height.saturating_sub(2), &form.hint, &Theme::fg(&theme.colors.text_dim));
}
