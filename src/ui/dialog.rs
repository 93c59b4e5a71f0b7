use crate::app::state::AppState;
use crate::table::dialog::Dialog;
use crate::table::form::{FieldInput, FieldValue, Form, FormField};
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

fn field_value(field: &FormField) -> Span<'static> {
    match (&field.input, &field.value) {
        (FieldInput::Toggle, FieldValue::Flag(on)) => {
            Span::raw(if *on { "[x] Active" } else { "[ ] Inactive" })
        }
        (FieldInput::Choice(_), FieldValue::Text(s)) if s.is_empty() => {
            Span::styled("‹ select ›", Theme::muted())
        }
        (FieldInput::Choice(_), FieldValue::Text(s)) => Span::raw(format!("‹ {} ›", s)),
        (_, FieldValue::Text(s)) => Span::styled(s.clone(), Theme::input_text()),
        (_, FieldValue::Flag(on)) => Span::raw(on.to_string()),
    }
}

fn form_lines(form: &Form, editable: bool) -> Vec<Line<'static>> {
    let label_width = form.fields().iter().map(|f| f.label.len()).max().unwrap_or(0) + 2;
    form.fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = editable && i == form.focus();
            let marker = if focused { "❯ " } else { "  " };
            let label = if field.required && editable {
                format!("{}*", field.label)
            } else {
                field.label.to_string()
            };
            let label_style = if focused { Theme::field_focused() } else { Theme::muted() };
            Line::from(vec![
                Span::styled(marker, Theme::field_focused()),
                Span::styled(format!("{:<width$}", label, width = label_width), label_style),
                field_value(field),
            ])
        })
        .collect()
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(tab) = state.active() else {
        return;
    };
    let dialog = tab.view.dialog();
    if !dialog.is_open() {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let help = match dialog {
        Dialog::Add { form, .. } | Dialog::Edit { form, .. } => {
            lines.extend(form_lines(form, true));
            "Tab/↑↓ move · Space/←→ toggle · Enter save · Esc cancel"
        }
        Dialog::View { form, .. } => {
            lines.extend(form_lines(form, false));
            "Esc close"
        }
        Dialog::Delete { target, label, .. } => {
            lines.push(Line::from(vec![
                Span::raw("Delete "),
                Span::styled(format!("\"{}\"", label), Theme::title()),
                Span::raw(format!(" (#{})?", target)),
            ]));
            lines.push(Line::from(Span::styled("This cannot be undone.", Theme::muted())));
            "y confirm · n cancel"
        }
        Dialog::Closed => return,
    };

    if let Some(status) = dialog.status() {
        if status.pending {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Saving...", Theme::system_message())));
        } else if let Some(err) = &status.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(err.clone(), Theme::error_message())));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(help, Theme::muted())));

    let height = lines.len() as u16 + 2;
    let popup_area = centered(frame.area(), 60, 50, height);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title(tab.view.noun())))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_TEAL))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
