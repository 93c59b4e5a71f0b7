use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

fn key_hints(state: &AppState) -> &'static str {
    if state.active().is_some_and(|t| t.view.dialog().is_open()) {
        return "Enter confirm · Esc cancel";
    }
    match state.focus {
        FocusPanel::Search => "Enter/Esc done",
        FocusPanel::Table => "a add · e edit · v view · d delete · / search · q quit",
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let status_style = match &state.status_message {
        Some(msg) if msg.is_error => Style::default().fg(Color::LightRed).bg(Color::DarkGray),
        _ => Theme::status_bar(),
    };
    let status = format!(" {} ", state.status_line());
    let hints = format!(" {} ", key_hints(state));

    // Pad to fill remaining space
    let remaining = (area.width as usize).saturating_sub(status.width() + hints.width());
    let line = Line::from(vec![
        Span::styled(status, status_style),
        Span::styled(" ".repeat(remaining), Theme::status_bar()),
        Span::styled(hints, Style::default().fg(Theme::ACCENT_TEAL).bg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
