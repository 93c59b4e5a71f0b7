use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(tab) = state.active() else {
        return;
    };
    let focused = state.focus == FocusPanel::Search;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(" Search ")
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let term = tab.view.search_term();
    let line = if term.is_empty() && !focused {
        Line::from(Span::styled("press / to search", Theme::muted()))
    } else {
        Line::from(vec![
            Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
            Span::styled(term, Theme::input_text()),
        ])
    };
    frame.render_widget(Paragraph::new(line), inner);

    if focused && inner.width > 0 {
        // Prompt chevron "❯ " is 2 cells wide
        let cursor_x = inner.x + 2 + term.width() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}
