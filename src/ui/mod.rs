mod dialog;
mod layout;
mod pagination;
mod search_bar;
mod status_bar;
mod tab_bar;
mod table_view;
mod theme;

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    tab_bar::render(frame, app_layout.tab_bar, state);
    render_header(frame, app_layout.header, state);
    search_bar::render(frame, app_layout.search_bar, state);
    table_view::render(frame, app_layout.table, state);
    pagination::render(frame, app_layout.pagination, state);
    status_bar::render(frame, app_layout.status_bar, state);
    dialog::render(frame, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(tab) = state.active() else {
        return;
    };
    let lines = vec![
        Line::from(Span::styled(format!(" {}", tab.title), Theme::title())),
        Line::from(Span::styled(format!(" {}", tab.description), Theme::muted())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handler::handle_event;
    use crate::app::event::AppEvent;
    use crate::config::AppConfig;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_event(state, AppEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))));
    }

    #[test]
    fn test_renders_first_page() {
        let state = AppState::new(AppConfig::default());
        let text = screen(&state);
        assert!(text.contains("Product Table"));
        assert!(text.contains("Showing 1 to 5 of 6 results"));
        assert!(text.contains("Feb 5, 2025"));
        assert!(text.contains("Active"));
    }

    #[test]
    fn test_renders_empty_remote_tab() {
        let mut state = AppState::new(AppConfig::default());
        state.active_tab = 3;
        let text = screen(&state);
        assert!(text.contains("No items found"));
        assert!(text.contains("Showing 0 to 0 of 0 results"));
    }

    #[test]
    fn test_renders_dialog_over_table() {
        let mut state = AppState::new(AppConfig::default());
        press(&mut state, KeyCode::Char('a'));
        press(&mut state, KeyCode::Enter);
        let text = screen(&state);
        assert!(text.contains("Add Item"));
        assert!(text.contains("Name is required"));

        press(&mut state, KeyCode::Esc);
        press(&mut state, KeyCode::Char('d'));
        assert!(screen(&state).contains("Delete Item"));
    }

    #[test]
    fn test_search_without_matches() {
        let mut state = AppState::new(AppConfig::default());
        press(&mut state, KeyCode::Char('/'));
        for c in "zzz".chars() {
            press(&mut state, KeyCode::Char(c));
        }
        assert!(screen(&state).contains("No items match the search"));
    }
}
