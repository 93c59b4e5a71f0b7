use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = state
        .tabs
        .iter()
        .map(|tab| {
            if tab.view.load_state().loading {
                let frame_idx = (state.tick_count % SPINNER.len() as u64) as usize;
                Line::from(format!(" {} {} ", tab.title, SPINNER[frame_idx]))
            } else {
                Line::from(format!(" {} ", tab.title))
            }
        })
        .collect();

    if titles.is_empty() {
        frame.render_widget(Paragraph::new(" no tables ").style(Theme::muted()), area);
        return;
    }

    let tabs = Tabs::new(titles)
        .select(state.active_tab)
        .style(Theme::tab_inactive())
        .highlight_style(Theme::tab_active())
        .divider(Span::styled("│", Theme::muted()));
    frame.render_widget(tabs, area);
}
