use crate::app::state::AppState;
use crate::table::paginator::PageWindow;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Page controls: `‹ 1 … 4 5 6 … 10 ›`.
pub fn page_spans(window: &PageWindow) -> Vec<Span<'static>> {
    let arrow = |enabled: bool| if enabled { Theme::page_other() } else { Theme::muted() };
    let page = |p: usize| {
        let style = if p == window.current {
            Theme::page_current()
        } else {
            Theme::page_other()
        };
        Span::styled(format!(" {} ", p), style)
    };

    let mut spans = vec![Span::styled(" ‹ ", arrow(window.has_prev))];
    if window.jump_first {
        spans.push(page(1));
        spans.push(Span::styled(" … ", Theme::muted()));
    }
    spans.extend(window.pages.iter().map(|p| page(*p)));
    if window.jump_last {
        spans.push(Span::styled(" … ", Theme::muted()));
        spans.push(page(window.total));
    }
    spans.push(Span::styled(" › ", arrow(window.has_next)));
    spans
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(tab) = state.active() else {
        return;
    };
    let showing = tab.view.showing();
    let summary = format!(
        " Showing {} to {} of {} results",
        showing.first, showing.last, showing.total
    );

    let controls = Line::from(page_spans(&tab.view.page_window()));
    let controls_width = controls.width() as u16;
    let split = area.width.saturating_sub(controls_width);

    frame.render_widget(
        Paragraph::new(summary).style(Theme::muted()),
        Rect::new(area.x, area.y, split, area.height),
    );
    frame.render_widget(
        Paragraph::new(controls),
        Rect::new(area.x + split, area.y, area.width - split, area.height),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(window: &PageWindow) -> String {
        page_spans(window).iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_window_with_both_ellipses() {
        assert_eq!(text(&PageWindow::new(5, 10)), " ‹  1  …  4  5  6  …  10  › ");
    }

    #[test]
    fn test_single_page() {
        assert_eq!(text(&PageWindow::new(1, 1)), " ‹  1  › ");
    }
}
