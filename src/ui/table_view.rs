use crate::app::state::AppState;
use crate::table::column::Cell;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell as TuiCell, Paragraph, Row, Table, TableState, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `width` terminal cells, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn styled_cell(cell: &Cell, date_format: &str, width: u16) -> TuiCell<'static> {
    let text = truncate(&cell.display(date_format), width as usize);
    match cell.tone() {
        Some(tone) => TuiCell::from(Span::styled(text, Theme::badge(tone))),
        None => TuiCell::from(text),
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(tab) = state.active() else {
        return;
    };
    let view = &tab.view;

    let mut title = format!(" {} ", tab.title);
    if view.is_read_only() {
        title.push_str("(read-only) ");
    }
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let mut body = inner;
    if let Some(err) = &view.load_state().error {
        let banner = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(
            Paragraph::new(format!("Failed to load: {}", err)).style(Theme::error_message()),
            banner,
        );
        body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(1));
    }

    let rows = view.page_rows();
    if rows.is_empty() {
        let message = if view.load_state().loading {
            "Loading..."
        } else if view.record_count() == 0 {
            "No items found"
        } else {
            "No items match the search"
        };
        let empty = Paragraph::new(message)
            .style(Theme::muted())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let mid = Rect::new(body.x, body.y + body.height / 2, body.width, 1.min(body.height));
        frame.render_widget(empty, mid);
        return;
    }

    let headers = view.headers();
    let date_format = state.config.ui.date_format.as_str();
    let header = Row::new(
        headers
            .iter()
            .map(|(name, width)| TuiCell::from(truncate(name, *width as usize))),
    )
    .style(Theme::header_row());
    let widths: Vec<Constraint> = headers.iter().map(|(_, w)| Constraint::Length(*w)).collect();

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(
                row.cells
                    .iter()
                    .zip(&headers)
                    .map(|(cell, (_, width))| styled_cell(cell, date_format, *width)),
            )
        })
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Theme::selected_row())
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(tab.selected));
    frame.render_stateful_widget(table, body, &mut table_state);
}
