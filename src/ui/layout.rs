use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub tab_bar: Rect,
    pub header: Rect,
    pub search_bar: Rect,
    pub table: Rect,
    pub pagination: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Length(2), // Title + description
            Constraint::Length(3), // Search
            Constraint::Min(4),    // Table
            Constraint::Length(1), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        tab_bar: chunks[0],
        header: chunks[1],
        search_bar: chunks[2],
        table: chunks[3],
        pagination: chunks[4],
        status_bar: chunks[5],
    }
}

/// Centered popup: `percent_x` of the width (at least `min_w`) and exactly
/// `height` rows, both capped to the available area.
pub fn centered(area: Rect, percent_x: u16, min_w: u16, height: u16) -> Rect {
    let w = (area.width * percent_x / 100)
        .max(min_w)
        .min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}
