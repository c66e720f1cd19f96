//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen layout areas
pub struct DashboardLayout {
    pub sidebar: Rect,
    pub header: Rect,
    pub content: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate the dashboard layout: sidebar on the left, header + content +
/// status line + help bar on the right.
pub fn calculate_dashboard_layout(area: Rect) -> DashboardLayout {
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(area);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(horizontal_chunks[1]);

    DashboardLayout {
        sidebar: horizontal_chunks[0],
        header: right_chunks[0],
        content: right_chunks[1],
        status: right_chunks[2],
        help: right_chunks[3],
    }
}
