//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the scrolling page, a header row floating over
/// its top edge, and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub header_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let page_area = chunks[0];
        Self {
            page_area,
            header_area: Rect::new(page_area.x, page_area.y, page_area.width, page_area.height.min(1)),
            status_area: chunks[1],
        }
    }
}
