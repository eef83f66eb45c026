//! Screen layout for the preview

use ratatui::layout::{Constraint, Layout, Rect};

/// Widest the profile column grows; wider terminals get side margins
pub const MAX_CONTENT_WIDTH: u16 = 72;

/// Rows taken by the profile header
pub const HEADER_HEIGHT: u16 = 5;

/// Screen areas for the preview
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Avatar, name and bio
    pub header: Rect,
    /// Rendered link list
    pub content: Rect,
    /// One-line status bar at the bottom
    pub status: Rect,
}

/// Split the screen into header, content and status bar.
///
/// Header and content share a centered column at most
/// [`MAX_CONTENT_WIDTH`] wide; the status bar spans the full width.
pub fn create(area: Rect) -> ScreenAreas {
    let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    let column = centered_column(body);
    let [header, content] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(column);

    ScreenAreas {
        header,
        content,
        status,
    }
}

/// A horizontally centered column no wider than [`MAX_CONTENT_WIDTH`]
pub fn centered_column(area: Rect) -> Rect {
    let width = area.width.min(MAX_CONTENT_WIDTH);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_are_contiguous() {
        let layout = create(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 23);
        assert_eq!(
            layout.header.height + layout.content.height + layout.status.height,
            24
        );
    }

    #[test]
    fn test_column_is_centered_on_wide_screens() {
        let layout = create(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.content.width, MAX_CONTENT_WIDTH);
        assert_eq!(layout.content.x, (120 - MAX_CONTENT_WIDTH) / 2);
        assert_eq!(layout.status.width, 120);
    }

    #[test]
    fn test_narrow_screen_uses_full_width() {
        let layout = create(Rect::new(0, 0, 40, 12));
        assert_eq!(layout.content.width, 40);
        assert_eq!(layout.content.x, 0);
    }
}
