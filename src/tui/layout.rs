use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Split-pane layout configuration
pub struct AppLayout {
    pub results_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Create split-pane layout:
    /// - Session list: 60% width (left)
    /// - Preview pane: 40% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Main area (at least 3 rows)
                Constraint::Length(1), // Status bar (1 row)
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[0]);

        Self {
            results_area: horizontal_chunks[0],
            preview_area: horizontal_chunks[1],
            status_area: vertical_chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::new(area);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.results_area.height, 29);
        assert_eq!(layout.preview_area.height, 29);

        assert_eq!(layout.results_area.width, 60);
        assert_eq!(layout.preview_area.width, 40);
    }

    #[test]
    fn test_layout_minimum_height() {
        let area = Rect::new(0, 0, 100, 4);
        let layout = AppLayout::new(area);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.results_area.height, 3);
        assert_eq!(layout.preview_area.height, 3);
    }
}
