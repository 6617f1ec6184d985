//! TUI Widgets - UI Components
//!
//! Each widget is a stateless renderer that takes a slice of AppState and
//! produces Ratatui primitives. The rectangle helpers here are shared
//! with touch hit-testing so a tap lands on exactly what was drawn.

mod modal;
mod output;
mod tile_grid;

pub use modal::ModalDialog;
pub use output::{OutputPane, TerminateButton};
pub use tile_grid::TileGrid;

use ratatui::layout::{Constraint, Layout, Rect};

use crate::navigation::GridLayout;
use crate::settings::WINDOW_SIZE;

/// Area the launcher draws into
pub fn viewport(area: Rect, fullscreen: bool) -> Rect {
    if fullscreen {
        area
    } else {
        centered(area, WINDOW_SIZE.0, WINDOW_SIZE.1)
    }
}

/// `width` x `height` rectangle centered in `area`, clipped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cell of every tile, row-major, for `count` tiles in `area`
pub fn tile_rects(area: Rect, count: usize) -> Vec<Rect> {
    let grid = GridLayout::for_tiles(count);
    if count == 0 {
        return Vec::new();
    }

    let rows = Layout::vertical(vec![Constraint::Ratio(1, grid.rows as u32); grid.rows]).split(area);
    rows.iter()
        .flat_map(|row| {
            Layout::horizontal(vec![Constraint::Ratio(1, grid.cols as u32); grid.cols])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

/// Output pane (top two thirds) and terminate button (bottom third)
pub fn execution_layout(area: Rect) -> (Rect, Rect) {
    let chunks =
        Layout::vertical([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)]).split(area);
    (chunks[0], chunks[1])
}

/// Common widget utilities
pub mod utils {
    /// Truncate string with ellipsis, counting characters
    pub fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else if max_len == 0 {
            String::new()
        } else {
            let head: String = s.chars().take(max_len - 1).collect();
            format!("{head}…")
        }
    }

    /// Output line without its line terminator
    pub fn strip_newline(line: &str) -> &str {
        line.trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 0), "");
    }

    #[test]
    fn test_strip_newline() {
        assert_eq!(strip_newline("a\r\n"), "a");
        assert_eq!(strip_newline("b"), "b");
    }

    #[test]
    fn test_window_viewport_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(viewport(area, true), area);
        assert_eq!(viewport(area, false), Rect::new(20, 10, 60, 20));
        assert_eq!(viewport(Rect::new(0, 0, 30, 10), false), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_tile_rects_follow_grid() {
        let rects = tile_rects(Rect::new(0, 0, 30, 20), 5);
        assert_eq!(rects.len(), 5);
        // 2 rows x 3 cols
        assert_eq!(rects[0], Rect::new(0, 0, 10, 10));
        assert_eq!(rects[2], Rect::new(20, 0, 10, 10));
        assert_eq!(rects[3], Rect::new(0, 10, 10, 10));
        assert!(tile_rects(Rect::new(0, 0, 30, 20), 0).is_empty());
    }

    #[test]
    fn test_execution_layout_splits_two_to_one() {
        let (output, button) = execution_layout(Rect::new(0, 0, 60, 21));
        assert_eq!(output.height, 14);
        assert_eq!(button.height, 7);
    }
}
