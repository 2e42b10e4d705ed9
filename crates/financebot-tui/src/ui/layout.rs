//! Layout helpers for the chat TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Launcher button size.
pub const LAUNCHER_WIDTH: u16 = 8;
pub const LAUNCHER_HEIGHT: u16 = 3;

/// Preferred chat panel size; shrinks to fit small terminals.
pub const PANEL_WIDTH: u16 = 48;
pub const PANEL_HEIGHT: u16 = 24;

/// Margin kept between the widget and the edges of the host area.
const EDGE_MARGIN: u16 = 1;

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Area of the launcher button, anchored to the bottom-right corner.
pub fn launcher_area(area: Rect) -> Rect {
    let width = LAUNCHER_WIDTH.min(area.width);
    let height = LAUNCHER_HEIGHT.min(area.height);
    let x = area.right().saturating_sub(width + EDGE_MARGIN).max(area.x);
    let y = area.bottom().saturating_sub(height).max(area.y);
    Rect::new(x, y, width, height)
}

/// Area of the chat panel, stacked on top of the launcher.
pub fn panel_area(area: Rect) -> Rect {
    let launcher = launcher_area(area);
    let available_height = launcher.y.saturating_sub(area.y);
    let width = PANEL_WIDTH.min(area.width.saturating_sub(EDGE_MARGIN * 2).max(1));
    let height = PANEL_HEIGHT.min(available_height);
    let x = area.right().saturating_sub(width + EDGE_MARGIN).max(area.x);
    let y = launcher.y.saturating_sub(height);
    Rect::new(x, y, width, height)
}
