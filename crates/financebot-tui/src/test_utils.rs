//! Test utilities for `financebot-tui` rendering tests.
//!
//! Sessions built here run on a [`ManualClock`] pinned to a fixed wall-clock
//! start, so tests advance time explicitly and time labels are stable.

use std::sync::Arc;

use crate::app::App;
use chrono::{TimeZone, Utc};
use financebot_engine::{ChatConfig, ManualClock, Session};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 30;

/// Create a test terminal with custom dimensions.
pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Create a session with the default config on virtual time, starting at 09:41 UTC.
pub fn create_test_session() -> (Session, Arc<ManualClock>) {
    let start = Utc
        .with_ymd_and_hms(2026, 1, 5, 9, 41, 0)
        .single()
        .expect("valid start time");
    let clock = Arc::new(ManualClock::starting_at(start));
    let session = Session::new(ChatConfig::default(), clock.clone());
    (session, clock)
}

/// Create a test app on virtual time.
pub fn create_test_app() -> (App, Arc<ManualClock>) {
    let (session, clock) = create_test_session();
    (App::with_session(session), clock)
}

/// Render the whole app into a buffer of the given size and return it as text.
pub fn render_app_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    app.render(area, &mut buf);
    buffer_to_string(&buf)
}

/// Convert a buffer to a string, one line per row with trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string_trims_lines() {
        let mut buf = Buffer::empty(ratatui::layout::Rect::new(0, 0, 6, 2));
        buf.set_string(0, 0, "ab", ratatui::style::Style::default());
        buf.set_string(2, 1, "cd", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buf), "ab\n  cd");
    }

    #[test]
    fn test_full_app_draws_through_terminal() {
        let (mut app, _) = create_test_app();
        app.handle_action(crate::event::Action::TogglePanel);
        let mut terminal = create_test_terminal_sized(TEST_WIDTH, TEST_HEIGHT);
        terminal
            .draw(|frame| app.render(frame.area(), frame.buffer_mut()))
            .unwrap();
        let screen = buffer_to_string(terminal.backend().buffer());
        assert!(screen.contains("FinanceBot"));
        assert!(screen.contains("Quick questions:"));
    }
}
