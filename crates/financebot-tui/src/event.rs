//! Event handling for the chat TUI.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A tick event; pending replies are delivered on ticks.
    Tick,
    /// Text pasted into the terminal.
    Paste(String),
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // crossterm polling blocks, so it gets its own thread
        std::thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = time_until_tick(tick_rate, last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let event = match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Paste(text)) => Some(Event::Paste(text)),
                        Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(e) = event {
                        if tx_clone.send(e).is_err() {
                            break;
                        }
                    }
                }

                // Input does not push ticks back.
                if last_tick.elapsed() >= tick_rate {
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// How long to wait for input before the next tick is due.
fn time_until_tick(tick_rate: Duration, since_last_tick: Duration) -> Duration {
    tick_rate.saturating_sub(since_last_tick)
}

/// User intent derived from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePanel,
    ClosePanel,
    Submit,
    PrevSuggestion,
    NextSuggestion,
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    None,
}

/// Convert a key event to an action.
///
/// While the panel is open, printable keys go to the draft; while it is
/// closed, only `q` (quit) does anything.
pub fn key_to_action(key: KeyEvent, panel_open: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Check for Ctrl+C first
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if (ctrl && key.code == KeyCode::Char('t')) || key.code == KeyCode::F(2) {
        return Action::TogglePanel;
    }

    if !panel_open {
        return match key.code {
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    if ctrl {
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => Action::ClosePanel,
        KeyCode::Enter => Action::Submit,
        KeyCode::Up => Action::PrevSuggestion,
        KeyCode::Down => Action::NextSuggestion,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Char(ch) => Action::Insert(ch),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_tick_deadline_ignores_input() {
        let rate = Duration::from_millis(100);
        assert_eq!(time_until_tick(rate, Duration::ZERO), rate);
        assert_eq!(
            time_until_tick(rate, Duration::from_millis(60)),
            Duration::from_millis(40)
        );
        // A burst of keys that outlasts the rate still yields a due tick.
        assert_eq!(time_until_tick(rate, Duration::from_millis(250)), Duration::ZERO);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        assert_eq!(key_to_action(ctrl('c'), false), Action::Quit);
        assert_eq!(key_to_action(ctrl('c'), true), Action::Quit);
    }

    #[test]
    fn test_toggle_keys() {
        assert_eq!(key_to_action(ctrl('t'), false), Action::TogglePanel);
        assert_eq!(key_to_action(ctrl('t'), true), Action::TogglePanel);
        assert_eq!(key_to_action(key(KeyCode::F(2)), true), Action::TogglePanel);
    }

    #[test]
    fn test_closed_panel_shortcuts() {
        assert_eq!(key_to_action(key(KeyCode::Char('q')), false), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('x')), false), Action::None);
        assert_eq!(key_to_action(key(KeyCode::Esc), false), Action::None);
        assert_eq!(key_to_action(key(KeyCode::Enter), false), Action::None);
        assert_eq!(key_to_action(key(KeyCode::Char('c')), false), Action::None);
    }

    #[test]
    fn test_open_panel_types_text() {
        assert_eq!(key_to_action(key(KeyCode::Char('q')), true), Action::Insert('q'));
        assert_eq!(key_to_action(key(KeyCode::Char(' ')), true), Action::Insert(' '));
        assert_eq!(key_to_action(key(KeyCode::Enter), true), Action::Submit);
        assert_eq!(key_to_action(key(KeyCode::Esc), true), Action::ClosePanel);
        assert_eq!(key_to_action(key(KeyCode::Down), true), Action::NextSuggestion);
        assert_eq!(key_to_action(ctrl('x'), true), Action::None);
    }
}
