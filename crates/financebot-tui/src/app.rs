//! Application state and update logic for the chat TUI.

use std::sync::Arc;

use financebot_engine::{ChatConfig, Session, SystemClock};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::chat::{ChatLauncher, ChatPanel};
use crate::event::Action;
use crate::ui::layout::{launcher_area, main_layout, panel_area};
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar, TextInputState};

/// Application state.
#[derive(Debug)]
pub struct App {
    /// The chat session hosted by this app.
    pub session: Session,

    /// Draft editor; mirrored into the session on every edit.
    pub input: TextInputState,

    /// Highlighted quick question, if any.
    pub selected_suggestion: Option<usize>,

    /// Tick counter for animations.
    pub tick: usize,

    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app on real time.
    pub fn new(config: ChatConfig) -> Self {
        Self::with_session(Session::new(config, Arc::new(SystemClock)))
    }

    /// Create an app around an existing session.
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            input: TextInputState::new(),
            selected_suggestion: None,
            tick: 0,
            should_quit: false,
        }
    }

    /// Advance animations and deliver any replies that are due.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.deliver_due();
    }

    /// Append replies whose delay has elapsed.
    pub fn deliver_due(&mut self) {
        let delivered = self.session.deliver_due().len();
        if delivered > 0 {
            debug!(delivered, "Replies appended");
        }
    }

    /// Handle an action, then deliver any replies that came due meanwhile.
    pub fn handle_action(&mut self, action: Action) {
        self.apply_action(action);
        self.deliver_due();
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePanel => self.session.toggle_panel(),
            Action::ClosePanel => {
                if self.session.panel_open() {
                    self.session.toggle_panel();
                }
            }
            Action::Submit => self.submit(),
            Action::PrevSuggestion => self.move_suggestion(-1),
            Action::NextSuggestion => self.move_suggestion(1),
            Action::Insert(ch) => self.edit(|input| input.insert(ch)),
            Action::Backspace => self.edit(TextInputState::backspace),
            Action::Delete => self.edit(TextInputState::delete),
            Action::CursorLeft => self.input.move_left(),
            Action::CursorRight => self.input.move_right(),
            Action::CursorHome => self.input.move_home(),
            Action::CursorEnd => self.input.move_end(),
            Action::None => {}
        }
    }

    /// Insert pasted text into the draft; line breaks become spaces.
    pub fn paste(&mut self, text: &str) {
        if !self.session.panel_open() {
            return;
        }
        let flattened: String = text
            .chars()
            .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
            .collect();
        self.edit(|input| input.insert_str(&flattened));
        self.deliver_due();
    }

    /// Render the whole screen.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Styles::default());
        let (body, status_area) = main_layout(area);

        if self.session.panel_open() {
            ChatPanel::new(&self.session, &self.input)
                .selected_suggestion(self.selected_suggestion)
                .tick(self.tick)
                .render(panel_area(body), buf);
        }
        ChatLauncher::new(self.session.panel_open()).render(launcher_area(body), buf);

        let right = if self.session.awaiting_reply() {
            format!("{} is typing", self.session.config().assistant_name)
        } else {
            format!("{} messages", self.session.messages().len())
        };
        let (mode, hints) = if self.session.panel_open() {
            (
                "CHAT",
                vec![
                    KeyHint::new("Enter", "send"),
                    KeyHint::new("↑↓", "suggest"),
                    KeyHint::new("Esc", "close"),
                ],
            )
        } else {
            (
                "HOME",
                vec![KeyHint::new("Ctrl+T", "chat"), KeyHint::new("q", "quit")],
            )
        };
        StatusBar::new(mode)
            .hints(hints)
            .right(&right)
            .render(status_area, buf);
    }

    fn edit(&mut self, f: impl FnOnce(&mut TextInputState)) {
        f(&mut self.input);
        self.selected_suggestion = None;
        self.session.update_draft(self.input.content());
    }

    fn submit(&mut self) {
        let suggestions = self.session.suggested_questions();
        if self.input.is_blank() {
            if let Some(question) = self.selected_suggestion.and_then(|i| suggestions.get(i)) {
                self.session.submit(question);
                self.input.clear();
                self.selected_suggestion = None;
            }
            return;
        }

        let text = self.input.content().to_string();
        if self.session.submit(&text) {
            self.input.clear();
            self.selected_suggestion = None;
        }
    }

    /// Move the quick-question highlight, wrapping at either end.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn move_suggestion(&mut self, delta: isize) {
        let count = self.session.suggested_questions().len();
        if count == 0 || !self.input.is_blank() {
            self.selected_suggestion = None;
            return;
        }

        let next = match self.selected_suggestion {
            None if delta > 0 => 0,
            None => count - 1,
            Some(current) => (current as isize + delta).rem_euclid(count as isize) as usize,
        };
        self.selected_suggestion = Some(next);
    }
}
