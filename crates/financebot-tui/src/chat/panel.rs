//! Chat panel widget.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ 🤖 FinanceBot                                 │
//! │    AI Financial Assistant                     │
//! │  Hi! I'm your AI financial                    │
//! │  assistant. How can I help you                │
//! │ 09:41                                         │
//! │                                  What's new?  │
//! │                                         09:42 │
//! │  ●●●   FinanceBot is typing                   │
//! │ Quick questions:                              │
//! │   › What are the latest tax changes?          │
//! │────────────────────────────────────────────── │
//! │ > Type your message...               ⏎ send   │
//! └──────────────────────────────────────────────┘
//! ```

use financebot_engine::{Message, Session};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::text::{max_width, wrap_text};
use crate::ui::theme::{typing_frame, Styles, Symbols};
use crate::ui::widgets::TextInputState;

const HEADER_HEIGHT: u16 = 2;
/// Divider plus the input line.
const INPUT_HEIGHT: u16 = 2;
const INPUT_PLACEHOLDER: &str = "Type your message...";

/// The open chat window: header, message list, suggestions and input.
pub struct ChatPanel<'a> {
    session: &'a Session,
    input: &'a TextInputState,
    selected_suggestion: Option<usize>,
    tick: usize,
}

impl<'a> ChatPanel<'a> {
    /// Create a new chat panel.
    pub fn new(session: &'a Session, input: &'a TextInputState) -> Self {
        Self {
            session,
            input,
            selected_suggestion: None,
            tick: 0,
        }
    }

    /// Highlight a quick question.
    #[must_use]
    pub fn selected_suggestion(mut self, selected: Option<usize>) -> Self {
        self.selected_suggestion = selected;
        self
    }

    /// Animation tick for the typing indicator.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let config = self.session.config();
        let lines = vec![
            Line::from(vec![
                Span::raw(" "),
                Span::raw(Symbols::BOT),
                Span::raw(" "),
                Span::styled(
                    config.assistant_name.clone(),
                    Styles::header().patch(Styles::title()),
                ),
            ]),
            Line::from(Span::raw(format!("    {}", config.assistant_tagline))),
        ];
        Paragraph::new(lines)
            .style(Styles::header())
            .render(area, buf);
    }

    fn render_messages(&self, area: Rect, buf: &mut Buffer) {
        let mut lines = Vec::new();
        for (i, message) in self.session.messages().iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(message_lines(message, area.width));
        }

        if self.session.awaiting_reply() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", typing_frame(self.tick)),
                    Styles::assistant_message(),
                ),
                Span::styled(
                    format!(" {} is typing", self.session.config().assistant_name),
                    Styles::dim(),
                ),
            ]));
        }

        // Keep the newest lines in view.
        let skip = lines.len().saturating_sub(usize::from(area.height));
        let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();
        Paragraph::new(visible)
            .style(Styles::default())
            .render(area, buf);
    }

    fn render_suggestions(&self, suggestions: &[&str], area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(Span::styled("Quick questions:", Styles::dim()))];
        for (i, question) in suggestions.iter().enumerate() {
            let style = if self.selected_suggestion == Some(i) {
                Styles::highlight()
            } else {
                Styles::active()
            };
            lines.push(Line::from(Span::styled(
                format!("  {} {question}", Symbols::SUGGESTION),
                style,
            )));
        }
        Paragraph::new(lines)
            .style(Styles::default())
            .render(area, buf);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let divider = Line::from(Span::styled(
            line::HORIZONTAL.repeat(usize::from(area.width)),
            Styles::border(),
        ));
        buf.set_line(area.x, area.y, &divider, area.width);

        let row = Rect::new(area.x, area.y + 1, area.width, 1);
        let send_width = Symbols::SEND.width() as u16 + 1;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(send_width)])
            .split(row);

        self.input
            .widget()
            .focused(true)
            .placeholder(INPUT_PLACEHOLDER)
            .render(chunks[0], buf);

        // Dimmed until there is something to send.
        let send_style = if self.input.is_blank() {
            Styles::dim()
        } else {
            Styles::highlight()
        };
        Paragraph::new(Span::styled(Symbols::SEND, send_style))
            .style(Styles::default())
            .render(chunks[1], buf);
    }
}

/// Bubble lines plus the time label for one message.
fn message_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let (style, alignment) = if message.is_user() {
        (Styles::user_message(), Alignment::Right)
    } else {
        (Styles::assistant_message(), Alignment::Left)
    };

    let bubble_width = (usize::from(width) * 4 / 5).max(8);
    let wrapped = wrap_text(message.text(), bubble_width.saturating_sub(2));
    let text_width = max_width(&wrapped);

    let mut lines: Vec<Line<'static>> = wrapped
        .into_iter()
        .map(|text| {
            let pad = " ".repeat(text_width.saturating_sub(text.width()));
            Line::from(Span::styled(format!(" {text}{pad} "), style)).alignment(alignment)
        })
        .collect();
    let time = Line::from(Span::styled(message.format_time(), Styles::dim()));
    lines.push(time.alignment(alignment));
    lines
}

impl Widget for ChatPanel<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < HEADER_HEIGHT + INPUT_HEIGHT + 1 {
            // Not enough space - just show input
            if inner.height >= INPUT_HEIGHT {
                let input_area = Rect::new(
                    inner.x,
                    inner.bottom() - INPUT_HEIGHT,
                    inner.width,
                    INPUT_HEIGHT,
                );
                self.render_input(input_area, buf);
            }
            return;
        }

        let suggestions = self.session.suggested_questions();
        let mut suggestion_height = if suggestions.is_empty() {
            0
        } else {
            suggestions.len() as u16 + 1
        };
        if inner.height < HEADER_HEIGHT + INPUT_HEIGHT + suggestion_height + 1 {
            suggestion_height = 0;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(suggestion_height),
                Constraint::Length(INPUT_HEIGHT),
            ])
            .split(inner);

        self.render_header(chunks[0], buf);
        self.render_messages(chunks[1], buf);
        if suggestion_height > 0 {
            self.render_suggestions(suggestions, chunks[2], buf);
        }
        self.render_input(chunks[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_session};
    use std::time::Duration;

    fn render(panel: ChatPanel<'_>, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_panel_shows_header_greeting_and_suggestions() {
        let (session, _) = create_test_session();
        let input = TextInputState::new();

        let screen = render(ChatPanel::new(&session, &input), 48, 24);

        assert!(screen.contains("FinanceBot"));
        assert!(screen.contains("AI Financial Assistant"));
        assert!(screen.contains("Hi! I'm your AI financial"));
        assert!(screen.contains("How can I help you"));
        assert!(screen.contains("Quick questions:"));
        assert!(screen.contains("What are the latest tax changes?"));
        assert!(screen.contains("How should I diversify my portfolio?"));
        assert!(!screen.contains("current market outlook"));
        assert!(screen.contains("Type your message..."));
    }

    #[test]
    fn test_panel_shows_typing_then_reply() {
        let (mut session, clock) = create_test_session();
        let input = TextInputState::new();
        session.submit("tax deadline");

        let screen = render(ChatPanel::new(&session, &input), 48, 24);
        assert!(screen.contains("tax deadline"));
        assert!(screen.contains("FinanceBot is typing"));
        assert!(!screen.contains("Quick questions:"));

        clock.advance(Duration::from_millis(1500));
        session.deliver_due();

        let screen = render(ChatPanel::new(&session, &input), 48, 24);
        assert!(!screen.contains("is typing"));
        assert!(screen.contains("Great question about taxes!"));
    }

    #[test]
    fn test_user_messages_are_right_aligned() {
        let (mut session, _) = create_test_session();
        let input = TextInputState::new();
        session.submit("hello");

        let screen = render(ChatPanel::new(&session, &input), 48, 24);
        let line = screen
            .lines()
            .find(|l| l.contains("hello"))
            .expect("user message rendered");
        // Border is the last column; the bubble ends one column before it.
        assert!(line.trim_end().ends_with("hello │"));
    }

    #[test]
    fn test_newest_messages_stay_visible() {
        let (mut session, clock) = create_test_session();
        let input = TextInputState::new();
        for text in ["first question", "second question", "third question"] {
            session.submit(text);
            clock.advance(Duration::from_millis(1500));
            session.deliver_due();
        }
        session.submit("latest question");

        let screen = render(ChatPanel::new(&session, &input), 48, 16);
        assert!(screen.contains("latest question"));
        assert!(screen.contains("is typing"));
        assert!(!screen.contains("Hi! I'm your AI"));
    }

    #[test]
    fn test_selected_suggestion_renders() {
        let (session, _) = create_test_session();
        let input = TextInputState::new();
        let screen = render(
            ChatPanel::new(&session, &input).selected_suggestion(Some(1)),
            48,
            24,
        );
        assert!(screen.contains("› How should I diversify my portfolio?"));
    }

    #[test]
    fn test_panel_minimum_size() {
        let (session, _) = create_test_session();
        let input = TextInputState::new();
        // Very small area - should not panic
        let screen = render(ChatPanel::new(&session, &input), 12, 4);
        assert!(!screen.is_empty());
    }
}
