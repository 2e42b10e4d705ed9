//! Floating launcher button that opens and closes the chat panel.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::theme::{Styles, Symbols};

/// Round button in the corner of the host area.
///
/// Shows an unread dot on its top-right corner while the panel is closed.
#[derive(Debug, Clone, Copy)]
pub struct ChatLauncher {
    open: bool,
}

impl ChatLauncher {
    pub fn new(open: bool) -> Self {
        Self { open }
    }
}

impl Widget for ChatLauncher {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Styles::border_active())
            .style(Styles::header());
        let inner = block.inner(area);
        block.render(area, buf);

        let glyph = if self.open {
            Symbols::CLOSE
        } else {
            Symbols::CHAT
        };
        Paragraph::new(glyph)
            .alignment(Alignment::Center)
            .style(Styles::header())
            .render(inner, buf);

        if !self.open {
            buf.set_string(area.right() - 1, area.y, Symbols::DOT, Styles::notify());
        }
    }
}
