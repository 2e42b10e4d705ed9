//! Theme and styling definitions for the chat widget.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(15, 23, 42);
    pub const FG: Color = Color::Rgb(226, 232, 240);
    pub const DIM: Color = Color::Rgb(148, 163, 184);

    // Brand blue
    pub const ACCENT: Color = Color::Rgb(37, 99, 235);
    pub const ACCENT_LIGHT: Color = Color::Rgb(147, 197, 253);

    // Message bubbles
    pub const USER_BUBBLE: Color = Color::Rgb(37, 99, 235);
    pub const ASSISTANT_BUBBLE: Color = Color::Rgb(51, 65, 85);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(30, 41, 59);
    pub const STATUS_KEY_BG: Color = Color::Rgb(29, 78, 216);

    // Unread indicator
    pub const NOTIFY: Color = Color::Rgb(239, 68, 68);

    // Border colors
    pub const BORDER: Color = Color::Rgb(71, 85, 105);
    pub const BORDER_ACTIVE: Color = Color::Rgb(59, 130, 246);
}

/// Glyphs used by the widget.
pub struct Symbols;

impl Symbols {
    pub const BOT: &'static str = "🤖";
    pub const CHAT: &'static str = "💬";
    pub const CLOSE: &'static str = "✕";
    pub const DOT: &'static str = "●";
    pub const SEND: &'static str = "⏎ send";
    pub const SUGGESTION: &'static str = "›";
    pub const TYPING: [&'static str; 4] = ["●  ", "●● ", "●●●", " ●●"];
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT_LIGHT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT_LIGHT).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::FG)
            .add_modifier(Modifier::BOLD)
    }

    /// Panel header bar.
    pub fn header() -> Style {
        Style::default().fg(Color::White).bg(Palette::ACCENT)
    }

    /// Text written by the user.
    pub fn user_message() -> Style {
        Style::default().fg(Color::White).bg(Palette::USER_BUBBLE)
    }

    /// Text written by the assistant.
    pub fn assistant_message() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::ASSISTANT_BUBBLE)
    }

    /// Unread notification dot.
    pub fn notify() -> Style {
        Style::default()
            .fg(Palette::NOTIFY)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Typing indicator frame for the given tick.
pub fn typing_frame(tick: usize) -> &'static str {
    Symbols::TYPING[tick % Symbols::TYPING.len()]
}
