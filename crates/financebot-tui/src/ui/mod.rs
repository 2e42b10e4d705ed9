//! UI module for the chat TUI.

pub mod layout;
pub mod theme;
pub mod widgets;
