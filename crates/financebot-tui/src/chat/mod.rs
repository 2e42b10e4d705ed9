//! Chat widget module.
//!
//! The widget is a launcher button pinned to the bottom-right corner and,
//! while the session's panel flag is set, a chat panel stacked above it.

mod launcher;
mod panel;

pub use launcher::ChatLauncher;
pub use panel::ChatPanel;
