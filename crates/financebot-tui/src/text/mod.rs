//! Text utilities.

mod wrap;

pub use wrap::{max_width, wrap_text};
