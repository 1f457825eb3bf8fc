//! Text layout heuristics for replaced shape text.
//!
//! [`format_text_for_shape`] inserts line breaks so a replacement fits the
//! narrow shapes of the template, and [`adjust_font_size`] shrinks the font
//! according to how long the formatted text came out.

pub mod font;
pub mod text;

pub use font::{DEFAULT_FONT_SIZE, adjust_font_size};
pub use text::{ShapeKind, format_text_for_shape};
