//! Bitmap-font text
//!
//! Font atlas parsing and text layout.

pub mod font_atlas;
pub mod text_layout;

pub use font_atlas::*;
pub use text_layout::*;
