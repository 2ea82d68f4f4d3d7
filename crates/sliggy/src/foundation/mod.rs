//! Foundation module - Core utilities and types
//!
//! - Math types (colors, pixel rectangles)
//! - Logging utilities

pub mod math;
pub mod logging;
