//! Math utilities and types
//!
//! Screen space is measured in pixels with the origin at the top-left corner
//! and +Y pointing down.

pub use nalgebra::Vector4;

/// RGBA color, each channel in 0.0-1.0
pub type Vec4 = Vector4<f32>;

/// Opaque white, the default vertex color for skins and text
pub fn white() -> Vec4 {
    Vec4::new(1.0, 1.0, 1.0, 1.0)
}

/// Axis-aligned rectangle in integer pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

impl PixelRect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// X coordinate of the right edge
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_right_edge() {
        let r = PixelRect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(PixelRect::new(-5, 0, 5, 1).right(), 0);
    }

    #[test]
    fn test_white_is_opaque() {
        let c = white();
        assert_relative_eq!(c.w, 1.0);
        assert_eq!(c, Vec4::new(1.0, 1.0, 1.0, 1.0));
    }
}
