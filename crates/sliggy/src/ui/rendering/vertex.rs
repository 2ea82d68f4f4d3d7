//! Vertex types for UI rendering

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{white, Vec4};

/// Vertex data for UI rendering with color and texture coordinates
///
/// Layout is `#[repr(C)]` and plain-old-data so a backend can upload a
/// slice directly with [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct UIVertex {
    /// Position in screen pixels
    pub position: [f32; 2],
    /// RGBA vertex color
    pub color: [f32; 4],
    /// Texture coordinates
    pub uv: [f32; 2],
}

impl UIVertex {
    /// Create a vertex
    pub fn new(position: [f32; 2], color: Vec4, uv: [f32; 2]) -> Self {
        Self {
            position,
            color: [color.x, color.y, color.z, color.w],
            uv,
        }
    }

    /// Create an opaque white vertex
    pub fn white(position: [f32; 2], uv: [f32; 2]) -> Self {
        Self::new(position, white(), uv)
    }
}

/// View a vertex slice as raw bytes for upload
pub fn as_bytes(vertices: &[UIVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
