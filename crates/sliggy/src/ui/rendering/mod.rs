//! UI rendering module
//!
//! Backend-agnostic mesh generation for elements

pub mod compositor;
pub mod nine_slice;
pub mod vertex;

pub use compositor::FrameCompositor;
pub use nine_slice::{build_nine_slice, grid_offsets, NINE_SLICE_INDICES, NINE_SLICE_VERTEX_COUNT};
pub use vertex::{as_bytes, UIVertex};
