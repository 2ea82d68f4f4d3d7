//! UI Render Backend Trait
//!
//! Defines the interface between the UI system and a rasterizer. Each drawn
//! element hands the backend exactly two batches: its skin mesh and its
//! text mesh, each as vertices, triangle indices and a texture.

use super::rendering::{as_bytes, UIVertex};

/// Handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// A backend texture together with its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Backend handle
    pub handle: TextureHandle,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Texture {
    /// Describe a texture the backend has already created
    pub const fn new(handle: TextureHandle, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }
}

/// Backend-agnostic UI rendering interface
pub trait UIRenderBackend {
    /// Render an element's nine-slice skin
    ///
    /// # Arguments
    /// * `texture` - Skin texture, `None` for an untextured skin
    /// * `vertices` - The 16 grid vertices
    /// * `indices` - The 54 triangle indices
    fn render_skin(
        &mut self,
        texture: Option<TextureHandle>,
        vertices: &[UIVertex],
        indices: &[u32],
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Render all text of an element
    ///
    /// # Arguments
    /// * `texture` - Font texture, `None` if the element has no font
    /// * `vertices` - Four vertices per glyph
    /// * `indices` - Six indices per glyph
    fn render_text(
        &mut self,
        texture: Option<TextureHandle>,
        vertices: &[UIVertex],
        indices: &[u32],
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Which batch a recorded draw call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Nine-slice skin
    Skin,
    /// Glyph quads
    Text,
}

/// A draw call captured by [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Batch kind
    pub kind: DrawKind,
    /// Texture the batch was drawn with
    pub texture: Option<TextureHandle>,
    /// Submitted vertices
    pub vertices: Vec<UIVertex>,
    /// Submitted indices
    pub indices: Vec<u32>,
}

/// Headless backend that stores every draw call it receives
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    /// When set, every call fails after being recorded
    pub fail_draws: bool,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder whose draws all report failure
    pub fn failing() -> Self {
        Self { fail_draws: true, ..Self::default() }
    }

    /// Calls recorded so far
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Recorded calls of one kind
    pub fn calls_of(&self, kind: DrawKind) -> impl Iterator<Item = &DrawCall> + '_ {
        self.calls.iter().filter(move |call| call.kind == kind)
    }

    /// Total vertices submitted across all calls
    pub fn vertex_count(&self) -> usize {
        self.calls.iter().map(|call| call.vertices.len()).sum()
    }

    /// Vertex bytes a GPU backend would have uploaded for the recorded calls
    pub fn uploaded_bytes(&self) -> usize {
        self.calls.iter().map(|call| as_bytes(&call.vertices).len()).sum()
    }

    /// Forget recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(
        &mut self,
        kind: DrawKind,
        texture: Option<TextureHandle>,
        vertices: &[UIVertex],
        indices: &[u32],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.calls.push(DrawCall {
            kind,
            texture,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
        if self.fail_draws {
            return Err(format!("{kind:?} draw rejected").into());
        }
        Ok(())
    }
}

impl UIRenderBackend for RecordingBackend {
    fn render_skin(
        &mut self,
        texture: Option<TextureHandle>,
        vertices: &[UIVertex],
        indices: &[u32],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.record(DrawKind::Skin, texture, vertices, indices)
    }

    fn render_text(
        &mut self,
        texture: Option<TextureHandle>,
        vertices: &[UIVertex],
        indices: &[u32],
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.record(DrawKind::Text, texture, vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_keeps_call_order() {
        let mut backend = RecordingBackend::new();
        let v = [UIVertex::default(); 2];
        backend.render_skin(Some(TextureHandle(3)), &v, &[0, 1]).unwrap();
        backend.render_text(None, &v[..1], &[]).unwrap();

        assert_eq!(backend.calls().len(), 2);
        assert_eq!(backend.calls()[0].kind, DrawKind::Skin);
        assert_eq!(backend.calls()[0].texture, Some(TextureHandle(3)));
        assert_eq!(backend.calls_of(DrawKind::Text).count(), 1);
        assert_eq!(backend.vertex_count(), 3);
        assert_eq!(backend.uploaded_bytes(), 3 * std::mem::size_of::<UIVertex>());

        backend.clear();
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_failing_backend_still_records() {
        let mut backend = RecordingBackend::failing();
        assert!(backend.render_skin(None, &[], &[]).is_err());
        assert_eq!(backend.calls().len(), 1);
    }
}
