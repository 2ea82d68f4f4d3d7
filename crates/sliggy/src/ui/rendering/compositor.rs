//! Frame compositor
//!
//! Turns one element into exactly two draw calls: the nine-slice skin and
//! a single glyph batch holding every text object of the element. Scratch
//! buffers are kept between frames so drawing does not allocate once they
//! have grown to the largest element seen.

use super::nine_slice::{build_nine_slice, NINE_SLICE_INDICES};
use super::UIVertex;
use crate::text::{GlyphMetric, TextObject};
use crate::ui::backend::UIRenderBackend;
use crate::ui::element::UIElement;

/// Indices of one glyph quad, relative to its first vertex
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

/// Builds element meshes and hands them to a backend
#[derive(Debug, Default)]
pub struct FrameCompositor {
    skin_vertices: Vec<UIVertex>,
    text_vertices: Vec<UIVertex>,
    text_indices: Vec<u32>,
}

impl FrameCompositor {
    /// Create a compositor with empty scratch buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `element`, returning whether anything was submitted
    ///
    /// Inactive elements are skipped. Backend failures are logged and the
    /// frame carries on.
    pub fn draw_element<B: UIRenderBackend + ?Sized>(
        &mut self,
        element: &UIElement,
        line_height: i32,
        backend: &mut B,
    ) -> bool {
        if !element.is_active() {
            log::trace!("Skipping inactive element '{}'", element.name());
            return false;
        }

        let rect = element.rect();
        let (step_x, step_y) = element.skin_step();
        build_nine_slice(rect, step_x, step_y, &mut self.skin_vertices);
        if let Err(e) = backend.render_skin(element.skin(), &self.skin_vertices, &NINE_SLICE_INDICES) {
            log::warn!("Skin draw for '{}' failed: {}", element.name(), e);
        }

        self.text_vertices.clear();
        self.text_indices.clear();
        let line_limit = rect.right();
        for text in element.iter_text_objects() {
            append_text(
                text,
                rect.x + text.x_start,
                rect.y + text.y_start,
                line_limit,
                line_height,
                &mut self.text_vertices,
                &mut self.text_indices,
            );
        }
        if let Err(e) = backend.render_text(element.font(), &self.text_vertices, &self.text_indices) {
            log::warn!("Text draw for '{}' failed: {}", element.name(), e);
        }

        true
    }

    /// Skin vertices of the last drawn element
    pub fn skin_vertices(&self) -> &[UIVertex] {
        &self.skin_vertices
    }

    /// Glyph vertices of the last drawn element
    pub fn text_vertices(&self) -> &[UIVertex] {
        &self.text_vertices
    }

    /// Glyph indices of the last drawn element
    pub fn text_indices(&self) -> &[u32] {
        &self.text_indices
    }
}

/// Append one quad per glyph of `text`, wrapped against `line_limit`
fn append_text(
    text: &TextObject,
    origin_x: i32,
    origin_y: i32,
    line_limit: i32,
    line_height: i32,
    vertices: &mut Vec<UIVertex>,
    indices: &mut Vec<u32>,
) {
    vertices.reserve(text.len() * 4);
    indices.reserve(text.len() * 6);
    text.for_each_placed_glyph(origin_x, origin_y, line_limit, line_height, |glyph, x, y| {
        let base = vertices.len() as u32;
        vertices.extend_from_slice(&glyph_quad(glyph, x, y, text));
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    });
}

/// Lower-left, upper-left, lower-right, upper-right corners of a glyph at pen `(x, y)`
fn glyph_quad(glyph: &GlyphMetric, x: i32, y: i32, text: &TextObject) -> [UIVertex; 4] {
    let s = text.scale;
    let left = x as f32 + glyph.x_offset as f32 * s;
    let right = x as f32 + (glyph.src.w + glyph.x_offset) as f32 * s;
    let top = y as f32 + glyph.y_offset as f32 * s;
    let bottom = y as f32 + (glyph.src.h + glyph.y_offset) as f32 * s;

    [
        UIVertex::new([left, bottom], text.color, [glyph.u_min, glyph.v_min]),
        UIVertex::new([left, top], text.color, [glyph.u_min, glyph.v_max]),
        UIVertex::new([right, bottom], text.color, [glyph.u_max, glyph.v_min]),
        UIVertex::new([right, top], text.color, [glyph.u_max, glyph.v_max]),
    ]
}
