//! Text layout engine
//!
//! Turns a string into a [`TextObject`]: a by-value copy of every glyph's
//! metrics plus the pixel width of each space-separated word. Line breaking
//! happens when the object is placed, using those word widths to look one
//! word ahead.

use super::{FontAtlas, FontResult, GlyphMetric};
use crate::foundation::math::{white, Vec4};
use crate::registry::RegistryRecord;

/// A laid-out run of text owned by an element
#[derive(Debug, Clone, PartialEq)]
pub struct TextObject {
    /// Key within the owning element's text registry
    pub id: String,
    /// One metric copy per character
    pub glyphs: Vec<GlyphMetric>,
    /// Scaled width of each word; the last entry is never filled in
    pub word_widths: Vec<i32>,
    /// Desired size divided by the atlas point size
    pub scale: f32,
    /// Horizontal start relative to the owning element
    pub x_start: i32,
    /// Vertical start relative to the owning element
    pub y_start: i32,
    /// Vertex color of every glyph
    pub color: Vec4,
}

impl TextObject {
    /// Length in characters
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Number of space-separated words, counting empty ones
    pub fn word_count(&self) -> usize {
        self.word_widths.len()
    }

    /// Walk the glyphs, calling `visit` with each glyph and its top-left pen position
    ///
    /// The pen starts at `(origin_x, origin_y)`. After each glyph the pen
    /// moves right by the scaled advance. After a space the next word
    /// begins, and the pen returns to `origin_x` one scaled line down if
    /// it is already past `line_limit` or the next word's width would carry
    /// it past. The check only runs after spaces, so a single word never
    /// breaks and can overflow the limit.
    pub fn for_each_placed_glyph(
        &self,
        origin_x: i32,
        origin_y: i32,
        line_limit: i32,
        line_height: i32,
        mut visit: impl FnMut(&GlyphMetric, i32, i32),
    ) {
        let line_step = (line_height as f32 * self.scale) as i32;
        let mut pen_x = origin_x;
        let mut pen_y = origin_y;
        let mut word = 0usize;

        for glyph in &self.glyphs {
            visit(glyph, pen_x, pen_y);
            pen_x += (glyph.x_advance as f32 * self.scale) as i32;

            if glyph.is_space() {
                word += 1;
                let next_width = self.word_widths.get(word).copied().unwrap_or(0);
                if pen_x > line_limit || pen_x + next_width > line_limit {
                    pen_x = origin_x;
                    pen_y += line_step;
                }
            }
        }
    }
}

impl RegistryRecord for TextObject {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Text layout engine that converts strings to text objects
pub struct TextLayout<'a> {
    /// Font atlas for glyph lookup
    font_atlas: &'a FontAtlas,
}

impl<'a> TextLayout<'a> {
    /// Create a new text layout engine
    pub fn new(font_atlas: &'a FontAtlas) -> Self {
        Self { font_atlas }
    }

    /// Lay out `raw_text` at `desired_size`, starting at `(x, y)` inside its element
    ///
    /// Every byte must have a glyph in the atlas.
    pub fn layout(
        &self,
        id: &str,
        raw_text: &str,
        desired_size: f32,
        x: i32,
        y: i32,
    ) -> FontResult<TextObject> {
        let scale = desired_size / self.font_atlas.point_size();

        let bytes = raw_text.as_bytes();
        let word_count = bytes.iter().filter(|&&b| b == b' ').count() + 1;

        let mut glyphs = Vec::with_capacity(bytes.len());
        let mut word_widths = vec![0i32; word_count];
        let mut word = 0usize;
        let mut word_width = 0i32;

        for &byte in bytes {
            let glyph = *self.font_atlas.glyph(byte)?;
            if byte == b' ' {
                word_widths[word] = word_width;
                word += 1;
                word_width = 0;
            } else {
                word_width += (glyph.x_advance as f32 * scale) as i32;
            }
            glyphs.push(glyph);
        }

        Ok(TextObject {
            id: id.to_string(),
            glyphs,
            word_widths,
            scale,
            x_start: x,
            y_start: y,
            color: white(),
        })
    }
}
