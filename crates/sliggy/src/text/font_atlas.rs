//! Bitmap font atlas
//!
//! Parses the text descriptor written by bitmap-font atlas tools into a dense
//! array of glyph metrics. Records look like
//!
//! ```text
//! info face="Font2" size=16
//! common lineHeight=20 base=16 scaleW=256 scaleH=256 pages=1
//! chars count=95
//! char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=13 xadvance=4 page=0
//! ```
//!
//! Each line is split on both spaces and `=`, then read as alternating key
//! and value tokens. A quoted value containing a space therefore shifts the
//! pairing for the rest of that line.

use std::path::Path;

use crate::foundation::math::PixelRect;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read the descriptor file
    #[error("Failed to read font descriptor: {0}")]
    Io(#[from] std::io::Error),

    /// A `char` record appeared before the `chars` count, or no count was given
    #[error("Font descriptor has no 'chars count' before its first glyph")]
    MissingCharCount,

    /// No usable `info size` value
    #[error("Font descriptor has no 'info size'")]
    MissingFontSize,

    /// No usable `common scaleW`/`scaleH` values before the glyph records
    #[error("Font descriptor has no 'common scaleW/scaleH' before its glyphs")]
    MissingAtlasDimensions,

    /// A glyph record lacks a required field
    #[error("Line {line}: glyph record is missing '{key}'")]
    MalformedGlyph {
        /// 1-based line number in the descriptor
        line: usize,
        /// Name of the missing field
        key: &'static str,
    },

    /// Glyph codes are not contiguous from the first glyph
    #[error("Glyph {code} maps to index {index}, outside the {count} declared glyphs")]
    GlyphOutOfRange {
        /// Character code from the record
        code: i32,
        /// Index the code maps to
        index: i64,
        /// Declared glyph count
        count: usize,
    },

    /// Requested character has no glyph in the atlas
    #[error("Character {0:?} not found in atlas")]
    GlyphNotFound(char),

    /// Text was laid out before any font was loaded
    #[error("No font atlas has been loaded")]
    NoFontLoaded,
}

/// Layout metrics and atlas UVs of one glyph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetric {
    /// Single-byte character code
    pub code: u8,
    /// Source rectangle in atlas pixels
    pub src: PixelRect,
    /// Horizontal offset from the cursor to the quad
    pub x_offset: i32,
    /// Vertical offset from the line top to the quad
    pub y_offset: i32,
    /// Cursor advance after this glyph
    pub x_advance: i32,
    /// Left U
    pub u_min: f32,
    /// Right U
    pub u_max: f32,
    /// V of the bottom edge (`(y + h) / atlas_height`)
    pub v_min: f32,
    /// V of the top edge (`y / atlas_height`)
    pub v_max: f32,
}

impl GlyphMetric {
    /// Whether this glyph is the word separator
    pub fn is_space(&self) -> bool {
        self.code == b' '
    }
}

/// Glyph metrics of one bitmap font, indexed by character code
///
/// Glyph `c` lives at index `c - first_code`, where `first_code` is the code
/// of the first `char` record. Codes must be contiguous from there.
#[derive(Debug, Clone)]
pub struct FontAtlas {
    glyphs: Vec<Option<GlyphMetric>>,
    first_code: i32,
    point_size: f32,
    atlas_width: f32,
    atlas_height: f32,
    line_height: i32,
}

impl FontAtlas {
    /// Read and parse a descriptor file
    pub fn load_from_file(path: impl AsRef<Path>) -> FontResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let atlas = Self::parse(&text)?;
        log::info!("Loaded font descriptor {}", path.display());
        Ok(atlas)
    }

    /// Parse descriptor text
    pub fn parse(descriptor: &str) -> FontResult<Self> {
        let mut glyphs: Option<Vec<Option<GlyphMetric>>> = None;
        let mut first_code: Option<i32> = None;
        let mut point_size = 0.0f32;
        let mut atlas_width = 0.0f32;
        let mut atlas_height = 0.0f32;
        let mut line_height = 0;

        for (line_idx, line) in descriptor.lines().enumerate() {
            let line_no = line_idx + 1;
            let mut tokens = line.split([' ', '=']).filter(|t| !t.is_empty());
            let Some(tag) = tokens.next() else { continue };
            let fields: Vec<&str> = tokens.collect();
            let pairs = fields.chunks_exact(2).map(|pair| (pair[0], pair[1]));

            match tag {
                "chars" => {
                    let count = pairs
                        .map(|(_, value)| atoi(value))
                        .next()
                        .unwrap_or(0)
                        .max(0) as usize;
                    glyphs = Some(vec![None; count]);
                }
                "info" => {
                    for (key, value) in pairs {
                        if key == "size" {
                            point_size = atof(value);
                        }
                    }
                }
                "common" => {
                    for (key, value) in pairs {
                        match key {
                            "scaleW" => atlas_width = atof(value),
                            "scaleH" => atlas_height = atof(value),
                            "lineHeight" => line_height = atoi(value),
                            _ => {}
                        }
                    }
                }
                "char" => {
                    let glyphs = glyphs.as_mut().ok_or(FontError::MissingCharCount)?;
                    if atlas_width <= 0.0 || atlas_height <= 0.0 {
                        return Err(FontError::MissingAtlasDimensions);
                    }

                    let record = GlyphRecord::from_pairs(pairs, line_no)?;
                    let count = glyphs.len();
                    let first = *first_code.get_or_insert(record.id);
                    let index = i64::from(record.id) - i64::from(first);
                    let slot = usize::try_from(index)
                        .ok()
                        .and_then(|i| glyphs.get_mut(i))
                        .ok_or(FontError::GlyphOutOfRange {
                            code: record.id,
                            index,
                            count,
                        })?;
                    *slot = Some(record.into_metric(atlas_width, atlas_height));
                }
                _ => {}
            }
        }

        let glyphs = glyphs.ok_or(FontError::MissingCharCount)?;
        if point_size == 0.0 {
            return Err(FontError::MissingFontSize);
        }
        if atlas_width <= 0.0 || atlas_height <= 0.0 {
            return Err(FontError::MissingAtlasDimensions);
        }

        let atlas = Self {
            glyphs,
            first_code: first_code.unwrap_or(0),
            point_size,
            atlas_width,
            atlas_height,
            line_height,
        };
        log::info!(
            "Font atlas parsed: {} glyphs ({} defined) at {}pt, atlas {}x{}, line height {}",
            atlas.glyph_count(),
            atlas.defined_glyph_count(),
            atlas.point_size,
            atlas.atlas_width,
            atlas.atlas_height,
            atlas.line_height
        );
        Ok(atlas)
    }

    /// Get glyph metrics for a character code
    pub fn glyph(&self, code: u8) -> FontResult<&GlyphMetric> {
        usize::try_from(i32::from(code) - self.first_code)
            .ok()
            .and_then(|idx| self.glyphs.get(idx))
            .and_then(Option::as_ref)
            .ok_or(FontError::GlyphNotFound(char::from(code)))
    }

    /// Number of glyphs declared by the `chars` record
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of glyphs that had a `char` record
    pub fn defined_glyph_count(&self) -> usize {
        self.glyphs.iter().flatten().count()
    }

    /// Code of the first glyph record
    pub fn first_code(&self) -> i32 {
        self.first_code
    }

    /// Point size the atlas was rendered at
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Atlas texture dimensions in pixels
    pub fn atlas_dimensions(&self) -> (f32, f32) {
        (self.atlas_width, self.atlas_height)
    }

    /// Distance between lines at the atlas point size
    pub fn line_height(&self) -> i32 {
        self.line_height
    }
}

/// Fields of one `char` record
struct GlyphRecord {
    id: i32,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    x_offset: i32,
    y_offset: i32,
    x_advance: i32,
}

impl GlyphRecord {
    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (&'a str, &'a str)>,
        line: usize,
    ) -> FontResult<Self> {
        const KEYS: [&str; 8] = ["id", "x", "y", "width", "height", "xoffset", "yoffset", "xadvance"];
        let mut values: [Option<i32>; 8] = [None; 8];

        for (key, value) in pairs {
            if let Some(pos) = KEYS.iter().position(|k| *k == key) {
                values[pos] = Some(atoi(value));
            }
        }

        let field = |pos: usize| values[pos].ok_or(FontError::MalformedGlyph { line, key: KEYS[pos] });
        Ok(Self {
            id: field(0)?,
            x: field(1)?,
            y: field(2)?,
            width: field(3)?,
            height: field(4)?,
            x_offset: field(5)?,
            y_offset: field(6)?,
            x_advance: field(7)?,
        })
    }

    fn into_metric(self, atlas_width: f32, atlas_height: f32) -> GlyphMetric {
        GlyphMetric {
            code: self.id as u8,
            src: PixelRect::new(self.x, self.y, self.width, self.height),
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            x_advance: self.x_advance,
            u_min: self.x as f32 / atlas_width,
            u_max: (self.x + self.width) as f32 / atlas_width,
            // Flipped: vertex space runs the other way from the atlas rows
            v_min: (self.y + self.height) as f32 / atlas_height,
            v_max: self.y as f32 / atlas_height,
        }
    }
}

/// Leading integer of `s`, 0 if there is none
fn atoi(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.wrapping_mul(10).wrapping_add(i32::from(d - b'0')));
    if negative { value.wrapping_neg() } else { value }
}

/// Leading decimal number of `s`, 0.0 if there is none
fn atof(s: &str) -> f32 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_declared_glyph_count() {
        let atlas = FontAtlas::parse(&fixtures::uniform_font(10)).unwrap();
        assert_eq!(atlas.glyph_count(), 95);
        assert_eq!(atlas.defined_glyph_count(), 95);
        assert_eq!(atlas.first_code(), 32);
        assert_relative_eq!(atlas.point_size(), 16.0);
        assert_eq!(atlas.line_height(), 20);
        assert_eq!(atlas.atlas_dimensions(), (128.0, 128.0));
    }

    #[test]
    fn test_glyph_metrics_and_uvs() {
        let atlas = FontAtlas::parse(&fixtures::uniform_font(10)).unwrap();
        // 'A' is glyph 33 from the first code: column 1, row 2 of the fixture grid
        let glyph = atlas.glyph(b'A').unwrap();
        assert_eq!(glyph.code, b'A');
        assert_eq!(glyph.src, PixelRect::new(8, 20, 6, 10));
        assert_eq!(glyph.x_advance, 10);
        assert_eq!(glyph.y_offset, 1);
        assert_relative_eq!(glyph.u_min, 8.0 / 128.0);
        assert_relative_eq!(glyph.u_max, 14.0 / 128.0);
        assert_relative_eq!(glyph.v_min, 30.0 / 128.0);
        assert_relative_eq!(glyph.v_max, 20.0 / 128.0);
    }

    #[test]
    fn test_v_is_flipped_for_every_glyph() {
        let atlas = FontAtlas::parse(&fixtures::uniform_font(10)).unwrap();
        for code in 32u8..=126 {
            let glyph = atlas.glyph(code).unwrap();
            if glyph.src.h > 0 {
                assert!(glyph.v_min > glyph.v_max, "glyph {code} is not flipped");
            }
        }
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let atlas = FontAtlas::parse(&fixtures::uniform_font(10)).unwrap();
        assert!(matches!(atlas.glyph(b'\n'), Err(FontError::GlyphNotFound('\n'))));
        assert!(matches!(atlas.glyph(200), Err(FontError::GlyphNotFound(_))));
    }

    #[test]
    fn test_char_before_chars_count_fails() {
        let text = "info size=16\ncommon lineHeight=20 scaleW=64 scaleH=64\n\
                    char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5\n";
        assert!(matches!(FontAtlas::parse(text), Err(FontError::MissingCharCount)));
    }

    #[test]
    fn test_empty_descriptor_fails() {
        assert!(matches!(FontAtlas::parse(""), Err(FontError::MissingCharCount)));
    }

    #[test]
    fn test_missing_common_fails() {
        let text = "info size=16\nchars count=1\n\
                    char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5\n";
        assert!(matches!(FontAtlas::parse(text), Err(FontError::MissingAtlasDimensions)));
    }

    #[test]
    fn test_missing_glyph_field_fails() {
        let text = "info size=16\ncommon lineHeight=20 scaleW=64 scaleH=64\nchars count=1\n\
                    char id=65 x=0 y=0 width=4 height=4 yoffset=0 xadvance=5\n";
        match FontAtlas::parse(text) {
            Err(FontError::MalformedGlyph { line, key }) => {
                assert_eq!(line, 4);
                assert_eq!(key, "xoffset");
            }
            other => panic!("expected MalformedGlyph, got {other:?}"),
        }
    }

    #[test]
    fn test_non_contiguous_codes_fail_loudly() {
        let text = "info size=16\ncommon lineHeight=20 scaleW=64 scaleH=64\nchars count=2\n\
                    char id=65 x=0 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5\n\
                    char id=67 x=4 y=0 width=4 height=4 xoffset=0 yoffset=0 xadvance=5\n";
        match FontAtlas::parse(text) {
            Err(FontError::GlyphOutOfRange { code, index, count }) => {
                assert_eq!((code, index, count), (67, 2, 2));
            }
            other => panic!("expected GlyphOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_spaced_face_name_shifts_info_pairs() {
        // "Arial Black" splits into two tokens, so "size" lands in a value position
        let text = "info face=\"Arial Black\" size=32 bold=0\n\
                    common lineHeight=20 scaleW=64 scaleH=64\nchars count=0\n";
        assert!(matches!(FontAtlas::parse(text), Err(FontError::MissingFontSize)));

        let text = "info face=\"Arial\" size=32 bold=0\n\
                    common lineHeight=20 scaleW=64 scaleH=64\nchars count=0\n";
        assert_relative_eq!(FontAtlas::parse(text).unwrap().point_size(), 32.0);
    }

    #[test]
    fn test_crlf_lines_and_unknown_tags() {
        let text = "info size=12\r\ncommon lineHeight=14 scaleW=32 scaleH=32\r\npage id=0 file=\"f.png\"\r\n\
                    chars count=1\r\nchar id=33 x=1 y=2 width=3 height=4 xoffset=-1 yoffset=2 xadvance=4\r\n\
                    kernings count=0\r\n";
        let atlas = FontAtlas::parse(text).unwrap();
        let glyph = atlas.glyph(b'!').unwrap();
        assert_eq!(glyph.x_offset, -1);
        assert_eq!(glyph.x_advance, 4);
        assert_eq!(atlas.line_height(), 14);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = FontAtlas::load_from_file("does/not/exist.fnt");
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn test_atoi_and_atof() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("-3"), -3);
        assert_eq!(atoi("\"7\""), 0);
        assert_eq!(atoi("12abc"), 12);
        assert_relative_eq!(atof("16"), 16.0);
        assert_relative_eq!(atof("-32.5"), -32.5);
        assert_relative_eq!(atof("x"), 0.0);
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let text = "info size=16\ncommon lineHeight=20 scaleW=64 scaleH=64\nchars count=1\n\
                    char id=65 x=0 y=0 width=4 height=4 xoffset=-2147483648 yoffset=99999999999 xadvance=5\n";
        let atlas = FontAtlas::parse(text).unwrap();
        let glyph = atlas.glyph(b'A').unwrap();
        assert_eq!(glyph.x_offset, i32::MIN);
        assert_eq!(glyph.x_advance, 5);
        assert_eq!(atoi("-2147483648"), i32::MIN);
        assert_eq!(atoi("  -12abc"), -12);
    }
}
