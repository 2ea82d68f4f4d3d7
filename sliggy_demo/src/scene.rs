//! Scene description loaded by the demo

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sliggy::config::{Config, UIConfig};
use sliggy::ui::{Texture, TextureHandle, UIElementBuilder};

/// Everything the demo draws
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Context settings
    pub ui: UIConfig,
    /// Font descriptor and its texture
    pub font: FontConfig,
    /// Elements in creation order
    pub elements: Vec<ElementConfig>,
    /// Elements whose active flag flips every frame
    pub blink: Vec<String>,
    /// Frames to draw
    pub frames: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ui: UIConfig::default(),
            font: FontConfig::default(),
            elements: Vec::new(),
            blink: Vec::new(),
            frames: 3,
        }
    }
}

impl Config for SceneConfig {}

/// Bitmap font settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Descriptor path, relative to the scene file
    pub descriptor: PathBuf,
    /// Atlas texture size in pixels
    pub texture_size: (u32, u32),
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            descriptor: PathBuf::from("font.fnt"),
            texture_size: (256, 256),
        }
    }
}

/// Where an element goes on screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Placement {
    /// Pixels
    Absolute {
        /// Left edge
        x: i32,
        /// Top edge
        y: i32,
        /// Width
        w: i32,
        /// Height
        h: i32,
    },
    /// Fractions of the screen
    Relative {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
    },
}

/// Skin texture of an element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinConfig {
    /// Image to read the size from, relative to the scene file
    pub path: Option<PathBuf>,
    /// Size used when there is no image
    pub size: (u32, u32),
}

/// One text object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Text to draw
    pub text: String,
    /// Offset inside the element
    pub offset: (i32, i32),
    /// Point size
    pub size: f32,
    /// Key, defaults to the text
    #[serde(default)]
    pub id: Option<String>,
}

/// One element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementConfig {
    /// Registry name
    pub name: String,
    /// Placement on screen
    pub placement: Placement,
    /// Optional skin
    #[serde(default)]
    pub skin: Option<SkinConfig>,
    /// Start active
    #[serde(default)]
    pub active: bool,
    /// Text objects
    #[serde(default)]
    pub text: Vec<TextConfig>,
}

impl ElementConfig {
    /// Turn the description into a builder; `skin_handle` names the skin texture
    pub fn to_builder(&self, base: &Path, skin_handle: TextureHandle) -> UIElementBuilder {
        let skin = self.skin.as_ref().map(|skin| {
            let (width, height) = skin_size(skin, base);
            Texture::new(skin_handle, width, height)
        });

        let builder = UIElementBuilder::new(skin)
            .with_name(self.name.as_str())
            .with_active(self.active);
        let builder = match self.placement {
            Placement::Absolute { x, y, w, h } => {
                builder.with_absolute_dimensions(Some(x), Some(y), Some(w), Some(h))
            }
            Placement::Relative { x, y, w, h } => {
                builder.with_relative_dimensions(Some(x), Some(y), Some(w), Some(h))
            }
        };

        self.text.iter().fold(builder, |builder, text| {
            builder.add_text_object(&text.text, text.offset.0, text.offset.1, text.size, text.id.as_deref())
        })
    }
}

/// Skin size from the image header, falling back to the configured size
fn skin_size(skin: &SkinConfig, base: &Path) -> (u32, u32) {
    let Some(path) = &skin.path else {
        return skin.size;
    };
    let path = base.join(path);
    match image::image_dimensions(&path) {
        Ok(size) => size,
        Err(e) => {
            log::warn!("Could not read skin size from {}: {}; using {:?}", path.display(), e, skin.size);
            skin.size
        }
    }
}
