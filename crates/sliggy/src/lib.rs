//! # Sliggy
//!
//! A lightweight retained-mode UI element library. Elements are described
//! with a builder, registered under a name, and drawn each frame as a
//! nine-slice skin plus word-wrapped bitmap-font text.
//!
//! ## Features
//!
//! - **Nine-slice skins**: corners keep their size while edges and center stretch
//! - **Bitmap fonts**: parses the text descriptors written by atlas tools
//! - **Look-ahead word wrap**: lines break before a word that would overflow
//! - **Backend agnostic**: meshes are handed to any [`ui::UIRenderBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sliggy::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut ui = UIContext::init(UIConfig::new(800, 600));
//!     ui.load_font_file("assets/font.fnt", Some(TextureHandle(1)))?;
//!
//!     let skin = Texture::new(TextureHandle(2), 48, 48);
//!     ui.create_element(
//!         UIElementBuilder::new(Some(skin))
//!             .with_name("title")
//!             .with_relative_dimensions(Some(0.1), Some(0.1), Some(0.8), Some(0.2))
//!             .with_active(true)
//!             .add_text_object("Hello world", 16, 16, 24.0, None),
//!     )?;
//!
//!     let mut backend = RecordingBackend::new();
//!     ui.draw_registered("title", &mut backend);
//!     ui.quit();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod foundation;
pub mod registry;
pub mod text;
pub mod ui;

#[cfg(test)]
mod tests;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, UIConfig},
        foundation::math::{PixelRect, Vec4},
        registry::{GrowthPolicy, Registry, RegistryError, RegistryRecord},
        text::{FontAtlas, FontError, GlyphMetric, TextLayout, TextObject},
        ui::{
            DrawKind, ElementFlags, FrameCompositor, InitFlags, RecordingBackend, Texture,
            TextureHandle, UIContext, UIElement, UIElementBuilder, UIError, UIRenderBackend,
            UIVertex,
        },
    };
}
