//! UI System Module
//!
//! Retained-mode UI elements with nine-slice skins and bitmap-font text.
//!
//! Architecture:
//! - UIContext: owns the font atlas and the element registry
//! - element/builder: element records and the builders that describe them
//! - rendering/: nine-slice meshes, glyph meshes and the frame compositor
//! - backend: the interface a renderer implements to receive draw calls

pub mod backend;
pub mod builder;
pub mod context;
pub mod element;
pub mod rendering;

pub use backend::{DrawCall, DrawKind, RecordingBackend, Texture, TextureHandle, UIRenderBackend};
pub use builder::{TextObjectBuilder, UIElementBuilder};
pub use context::UIContext;
pub use element::{ElementFlags, UIElement};
pub use rendering::{FrameCompositor, UIVertex};

use crate::registry::RegistryError;
use crate::text::FontError;

bitflags::bitflags! {
    /// Options chosen when a context is initialized
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InitFlags: u32 {
        /// The context stores created elements in its own registry
        const MANAGE_MEMORY = 1 << 1;
    }
}

/// Result type for UI operations
pub type UIResult<T> = Result<T, UIError>;

/// Errors that can occur while building or registering elements
#[derive(Debug, thiserror::Error)]
pub enum UIError {
    /// Registered elements need a name
    #[error("Element has no name; call with_name before creating it")]
    MissingName,

    /// A text object was given an empty id
    #[error("Text objects need a non-empty id")]
    EmptyTextObjectId,

    /// More text objects than the context allows per element
    #[error("Element has {count} text objects, at most {max} are allowed")]
    TooManyTextObjects {
        /// Text objects on the builder
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// Registry operation on a context that does not manage memory
    #[error("Context was initialized without MANAGE_MEMORY")]
    UnmanagedContext,

    /// Font loading or text layout failed
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Registry insertion failed
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
