//! UI element record
//!
//! An element is a named rectangle with a nine-slice skin and any number of
//! text objects. It is built once from a [`UIElementBuilder`] and afterwards
//! only its active flag changes.
//!
//! [`UIElementBuilder`]: super::UIElementBuilder

use super::backend::TextureHandle;
use crate::foundation::math::PixelRect;
use crate::registry::{Registry, RegistryRecord};
use crate::text::TextObject;

bitflags::bitflags! {
    /// Per-element state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u16 {
        /// The element is drawn
        const ACTIVE = 1 << 0;
        /// Dimensions are absolute pixels rather than screen fractions
        const ABSOLUTE = 1 << 3;
    }
}

/// A placed, skinned UI element
#[derive(Debug, Clone)]
pub struct UIElement {
    pub(crate) name: String,
    pub(crate) rect: PixelRect,
    pub(crate) flags: ElementFlags,
    pub(crate) skin: Option<TextureHandle>,
    pub(crate) skin_step_x: i32,
    pub(crate) skin_step_y: i32,
    pub(crate) font: Option<TextureHandle>,
    pub(crate) text_objects: Registry<TextObject>,
}

impl UIElement {
    /// Name the element is registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placement in screen pixels
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// State bits
    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    /// Skin texture
    pub fn skin(&self) -> Option<TextureHandle> {
        self.skin
    }

    /// Nine-slice border thickness along x and y
    pub fn skin_step(&self) -> (i32, i32) {
        (self.skin_step_x, self.skin_step_y)
    }

    /// Font texture
    pub fn font(&self) -> Option<TextureHandle> {
        self.font
    }

    /// Whether the element is drawn
    pub fn is_active(&self) -> bool {
        self.flags.contains(ElementFlags::ACTIVE)
    }

    /// Start drawing the element
    pub fn activate(&mut self) {
        self.flags.insert(ElementFlags::ACTIVE);
    }

    /// Stop drawing the element
    pub fn deactivate(&mut self) {
        self.flags.remove(ElementFlags::ACTIVE);
    }

    /// Text object registered as `id`
    pub fn text_object(&self, id: &str) -> Option<&TextObject> {
        self.text_objects.find(id)
    }

    /// Text objects in the order they were added
    pub fn iter_text_objects(&self) -> impl Iterator<Item = &TextObject> + '_ {
        self.text_objects.iter_ordered()
    }

    /// Number of text objects
    pub fn text_object_count(&self) -> usize {
        self.text_objects.len()
    }

    /// Drop every text object
    pub fn release_text_objects(&mut self) {
        self.text_objects.release();
    }
}

impl RegistryRecord for UIElement {
    fn key(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(flags: ElementFlags) -> UIElement {
        UIElement {
            name: "panel".to_string(),
            rect: PixelRect::new(0, 0, 10, 10),
            flags,
            skin: None,
            skin_step_x: 0,
            skin_step_y: 0,
            font: None,
            text_objects: Registry::new(4),
        }
    }

    #[test]
    fn test_flag_bits() {
        assert_eq!(ElementFlags::ACTIVE.bits(), 0b1);
        assert_eq!(ElementFlags::ABSOLUTE.bits(), 0b1000);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut element = bare(ElementFlags::ACTIVE);
        element.deactivate();
        element.deactivate();
        assert!(!element.is_active());
    }

    #[test]
    fn test_activate_then_deactivate_restores_default() {
        let mut element = bare(ElementFlags::default());
        let before = element.flags();
        element.activate();
        assert!(element.is_active());
        element.deactivate();
        assert_eq!(element.flags(), before);
    }

    #[test]
    fn test_activation_keeps_other_bits() {
        let mut element = bare(ElementFlags::ABSOLUTE);
        element.activate();
        element.deactivate();
        assert_eq!(element.flags(), ElementFlags::ABSOLUTE);
    }
}
