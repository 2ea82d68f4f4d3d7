//! UI Context
//!
//! Owns everything that used to be process-wide: the font atlas, the
//! element registry and the compositor's scratch buffers. A context lives
//! from [`UIContext::init`] to [`UIContext::quit`].

use std::path::Path;

use super::backend::{TextureHandle, UIRenderBackend};
use super::builder::UIElementBuilder;
use super::element::UIElement;
use super::rendering::FrameCompositor;
use super::{InitFlags, UIError, UIResult};
use crate::config::UIConfig;
use crate::registry::Registry;
use crate::text::FontAtlas;

/// Central UI state
pub struct UIContext {
    config: UIConfig,
    flags: InitFlags,
    font_atlas: Option<FontAtlas>,
    font_texture: Option<TextureHandle>,
    elements: Registry<UIElement>,
    compositor: FrameCompositor,
}

impl UIContext {
    /// Allocate a context for `config`
    pub fn init(config: UIConfig) -> Self {
        let flags = config.flags();
        log::info!(
            "UI context initialized: {}x{} screen, flags {:?}, {} element slots ({:?} growth)",
            config.screen_width,
            config.screen_height,
            flags,
            config.registry_capacity,
            config.growth_policy
        );
        Self {
            elements: Registry::with_policy(config.registry_capacity, config.growth_policy),
            config,
            flags,
            font_atlas: None,
            font_texture: None,
            compositor: FrameCompositor::new(),
        }
    }

    /// Tear the context down, releasing every registered element
    pub fn quit(mut self) {
        let count = self.elements.len();
        self.elements.release();
        log::info!("UI context shut down, released {} elements", count);
    }

    /// Configuration the context was created with
    pub fn config(&self) -> &UIConfig {
        &self.config
    }

    /// Init flags in effect
    pub fn flags(&self) -> InitFlags {
        self.flags
    }

    fn manages_memory(&self) -> bool {
        self.flags.contains(InitFlags::MANAGE_MEMORY)
    }

    /// Parse `descriptor` and make it the active font, replacing any previous one
    ///
    /// `texture` becomes the font texture of elements whose builder sets none.
    pub fn load_font(&mut self, descriptor: &str, texture: Option<TextureHandle>) -> UIResult<()> {
        let atlas = FontAtlas::parse(descriptor)?;
        self.install_font(atlas, texture);
        Ok(())
    }

    /// Read a descriptor file and make it the active font
    pub fn load_font_file(
        &mut self,
        path: impl AsRef<Path>,
        texture: Option<TextureHandle>,
    ) -> UIResult<()> {
        let atlas = FontAtlas::load_from_file(path)?;
        self.install_font(atlas, texture);
        Ok(())
    }

    fn install_font(&mut self, atlas: FontAtlas, texture: Option<TextureHandle>) {
        if self.font_atlas.is_some() {
            log::info!("Replacing font atlas");
        }
        log::debug!("Default font texture: {:?}", texture);
        self.font_atlas = Some(atlas);
        self.font_texture = texture;
    }

    /// Active font atlas
    pub fn font_atlas(&self) -> Option<&FontAtlas> {
        self.font_atlas.as_ref()
    }

    /// Build a caller-owned element
    pub fn build_element(&self, builder: UIElementBuilder) -> UIResult<UIElement> {
        builder.build(self.font_atlas.as_ref(), self.font_texture, &self.config)
    }

    /// Build an element and register it under its name, returning its slot
    ///
    /// Requires [`InitFlags::MANAGE_MEMORY`]. Names are not checked for
    /// uniqueness.
    pub fn create_element(&mut self, builder: UIElementBuilder) -> UIResult<usize> {
        if !self.manages_memory() {
            return Err(UIError::UnmanagedContext);
        }
        if builder.name().map_or(true, str::is_empty) {
            return Err(UIError::MissingName);
        }

        let element = self.build_element(builder)?;
        log::debug!(
            "Creating element '{}' at {:?} with {} text objects",
            element.name(),
            element.rect(),
            element.text_object_count()
        );
        let slot = self.elements.insert(element)?;
        Ok(slot)
    }

    /// Registered element named `name`
    pub fn element(&self, name: &str) -> Option<&UIElement> {
        self.elements.find(name)
    }

    /// Registered element named `name`, for mutation
    pub fn element_mut(&mut self, name: &str) -> Option<&mut UIElement> {
        self.elements.find_mut(name)
    }

    /// Element in registry slot `slot`
    pub fn element_at(&self, slot: usize) -> Option<&UIElement> {
        self.elements.get(slot)
    }

    /// Registered elements in creation order
    pub fn iter_elements(&self) -> impl Iterator<Item = &UIElement> + '_ {
        self.elements.iter_ordered()
    }

    /// Number of registered elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Release the text objects of a registered element
    ///
    /// The element record stays in the registry. Returns whether `name` was found.
    pub fn free_element(&mut self, name: &str) -> bool {
        match self.elements.find_mut(name) {
            Some(element) => {
                element.release_text_objects();
                log::debug!("Freed text objects of element '{}'", name);
                true
            }
            None => false,
        }
    }

    /// Activate a registered element; returns whether it was found
    pub fn activate(&mut self, name: &str) -> bool {
        self.element_mut(name).map(UIElement::activate).is_some()
    }

    /// Deactivate a registered element; returns whether it was found
    pub fn deactivate(&mut self, name: &str) -> bool {
        self.element_mut(name).map(UIElement::deactivate).is_some()
    }

    /// Whether the registered element `name` exists and is active
    pub fn is_active(&self, name: &str) -> bool {
        self.element(name).is_some_and(UIElement::is_active)
    }

    /// Line height of the active font, 0 without one
    pub fn line_height(&self) -> i32 {
        self.font_atlas.as_ref().map_or(0, FontAtlas::line_height)
    }

    /// Draw a caller-owned element
    pub fn draw_element<B: UIRenderBackend + ?Sized>(
        &mut self,
        element: &UIElement,
        backend: &mut B,
    ) -> bool {
        let line_height = self.line_height();
        self.compositor.draw_element(element, line_height, backend)
    }

    /// Draw the registered element `name`; a missing name draws nothing
    pub fn draw_registered<B: UIRenderBackend + ?Sized>(
        &mut self,
        name: &str,
        backend: &mut B,
    ) -> bool {
        let line_height = self.line_height();
        let Self { elements, compositor, .. } = self;
        match elements.find(name) {
            Some(element) => compositor.draw_element(element, line_height, backend),
            None => {
                log::trace!("No element named '{}' to draw", name);
                false
            }
        }
    }

    /// Draw every registered element in creation order, returning how many were drawn
    pub fn draw_all<B: UIRenderBackend + ?Sized>(&mut self, backend: &mut B) -> usize {
        let line_height = self.line_height();
        let Self { elements, compositor, .. } = self;
        elements
            .iter_ordered()
            .filter(|element| compositor.draw_element(element, line_height, backend))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::GrowthPolicy;
    use crate::tests::fixtures;
    use crate::text::FontError;
    use crate::ui::backend::RecordingBackend;

    fn context() -> UIContext {
        let mut ctx = UIContext::init(UIConfig::default());
        ctx.load_font(&fixtures::uniform_font(8), Some(TextureHandle(7))).unwrap();
        ctx
    }

    #[test]
    fn test_create_and_lookup() {
        let mut ctx = context();
        let slot = ctx
            .create_element(UIElementBuilder::new(None).with_name("menu"))
            .unwrap();
        assert_eq!(ctx.element_at(slot).unwrap().name(), "menu");
        assert_eq!(ctx.element("menu").unwrap().font(), Some(TextureHandle(7)));
        assert!(ctx.element("missing").is_none());
        assert_eq!(ctx.element_count(), 1);
    }

    #[test]
    fn test_create_requires_name() {
        let mut ctx = context();
        assert!(matches!(
            ctx.create_element(UIElementBuilder::new(None)),
            Err(UIError::MissingName)
        ));
        assert!(matches!(
            ctx.create_element(UIElementBuilder::new(None).with_name("")),
            Err(UIError::MissingName)
        ));
    }

    #[test]
    fn test_unmanaged_context_only_builds() {
        let mut ctx = UIContext::init(UIConfig::default().with_manage_memory(false));
        assert!(ctx.flags().is_empty());
        let builder = UIElementBuilder::new(None).with_name("owned");
        assert!(matches!(
            ctx.create_element(builder.clone()),
            Err(UIError::UnmanagedContext)
        ));

        let mut element = ctx.build_element(builder.with_active(true)).unwrap();
        let mut backend = RecordingBackend::new();
        assert!(ctx.draw_element(&element, &mut backend));
        element.release_text_objects();
        assert_eq!(ctx.element_count(), 0);
    }

    #[test]
    fn test_activation_by_name() {
        let mut ctx = context();
        ctx.create_element(UIElementBuilder::new(None).with_name("hud")).unwrap();
        assert!(!ctx.is_active("hud"));
        assert!(ctx.activate("hud"));
        assert!(ctx.is_active("hud"));
        assert!(ctx.deactivate("hud"));
        assert!(ctx.deactivate("hud"));
        assert!(!ctx.is_active("hud"));
        assert!(!ctx.activate("nope"));
        assert!(!ctx.is_active("nope"));
    }

    #[test]
    fn test_free_element_keeps_record() {
        let mut ctx = context();
        ctx.create_element(
            UIElementBuilder::new(None)
                .with_name("dialog")
                .add_text_object("Hello there", 4, 4, 16.0, None),
        )
        .unwrap();
        assert_eq!(ctx.element("dialog").unwrap().text_object_count(), 1);

        assert!(ctx.free_element("dialog"));
        assert_eq!(ctx.element("dialog").unwrap().text_object_count(), 0);
        assert!(!ctx.free_element("other"));
    }

    #[test]
    fn test_draw_missing_or_inactive_is_noop() {
        let mut ctx = context();
        ctx.create_element(UIElementBuilder::new(None).with_name("off")).unwrap();
        let mut backend = RecordingBackend::new();
        assert!(!ctx.draw_registered("off", &mut backend));
        assert!(!ctx.draw_registered("ghost", &mut backend));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_draw_all_in_creation_order() {
        let mut ctx = context();
        for (i, name) in ["c", "a", "b"].iter().enumerate() {
            let builder = UIElementBuilder::new(Some(crate::ui::Texture::new(
                TextureHandle(i as u32),
                9,
                9,
            )))
            .with_name(*name)
            .with_active(*name != "a");
            ctx.create_element(builder).unwrap();
        }

        let mut backend = RecordingBackend::new();
        assert_eq!(ctx.draw_all(&mut backend), 2);
        let skins: Vec<_> = backend
            .calls_of(crate::ui::DrawKind::Skin)
            .map(|call| call.texture)
            .collect();
        assert_eq!(skins, [Some(TextureHandle(0)), Some(TextureHandle(2))]);
    }

    #[test]
    fn test_elements_survive_registry_growth() {
        for policy in [GrowthPolicy::Legacy, GrowthPolicy::Rehash] {
            let config = UIConfig::default()
                .with_registry_capacity(2, 2)
                .with_growth_policy(policy);
            let mut ctx = UIContext::init(config);
            let names = ["title", "score", "lives", "pause", "help"];
            for name in names {
                ctx.create_element(UIElementBuilder::new(None).with_name(name)).unwrap();
            }
            for name in names {
                assert_eq!(ctx.element(name).unwrap().name(), name, "{policy:?}");
            }
            ctx.quit();
        }
    }

    #[test]
    fn test_load_font_replaces_atlas() {
        let mut ctx = context();
        assert_eq!(ctx.line_height(), 20);
        let other = fixtures::uniform_font(8).replace("lineHeight=20", "lineHeight=32");
        ctx.load_font(&other, None).unwrap();
        assert_eq!(ctx.line_height(), 32);

        ctx.create_element(UIElementBuilder::new(None).with_name("plain")).unwrap();
        assert_eq!(ctx.element("plain").unwrap().font(), None);
    }

    #[test]
    fn test_bad_font_keeps_previous_atlas() {
        let mut ctx = context();
        let result = ctx.load_font("chars count=1\n", None);
        assert!(matches!(result, Err(UIError::Font(FontError::MissingFontSize))));
        assert!(ctx.font_atlas().is_some());
    }

    #[test]
    fn test_load_missing_font_file() {
        let mut ctx = UIContext::init(UIConfig::default());
        let result = ctx.load_font_file("no/such/font.fnt", None);
        assert!(matches!(result, Err(UIError::Font(FontError::Io(_)))));
        assert!(ctx.font_atlas().is_none());
        assert_eq!(ctx.line_height(), 0);
    }
}
