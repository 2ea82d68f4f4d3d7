//! Element builders
//!
//! A [`UIElementBuilder`] collects everything an element needs and is
//! consumed by [`UIContext::build_element`] or [`UIContext::create_element`].
//!
//! [`UIContext::build_element`]: super::UIContext::build_element
//! [`UIContext::create_element`]: super::UIContext::create_element

use super::backend::{Texture, TextureHandle};
use super::element::{ElementFlags, UIElement};
use super::{UIError, UIResult};
use crate::config::UIConfig;
use crate::foundation::math::PixelRect;
use crate::registry::Registry;
use crate::text::{FontAtlas, FontError, TextLayout};

/// Parameters for one text object of an element
#[derive(Debug, Clone, PartialEq)]
pub struct TextObjectBuilder {
    /// Key within the element; defaults to the text
    pub id: String,
    /// Text to lay out
    pub text: String,
    /// Horizontal offset from the element's left edge
    pub x: i32,
    /// Vertical offset from the element's top edge
    pub y: i32,
    /// Desired point size
    pub size: f32,
}

/// Describes an element before it is created
#[derive(Debug, Clone)]
pub struct UIElementBuilder {
    name: Option<String>,
    relative: [f32; 4],
    absolute: [i32; 4],
    flags: ElementFlags,
    skin: Option<Texture>,
    font: Option<TextureHandle>,
    text_objects: Vec<TextObjectBuilder>,
}

impl UIElementBuilder {
    /// Start describing an element with an optional skin texture
    ///
    /// Elements start inactive with zero relative dimensions.
    pub fn new(skin: Option<Texture>) -> Self {
        Self {
            name: None,
            relative: [0.0; 4],
            absolute: [0; 4],
            flags: ElementFlags::empty(),
            skin,
            font: None,
            text_objects: Vec::new(),
        }
    }

    /// Place the element in absolute pixels; `None` keeps the current value
    pub fn with_absolute_dimensions(
        mut self,
        x: Option<i32>,
        y: Option<i32>,
        w: Option<i32>,
        h: Option<i32>,
    ) -> Self {
        for (slot, value) in self.absolute.iter_mut().zip([x, y, w, h]) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self.flags.insert(ElementFlags::ABSOLUTE);
        self
    }

    /// Place the element as fractions of the screen; `None` keeps the current value
    ///
    /// Ignored at creation if absolute dimensions were also set.
    pub fn with_relative_dimensions(
        mut self,
        x: Option<f32>,
        y: Option<f32>,
        w: Option<f32>,
        h: Option<f32>,
    ) -> Self {
        for (slot, value) in self.relative.iter_mut().zip([x, y, w, h]) {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self
    }

    /// Set the registry name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the skin texture
    pub fn with_texture(mut self, skin: Option<Texture>) -> Self {
        self.skin = skin;
        self
    }

    /// Use `font` for this element's text instead of the context's font texture
    pub fn with_font(mut self, font: Texture) -> Self {
        self.font = Some(font.handle);
        self
    }

    /// Choose whether the element starts active
    pub fn with_active(mut self, active: bool) -> Self {
        self.flags.set(ElementFlags::ACTIVE, active);
        self
    }

    /// Add a text object at `(x, y)` inside the element
    ///
    /// Without an `id` the text itself is used as the key.
    pub fn add_text_object(
        mut self,
        text: &str,
        x: i32,
        y: i32,
        size: f32,
        id: Option<&str>,
    ) -> Self {
        self.text_objects.push(TextObjectBuilder {
            id: id.unwrap_or(text).to_string(),
            text: text.to_string(),
            x,
            y,
            size,
        });
        self
    }

    /// Name set so far
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Text objects added so far
    pub fn text_objects(&self) -> &[TextObjectBuilder] {
        &self.text_objects
    }

    /// Placement in pixels on a `screen_width` x `screen_height` screen
    pub fn resolve_rect(&self, screen_width: u32, screen_height: u32) -> PixelRect {
        if self.flags.contains(ElementFlags::ABSOLUTE) {
            let [x, y, w, h] = self.absolute;
            PixelRect::new(x, y, w, h)
        } else {
            let [x, y, w, h] = self.relative;
            let sw = screen_width as f32;
            let sh = screen_height as f32;
            PixelRect::new(
                (x * sw) as i32,
                (y * sh) as i32,
                (w * sw) as i32,
                (h * sh) as i32,
            )
        }
    }

    /// Realize the element, laying out its text with `atlas`
    pub(crate) fn build(
        self,
        atlas: Option<&FontAtlas>,
        default_font: Option<TextureHandle>,
        config: &UIConfig,
    ) -> UIResult<UIElement> {
        if self.text_objects.len() > config.max_text_objects {
            return Err(UIError::TooManyTextObjects {
                count: self.text_objects.len(),
                max: config.max_text_objects,
            });
        }

        let rect = self.resolve_rect(config.screen_width, config.screen_height);
        let (skin_step_x, skin_step_y) = self
            .skin
            .map_or((0, 0), |skin| ((skin.width / 3) as i32, (skin.height / 3) as i32));

        let mut text_objects =
            Registry::with_policy(config.text_registry_capacity, config.growth_policy);
        if !self.text_objects.is_empty() {
            let atlas = atlas.ok_or(FontError::NoFontLoaded)?;
            let layout = TextLayout::new(atlas);
            for params in &self.text_objects {
                if params.id.is_empty() {
                    return Err(UIError::EmptyTextObjectId);
                }
                let text = layout.layout(&params.id, &params.text, params.size, params.x, params.y)?;
                text_objects.insert(text)?;
            }
        }

        Ok(UIElement {
            name: self.name.unwrap_or_default(),
            rect,
            flags: self.flags,
            skin: self.skin.map(|skin| skin.handle),
            skin_step_x,
            skin_step_y,
            font: self.font.or(default_font),
            text_objects,
        })
    }
}
