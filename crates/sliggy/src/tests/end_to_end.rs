//! Whole-pipeline tests: font load, element creation, drawing

use super::fixtures;
use crate::config::UIConfig;
use crate::foundation::logging;
use crate::ui::{
    DrawKind, RecordingBackend, Texture, TextureHandle, UIContext, UIElementBuilder,
};

const SKIN: TextureHandle = TextureHandle(1);
const FONT: TextureHandle = TextureHandle(2);

fn hi_font() -> String {
    fixtures::font_with(|code| match code {
        b'H' => 6,
        b'i' => 7,
        _ => 10,
    })
}

fn context() -> UIContext {
    logging::init_for_tests();
    let mut ctx = UIContext::init(UIConfig::new(640, 480));
    ctx.load_font(&hi_font(), Some(FONT)).unwrap();
    ctx
}

#[test]
fn test_skinned_element_with_text() {
    let mut ctx = context();
    ctx.create_element(
        UIElementBuilder::new(Some(Texture::new(SKIN, 60, 60)))
            .with_name("greeting")
            .with_absolute_dimensions(Some(0), Some(0), Some(100), Some(100))
            .with_active(true)
            .add_text_object("Hi", 0, 0, 16.0, None),
    )
    .unwrap();

    let mut backend = RecordingBackend::new();
    assert!(ctx.draw_registered("greeting", &mut backend));
    assert_eq!(backend.calls().len(), 2);

    let skin = &backend.calls()[0];
    assert_eq!(skin.kind, DrawKind::Skin);
    assert_eq!(skin.texture, Some(SKIN));
    assert_eq!(skin.vertices.len(), 16);
    assert_eq!(skin.indices.len(), 54);
    let columns: Vec<f32> = skin.vertices[..4].iter().map(|v| v.position[0]).collect();
    assert_eq!(columns, [0.0, 20.0, 80.0, 100.0]);

    let text = &backend.calls()[1];
    assert_eq!(text.kind, DrawKind::Text);
    assert_eq!(text.texture, Some(FONT));
    assert_eq!(text.vertices.len(), 8);
    assert_eq!(text.indices.len(), 12);
    // 'i' starts one 'H' advance to the right
    assert_eq!(text.vertices[5].position[0], 6.0);
}

#[test]
fn test_element_lifecycle() {
    let mut ctx = context();
    ctx.create_element(
        UIElementBuilder::new(None)
            .with_name("toast")
            .with_relative_dimensions(Some(0.25), Some(0.5), Some(0.5), Some(0.25))
            .add_text_object("Saved", 8, 8, 16.0, Some("message")),
    )
    .unwrap();
    assert_eq!(ctx.element("toast").unwrap().rect().x, 160);

    let mut backend = RecordingBackend::new();
    assert!(!ctx.draw_registered("toast", &mut backend));

    ctx.activate("toast");
    assert!(ctx.draw_registered("toast", &mut backend));
    assert_eq!(backend.calls()[1].vertices.len(), 20);

    ctx.deactivate("toast");
    backend.clear();
    assert!(!ctx.draw_registered("toast", &mut backend));
    assert!(backend.calls().is_empty());

    ctx.activate("toast");
    assert!(ctx.free_element("toast"));
    assert!(ctx.draw_registered("toast", &mut backend));
    assert!(backend.calls_of(DrawKind::Text).all(|call| call.vertices.is_empty()));

    ctx.quit();
}

#[test]
fn test_text_wraps_inside_element() {
    let mut ctx = context();
    let font = fixtures::uniform_font(10);
    ctx.load_font(&font, Some(FONT)).unwrap();
    ctx.create_element(
        UIElementBuilder::new(None)
            .with_name("body")
            .with_absolute_dimensions(Some(100), Some(50), Some(55), Some(80))
            .with_active(true)
            .add_text_object("ab cd ef", 0, 0, 16.0, None),
    )
    .unwrap();

    let mut backend = RecordingBackend::new();
    ctx.draw_registered("body", &mut backend);
    let text = &backend.calls()[1];

    // Upper-left corner of each glyph quad
    let corners: Vec<[f32; 2]> = text.vertices.chunks_exact(4).map(|q| q[1].position).collect();
    assert_eq!(corners[3], [130.0, 51.0]);
    assert_eq!(corners[6], [100.0, 71.0]);
    assert_eq!(corners[7], [110.0, 71.0]);
}

#[test]
fn test_many_elements_across_growth() {
    let mut ctx = context();
    for i in 0..100 {
        ctx.create_element(
            UIElementBuilder::new(None)
                .with_name(format!("element_{i}"))
                .with_active(i % 2 == 0),
        )
        .unwrap();
    }
    assert_eq!(ctx.element_count(), 100);
    for i in 0..100 {
        assert!(ctx.element(&format!("element_{i}")).is_some(), "element_{i}");
    }

    let mut backend = RecordingBackend::new();
    assert_eq!(ctx.draw_all(&mut backend), 50);
    assert_eq!(backend.calls().len(), 100);
}
