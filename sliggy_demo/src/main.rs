//! Sliggy demo application
//!
//! Loads a scene description, builds its elements and draws a few frames
//! against a recording backend, logging what each frame submitted.
//!
//! Usage: `sliggy_demo [scene.ron|scene.toml] [out.ron|out.toml]`
//!
//! With a second path the loaded scene, defaults filled in, is written back
//! out in that file's format.

mod scene;

use std::path::Path;

use scene::SceneConfig;
use sliggy::config::Config;
use sliggy::ui::{DrawKind, RecordingBackend, TextureHandle, UIContext};

const DEFAULT_SCENE: &str = "sliggy_demo/assets/scene.ron";
const FONT_TEXTURE: TextureHandle = TextureHandle(1);

fn run(scene_path: &str, dump_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let scene = SceneConfig::load_from_file(scene_path)?;
    let base = Path::new(scene_path).parent().unwrap_or_else(|| Path::new("."));
    log::info!(
        "Loaded scene {} ({} elements, {} frames)",
        scene_path,
        scene.elements.len(),
        scene.frames
    );
    if let Some(dump_path) = dump_path {
        scene.save_to_file(dump_path)?;
        log::info!("Wrote resolved scene to {}", dump_path);
    }

    let mut ui = UIContext::init(scene.ui.clone());
    ui.load_font_file(base.join(&scene.font.descriptor), Some(FONT_TEXTURE))?;
    log::info!(
        "Font texture {:?} is {}x{}",
        FONT_TEXTURE,
        scene.font.texture_size.0,
        scene.font.texture_size.1
    );

    for (i, element) in scene.elements.iter().enumerate() {
        let skin_handle = TextureHandle(i as u32 + 2);
        ui.create_element(element.to_builder(base, skin_handle))?;
    }

    let mut backend = RecordingBackend::new();
    for frame in 0..scene.frames {
        backend.clear();
        let drawn = ui.draw_all(&mut backend);
        let glyphs: usize = backend
            .calls_of(DrawKind::Text)
            .map(|call| call.vertices.len() / 4)
            .sum();
        log::info!(
            "Frame {}: {} elements drawn, {} draw calls, {} vertices ({} bytes), {} glyphs",
            frame,
            drawn,
            backend.calls().len(),
            backend.vertex_count(),
            backend.uploaded_bytes(),
            glyphs
        );

        for name in &scene.blink {
            if ui.is_active(name) {
                ui.deactivate(name);
            } else if !ui.activate(name) {
                log::warn!("Blink target '{}' does not exist", name);
            }
        }
    }

    ui.quit();
    Ok(())
}

fn main() {
    sliggy::foundation::logging::init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let dump_path = args.next();
    log::info!("Starting Sliggy demo");

    if let Err(e) = run(&scene_path, dump_path.as_deref()) {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("Demo finished");
}
