//! Simple path tracer example.
//!
//! Renders the built-in scene and saves it as a PNG.
//!
//! Usage: `cargo run --release --example simple_render [config.json] [output.png]`
//!
//! The config file is a JSON `RenderConfig`; missing fields keep their
//! defaults. Set `RUST_LOG=debug` to see per-1000-pixel progress.

use anyhow::Context;
use log::LevelFilter;
use std::{env, fs};
use tracer_renderer::{Ray, RenderConfig, Renderer, Scene};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RenderConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let scene = Scene::default_scene();
    for object in scene.objects() {
        log::debug!("{}: {:?} at {}", object.name, object.material, object.position());
    }

    let renderer = Renderer::with_scene(Ray::default(), scene, config)?;
    renderer.render();

    let image = renderer.image_data();
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.pixels)
        .context("framebuffer size does not match the image")?;
    buffer.save(&output).with_context(|| format!("saving {output}"))?;
    log::info!("Saved to {}", output);

    Ok(())
}
