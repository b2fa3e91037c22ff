//! Parallel per-pixel sampling loop.
//!
//! Every pixel is an independent job on the rayon pool:
//! - 2x2 sub-pixel supersampling (configurable), jittered inside each cell
//! - per-cell averages clamped to [0, 1] before they are combined
//! - one RNG per worker, never shared between threads

use crate::{
    camera::Camera,
    config::RenderConfig,
    error::RenderResult,
    framebuffer::Framebuffer,
    gen_f32,
    material::Color,
    scene::Scene,
    tracer::trace,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracer_math::Ray;

/// Log a progress line every this many finished pixels.
const PROGRESS_INTERVAL: usize = 1000;

/// Snapshot of the displayable image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// Fraction of pixels finished, in [0, 1]
    pub progress: f32,
    /// Gamma-encoded RGBA bytes, row-major
    pub pixels: Vec<u8>,
}

/// Owns a scene and renders it into its framebuffer.
pub struct Renderer {
    camera: Camera,
    scene: Scene,
    config: RenderConfig,
    framebuffer: Framebuffer,
    pool: Option<rayon::ThreadPool>,
    // Held for a whole pass; readers of the framebuffer never take it
    render_lock: Mutex<()>,
}

impl Renderer {
    /// Create a renderer for the built-in scene.
    pub fn new(camera: Ray, width: u32, height: u32, samples_per_subpixel: u32) -> RenderResult<Self> {
        let config = RenderConfig::default()
            .with_resolution(width, height)
            .with_samples(samples_per_subpixel);
        Self::with_scene(camera, Scene::default_scene(), config)
    }

    /// The built-in scene from the default camera at default settings.
    pub fn default_view() -> RenderResult<Self> {
        Self::with_scene(Ray::default(), Scene::default_scene(), RenderConfig::default())
    }

    /// Create a renderer for any scene and configuration.
    pub fn with_scene(camera_ray: Ray, scene: Scene, config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let camera = Camera::new(camera_ray, config.width, config.height, config.vfov)?;

        let pool = match config.threads {
            Some(threads) => Some(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?),
            None => None,
        };

        log::info!(
            "Renderer ready: {}x{}, {} objects, {} rays per pixel",
            config.width,
            config.height,
            scene.len(),
            config.rays_per_pixel()
        );

        Ok(Self {
            camera,
            scene,
            framebuffer: Framebuffer::new(config.width, config.height),
            config,
            pool,
            render_lock: Mutex::new(()),
        })
    }

    /// Render every pixel. Blocks until the image is complete.
    ///
    /// Rendering again starts over from an empty framebuffer. Concurrent
    /// calls run one after the other.
    pub fn render(&self) {
        // A panicked pass leaves nothing the next one relies on
        let _pass = self.render_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match &self.pool {
            Some(pool) => pool.install(|| self.render_pixels()),
            None => self.render_pixels(),
        }
    }

    fn render_pixels(&self) {
        self.framebuffer.clear();

        let total = self.framebuffer.pixel_count();
        let width = self.config.width as usize;
        let rays_per_pixel = self.config.rays_per_pixel();
        let start = Instant::now();

        log::info!(
            "Rendering {}x{} on {} threads",
            self.config.width,
            self.config.height,
            rayon::current_num_threads()
        );

        (0..total)
            .into_par_iter()
            .for_each_init(StdRng::from_entropy, |rng, index| {
                let row = (index / width) as u32;
                let col = (index % width) as u32;

                let color = render_pixel(&self.camera, &self.scene, &self.config, row, col, rng);
                self.framebuffer.store_pixel(index, [color.x, color.y, color.z, 1.0]);

                let done = self.framebuffer.finish_pixel();
                if done % PROGRESS_INTERVAL == 0 {
                    let elapsed = start.elapsed().as_secs_f64();
                    log::debug!(
                        "{:7.3}%, average {:.2} Mrays/s",
                        100.0 * done as f64 / total as f64,
                        (rays_per_pixel * done as u64) as f64 / elapsed / 1e6
                    );
                }
            });

        let elapsed = start.elapsed();
        log::info!(
            "Rendered {} pixels in {:.2?} ({:.2} Mrays/s)",
            total,
            elapsed,
            (rays_per_pixel * total as u64) as f64 / elapsed.as_secs_f64() / 1e6
        );
    }

    /// Current displayable image. Safe to call while a render is running;
    /// unfinished pixels read as black.
    pub fn image_data(&self) -> ImageData {
        let progress = self.framebuffer.progress();
        ImageData {
            width: self.config.width,
            height: self.config.height,
            progress,
            pixels: self.framebuffer.to_rgba8(),
        }
    }

    /// Fraction of pixels finished, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.framebuffer.progress()
    }

    /// Number of pixels finished by the current or last render.
    pub fn pixels_done(&self) -> usize {
        self.framebuffer.pixels_done()
    }

    /// Copy of the raw RGBA floats, row-major.
    pub fn raw_pixels(&self) -> Vec<f32> {
        self.framebuffer.raw_pixels()
    }

    /// The scene being rendered.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Settings the renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

/// Render a single pixel with sub-pixel supersampling.
///
/// Each of the `subpixels x subpixels` cells averages
/// `samples_per_subpixel` jittered rays and is clamped to [0, 1] before
/// contributing its share to the pixel.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    row: u32,
    col: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let cells = config.subpixels;
    let cell_size = 1.0 / cells as f32;
    let cell_weight = cell_size * cell_size;
    let sample_weight = 1.0 / config.samples_per_subpixel as f32;

    let mut pixel_color = Color::ZERO;
    for sy in 0..cells {
        for sx in 0..cells {
            let mut cell_color = Color::ZERO;
            for _ in 0..config.samples_per_subpixel {
                let offset = (
                    (sx as f32 + gen_f32(rng)) * cell_size,
                    (sy as f32 + gen_f32(rng)) * cell_size,
                );
                let ray = camera.get_ray(row, col, offset);
                cell_color += trace(&ray, scene, config, rng) * sample_weight;
            }
            pixel_color += cell_color.clamp(Color::ZERO, Color::ONE) * cell_weight;
        }
    }

    pixel_color
}
