//! Tracer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over a list of spheres. Pixels are rendered in
//! parallel on rayon; the framebuffer and progress counter can be read while
//! a render is running.

mod camera;
mod config;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use camera::Camera;
pub use config::{RenderConfig, MAX_SUBPIXELS};
pub use error::{RenderError, RenderResult};
pub use framebuffer::{linear_to_gamma, to_byte, Framebuffer, CHANNELS, GAMMA};
pub use hittable::{Hittable, HIT_EPSILON};
pub use material::{Color, Material};
pub use renderer::{render_pixel, ImageData, Renderer};
pub use scene::{Scene, SceneHit, SceneObject};
pub use sphere::Sphere;
pub use tracer::trace;

/// Re-export Vec3 and common math types from tracer_math
pub use tracer_math::{Interval, Ray, Vec3, VectorExt};

use rand::{Rng, RngCore};

/// Uniform sample in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
