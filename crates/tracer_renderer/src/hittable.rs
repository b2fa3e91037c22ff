//! Hittable trait for ray-shape intersection.

use tracer_math::{Ray, Vec3};

/// Minimum hit distance. Anything closer is treated as the surface the ray
/// just left, which keeps bounced rays from re-hitting their origin.
pub const HIT_EPSILON: f32 = 1e-4;

/// Trait for shapes that can be hit by rays.
///
/// The scene query only relies on these three methods, so new primitives
/// can be added without touching it.
pub trait Hittable: Send + Sync {
    /// Distance along `ray` to the nearest intersection beyond
    /// [`HIT_EPSILON`], if any.
    fn intersect(&self, ray: &Ray) -> Option<f32>;

    /// Unit normal pointing out of the shape at a point on its surface.
    fn outward_normal(&self, point: Vec3) -> Vec3;

    /// Reference position of the shape (the center, for a sphere).
    fn position(&self) -> Vec3;
}
