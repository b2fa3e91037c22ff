//! Sphere primitive for ray tracing.

use crate::hittable::{Hittable, HIT_EPSILON};
use tracer_math::{Interval, Ray, Vec3, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Get the sphere's center.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Get the sphere's radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        // Assumes a unit direction, so the quadratic's `a` term is 1
        let op = self.center - ray.origin();
        let b = ray.direction().dot(op);
        let det = b * b - op.dot(op) + self.radius * self.radius;
        if det < 0.0 {
            return None;
        }

        let det = det.sqrt();
        let valid = Interval::above(HIT_EPSILON);

        // Near root first, far root when the origin is inside the sphere
        let near = b - det;
        if valid.surrounds(near) {
            return Some(near);
        }
        let far = b + det;
        valid.surrounds(far).then_some(far)
    }

    fn outward_normal(&self, point: Vec3) -> Vec3 {
        let mut normal = point - self.center;
        normal.norm();
        normal
    }

    fn position(&self) -> Vec3 {
        self.center
    }
}
