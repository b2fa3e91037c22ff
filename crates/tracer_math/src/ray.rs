use crate::Vec3;

/// A ray in 3D space with origin, direction, and bounce counter.
///
/// Rays represent a line starting at `origin` and traveling in `direction`.
/// The tracer expects `direction` to be normalized. `ttl` counts how many
/// path segments were traced before this one; camera rays start at zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub ttl: u32,
}

impl Ray {
    /// Create a new ray with the given bounce count.
    pub fn new(origin: Vec3, direction: Vec3, ttl: u32) -> Self {
        Self {
            origin,
            direction,
            ttl,
        }
    }

    /// Create a primary ray (bounce count zero).
    #[inline]
    pub fn primary(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the number of bounces traced before this ray.
    #[inline]
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    /// The default camera: 20 units up the Z axis, looking down -Z.
    fn default() -> Self {
        Self::primary(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z)
    }
}
