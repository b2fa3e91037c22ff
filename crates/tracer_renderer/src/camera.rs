//! Camera for ray generation.

use crate::error::{RenderError, RenderResult};
use tracer_math::{Interval, Ray, Vec3, VectorExt};

/// Pinhole camera mapping pixel coordinates to primary rays.
///
/// Rows grow downwards and columns to the right. All rays share the
/// origin of the camera ray it was built from.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Vec3,

    // Camera basis: right, up, forward
    u: Vec3,
    v: Vec3,
    w: Vec3,

    // Image-plane extents
    aspect_ratio: f32,
    half_height: f32,
    pixel_dx: f32,
    pixel_dy: f32,
}

impl Camera {
    /// Build a camera from the ray it looks along.
    ///
    /// `vfov` is the vertical field of view in degrees.
    pub fn new(view: Ray, width: u32, height: u32, vfov: f32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        if !Interval::new(0.0, 180.0).surrounds(vfov) {
            return Err(RenderError::InvalidFov(vfov));
        }

        let mut w = view.direction();
        w.try_norm().ok_or(RenderError::DegenerateCamera)?;

        // World up, unless we're looking straight along it
        let up = if w.cross(Vec3::Y).length_squared() > 1e-12 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let mut u = w.cross(up);
        u.norm();
        let v = u.cross(w);

        let aspect_ratio = width as f32 / height as f32;

        Ok(Self {
            origin: view.origin(),
            u,
            v,
            w,
            aspect_ratio,
            half_height: (vfov * 0.5).to_radians().tan(),
            pixel_dx: 2.0 * aspect_ratio / width as f32,
            pixel_dy: 2.0 / height as f32,
        })
    }

    /// Generate a primary ray through row `i`, column `j`.
    ///
    /// `offset` is the sample position inside the pixel, each component in
    /// [0, 1); (0.5, 0.5) is the pixel center.
    pub fn get_ray(&self, i: u32, j: u32, offset: (f32, f32)) -> Ray {
        let (px, py) = offset;
        let x = self.half_height * ((j as f32 + px) * self.pixel_dx - self.aspect_ratio);
        let y = self.half_height * (1.0 - (i as f32 + py) * self.pixel_dy);

        let mut direction = self.w + x * self.u + y * self.v;
        direction.norm();
        Ray::primary(self.origin, direction)
    }
}
