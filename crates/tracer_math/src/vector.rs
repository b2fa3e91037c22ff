//! Path tracing helpers on top of glam's `Vec3`.
//!
//! glam already covers the arithmetic (add, sub, neg, scalar mul/div,
//! component-wise mul, dot, cross, length). This adds the few operations
//! the tracer needs that glam spells differently or not at all.

use crate::Vec3;

/// Threshold on `|x|` above which the Y axis is used as the helper axis
/// when building an orthonormal basis.
const BASIS_HELPER_THRESHOLD: f32 = 0.1;

/// Extension methods for [`Vec3`].
pub trait VectorExt: Sized {
    /// Normalize in place and return `self` for chaining.
    ///
    /// The vector must have non-zero length. Debug builds assert this;
    /// release builds let the division produce NaN/Inf. Use
    /// [`VectorExt::try_norm`] when the input is not known to be non-zero.
    fn norm(&mut self) -> &mut Self;

    /// Normalize in place, or return `None` (leaving `self` untouched) when
    /// the length is zero or not finite.
    fn try_norm(&mut self) -> Option<&mut Self>;

    /// Largest of the three components.
    fn max_channel(self) -> f32;

    /// Perfect mirror reflection about `normal`: `self - 2 (self·normal) normal`.
    fn mirror(self, normal: Vec3) -> Vec3;

    /// Two unit vectors `(u, v)` completing `self` (assumed unit length) to a
    /// right-handed orthonormal basis `(u, v, self)`.
    fn orthonormal_basis(self) -> (Vec3, Vec3);
}

impl VectorExt for Vec3 {
    #[inline]
    fn norm(&mut self) -> &mut Self {
        let length = self.length();
        debug_assert!(length > 0.0, "normalizing a zero-length vector");
        *self /= length;
        self
    }

    #[inline]
    fn try_norm(&mut self) -> Option<&mut Self> {
        let normalized = self.try_normalize()?;
        *self = normalized;
        Some(self)
    }

    #[inline]
    fn max_channel(self) -> f32 {
        self.max_element()
    }

    #[inline]
    fn mirror(self, normal: Vec3) -> Vec3 {
        self - normal * 2.0 * self.dot(normal)
    }

    fn orthonormal_basis(self) -> (Vec3, Vec3) {
        let helper = if self.x.abs() > BASIS_HELPER_THRESHOLD {
            Vec3::Y
        } else {
            Vec3::X
        };
        let mut u = helper.cross(self);
        u.norm();
        let v = self.cross(u);
        (u, v)
    }
}
