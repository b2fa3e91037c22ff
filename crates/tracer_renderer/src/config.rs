//! Render configuration.

use crate::error::{RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use tracer_math::Interval;

/// Largest sub-pixel grid accepted per axis.
pub const MAX_SUBPIXELS: u32 = 64;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Rays traced per sub-pixel cell
    pub samples_per_subpixel: u32,
    /// Sub-pixel grid size per axis (2 = 2x2 supersampling)
    pub subpixels: u32,
    /// Paths are cut off (zero radiance) past this many bounces
    pub max_depth: u32,
    /// Russian roulette kicks in past this many bounces
    pub roulette_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Worker threads; `None` uses rayon's global pool
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            samples_per_subpixel: 100,
            subpixels: 2,
            max_depth: 20,
            roulette_depth: 5,
            vfov: 45.0,
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set samples per sub-pixel cell.
    pub fn with_samples(mut self, samples_per_subpixel: u32) -> Self {
        self.samples_per_subpixel = samples_per_subpixel;
        self
    }

    /// Set the sub-pixel grid size per axis.
    pub fn with_subpixels(mut self, subpixels: u32) -> Self {
        self.subpixels = subpixels;
        self
    }

    /// Set the depth cap and the depth Russian roulette starts after.
    pub fn with_depth(mut self, max_depth: u32, roulette_depth: u32) -> Self {
        self.max_depth = max_depth;
        self.roulette_depth = roulette_depth;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self
    }

    /// Render on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Primary rays traced per pixel.
    pub fn rays_per_pixel(&self) -> u64 {
        u64::from(self.subpixels) * u64::from(self.subpixels) * u64::from(self.samples_per_subpixel)
    }

    /// Check the settings can drive a render.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_subpixel == 0 || self.subpixels == 0 {
            return Err(RenderError::InvalidSampleCount);
        }
        if self.subpixels > MAX_SUBPIXELS {
            return Err(RenderError::TooManySubpixels {
                subpixels: self.subpixels,
                max: MAX_SUBPIXELS,
            });
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidDepth {
                max_depth: self.max_depth,
                roulette_depth: self.roulette_depth,
            });
        }
        if !Interval::new(0.0, 180.0).surrounds(self.vfov) {
            return Err(RenderError::InvalidFov(self.vfov));
        }
        Ok(())
    }
}
