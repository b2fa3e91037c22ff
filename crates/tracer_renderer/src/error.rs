//! Errors raised while setting up a render.
//!
//! Tracing itself never fails: misses, the depth cap and untraced
//! materials all resolve to zero radiance.

use thiserror::Error;

/// Errors that can occur when building or running a [`crate::Renderer`].
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both dimensions must be non-zero")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid sampling: need at least one sample and one subpixel per axis")]
    InvalidSampleCount,

    #[error("Sub-pixel grid {subpixels}x{subpixels} exceeds the maximum of {max} per axis")]
    TooManySubpixels { subpixels: u32, max: u32 },

    #[error("Invalid depth settings: max_depth={max_depth}, roulette_depth={roulette_depth}")]
    InvalidDepth { max_depth: u32, roulette_depth: u32 },

    #[error("Invalid vertical field of view: {0} degrees")]
    InvalidFov(f32),

    #[error("Camera direction has zero length")]
    DegenerateCamera,

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
