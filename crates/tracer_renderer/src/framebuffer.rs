//! Raw float framebuffer and the progress counter.
//!
//! Channels are stored as `f32` bit patterns in `AtomicU32`s so pixel jobs
//! can write their own slots while other threads read the image. Every pixel
//! is written by exactly one job, so relaxed stores are enough; the progress
//! counter publishes them with release/acquire.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use tracer_math::Interval;

/// Channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Display gamma applied when converting to bytes.
pub const GAMMA: f32 = 2.2;

/// Apply display gamma to a linear value in [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    linear.powf(1.0 / GAMMA)
}

/// Convert a raw channel value to a display byte.
///
/// Clamps to [0, 1], gamma encodes, scales to 255 and rounds.
#[inline]
pub fn to_byte(raw: f32) -> u8 {
    (linear_to_gamma(Interval::UNIT.clamp(raw)) * 255.0 + 0.5) as u8
}

/// Accumulation buffer owned by a renderer.
pub struct Framebuffer {
    width: u32,
    height: u32,
    raw: Box<[AtomicU32]>,
    pixels_done: AtomicUsize,
}

impl Framebuffer {
    /// Create a new framebuffer filled with zeros.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            raw: (0..len).map(|_| AtomicU32::new(0)).collect(),
            pixels_done: AtomicUsize::new(0),
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Write the four channels of pixel `index` (row-major).
    pub fn store_pixel(&self, index: usize, rgba: [f32; CHANNELS]) {
        let slots = &self.raw[index * CHANNELS..(index + 1) * CHANNELS];
        for (slot, value) in slots.iter().zip(rgba) {
            slot.store(value.to_bits(), Ordering::Relaxed);
        }
    }

    /// Read the four channels of pixel `index` (row-major).
    pub fn pixel(&self, index: usize) -> [f32; CHANNELS] {
        let slots = &self.raw[index * CHANNELS..(index + 1) * CHANNELS];
        std::array::from_fn(|channel| f32::from_bits(slots[channel].load(Ordering::Relaxed)))
    }

    /// Mark one more pixel as done. Returns the new count.
    pub fn finish_pixel(&self) -> usize {
        self.pixels_done.fetch_add(1, Ordering::Release) + 1
    }

    /// Number of pixels finished so far.
    pub fn pixels_done(&self) -> usize {
        self.pixels_done.load(Ordering::Acquire)
    }

    /// Fraction of pixels finished, in [0, 1].
    pub fn progress(&self) -> f32 {
        let total = self.pixel_count();
        if total == 0 {
            return 1.0;
        }
        self.pixels_done().min(total) as f32 / total as f32
    }

    /// Zero every channel and the progress counter.
    pub fn clear(&self) {
        self.pixels_done.store(0, Ordering::Release);
        for slot in self.raw.iter() {
            slot.store(0, Ordering::Relaxed);
        }
    }

    /// Copy of the raw channels, `4 * width * height` floats.
    pub fn raw_pixels(&self) -> Vec<f32> {
        self.raw
            .iter()
            .map(|slot| f32::from_bits(slot.load(Ordering::Relaxed)))
            .collect()
    }

    /// Tone-mapped RGBA bytes, `4 * width * height` of them.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.raw
            .iter()
            .map(|slot| to_byte(f32::from_bits(slot.load(Ordering::Relaxed))))
            .collect()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels_done", &self.pixels_done())
            .finish_non_exhaustive()
    }
}
