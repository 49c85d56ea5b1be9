//! Software fallback renderer.
//!
//! Engaged when no usable GL context exists. Approximates the smoothing
//! stage by blurring a copy of the frame and blending it back over the
//! original, then applies the full grading stage per pixel via the reference
//! math. The cosmetic overlays (lip, blush, eyeshadow) are not reproduced on
//! this path — a documented fidelity reduction of the fallback, not a bug.

use tracing::debug;
use velvet_common::color::clamp01;
use velvet_common::{FilterSettings, Frame, Resolution};

use crate::error::RenderError;
use crate::shade;

/// CPU compositor producing an owned RGBA8 surface.
pub struct SoftwareRenderer {
    resolution: Resolution,
    output: Vec<u8>,
    scratch: Vec<u8>,
}

impl SoftwareRenderer {
    pub fn new(resolution: Resolution) -> Self {
        debug!(%resolution, "Software renderer initialized");
        Self {
            resolution,
            output: vec![0; resolution.rgba_byte_size()],
            scratch: vec![0; resolution.rgba_byte_size()],
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The most recently composited frame.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Reallocate the output surface for a new resolution.
    pub fn resize(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.output.clear();
        self.output.resize(resolution.rgba_byte_size(), 0);
        self.scratch.clear();
        self.scratch.resize(resolution.rgba_byte_size(), 0);
    }

    /// Composite one frame into the owned output surface.
    pub fn render(
        &mut self,
        frame: &Frame<'_>,
        settings: &FilterSettings,
    ) -> Result<(), RenderError> {
        if frame.resolution() != self.resolution {
            return Err(RenderError::ResolutionMismatch {
                expected: self.resolution.to_string(),
                got: frame.resolution().to_string(),
            });
        }

        self.output.copy_from_slice(frame.data());

        // Smoothing approximation: blur a copy, blend it back.
        if settings.smoothing > 0.0 {
            let radius = settings.smoothing * 1.5;
            let alpha = settings.smoothing * 0.4;
            self.scratch.copy_from_slice(&self.output);
            box_blur_rgba(&mut self.scratch, self.resolution, radius);
            blend_over(&mut self.output, &self.scratch, alpha);
        }

        let grading_is_identity = settings.brightness == 1.0
            && settings.contrast == 1.0
            && settings.saturation == 1.0
            && settings.warmth == 0.0;
        if !grading_is_identity {
            for px in self.output.chunks_exact_mut(4) {
                let color = [
                    px[0] as f32 / 255.0,
                    px[1] as f32 / 255.0,
                    px[2] as f32 / 255.0,
                ];
                let graded = shade::apply_grading(color, settings);
                px[0] = (graded[0] * 255.0).round() as u8;
                px[1] = (graded[1] * 255.0).round() as u8;
                px[2] = (graded[2] * 255.0).round() as u8;
                // alpha preserved
            }
        }

        Ok(())
    }
}

/// Blend `src` over `dst` at constant alpha, leaving the alpha channel of
/// `dst` untouched.
fn blend_over(dst: &mut [u8], src: &[u8], alpha: f32) {
    let alpha = clamp01(alpha);
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        for ch in 0..3 {
            let blended = d[ch] as f32 * (1.0 - alpha) + s[ch] as f32 * alpha;
            d[ch] = blended.round() as u8;
        }
    }
}

/// Single-pass separable box blur over the RGB channels of an RGBA buffer.
fn box_blur_rgba(data: &mut [u8], resolution: Resolution, radius: f32) {
    let r = radius.round() as i64;
    if r < 1 {
        return;
    }
    let width = resolution.width as i64;
    let height = resolution.height as i64;
    let window = (2 * r + 1) as f32;

    let src = data.to_vec();
    // horizontal
    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; 3];
            for dx in -r..=r {
                let sx = (x + dx).clamp(0, width - 1);
                let idx = ((y * width + sx) * 4) as usize;
                for ch in 0..3 {
                    sums[ch] += src[idx + ch] as f32;
                }
            }
            let idx = ((y * width + x) * 4) as usize;
            for ch in 0..3 {
                data[idx + ch] = (sums[ch] / window).round() as u8;
            }
        }
    }
    // vertical
    let src = data.to_vec();
    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f32; 3];
            for dy in -r..=r {
                let sy = (y + dy).clamp(0, height - 1);
                let idx = ((sy * width + x) * 4) as usize;
                for ch in 0..3 {
                    sums[ch] += src[idx + ch] as f32;
                }
            }
            let idx = ((y * width + x) * 4) as usize;
            for ch in 0..3 {
                data[idx + ch] = (sums[ch] / window).round() as u8;
            }
        }
    }
}
