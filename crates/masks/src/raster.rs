//! CPU rasterization primitives for mask painting.
//!
//! These replace what a 2D canvas provides: even-odd path fills, elliptical
//! radial gradients with alpha stops, and a blur pass for soft mask edges.
//! Coordinates are in pixel space; sampling is at pixel centers.

use crate::plane::MaskPlane;

/// A point in pixel space.
pub type PointPx = (f32, f32);

/// One stop of a radial gradient: normalized offset along the radius and the
/// alpha at that offset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub alpha: f32,
}

impl GradientStop {
    pub const fn new(offset: f32, alpha: f32) -> Self {
        Self { offset, alpha }
    }
}

/// Fill the region enclosed by `paths` using the even-odd rule.
///
/// A single path fills its interior; a compound path of outer + inner
/// contours fills the ring between them. Each path is treated as closed.
pub fn fill_path_even_odd(plane: &mut MaskPlane, paths: &[&[PointPx]], value: f32) {
    let height = plane.height();
    let width = plane.width();
    let mut crossings: Vec<f32> = Vec::new();

    for y in 0..height {
        let scan_y = y as f32 + 0.5;
        crossings.clear();

        for path in paths {
            if path.len() < 3 {
                continue;
            }
            for i in 0..path.len() {
                let (x0, y0) = path[i];
                let (x1, y1) = path[(i + 1) % path.len()];
                // Half-open edge test keeps shared vertices from double-counting.
                if (y0 <= scan_y && scan_y < y1) || (y1 <= scan_y && scan_y < y0) {
                    let t = (scan_y - y0) / (y1 - y0);
                    crossings.push(x0 + t * (x1 - x0));
                }
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let x_start = span[0].max(0.0).ceil() as u32;
            let x_end = span[1].min(width as f32).floor() as u32;
            for x in x_start..x_end {
                plane.max_value(x, y, value);
            }
        }
    }
}

/// Paint an elliptical radial gradient centered at `(cx, cy)` with radii
/// `(rx, ry)`, max-blending onto the plane.
///
/// The normalized radial distance `t = sqrt((dx/rx)² + (dy/ry)²)` indexes the
/// stop list; texels past `t = 1` are untouched. This is the scale-translate
/// equivalent of a circular canvas gradient drawn through a non-uniform
/// transform.
pub fn fill_radial_gradient(
    plane: &mut MaskPlane,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    stops: &[GradientStop],
) {
    if rx <= 0.0 || ry <= 0.0 || stops.is_empty() {
        return;
    }
    let min_x = ((cx - rx).floor().max(0.0)) as u32;
    let max_x = ((cx + rx).ceil().min(plane.width() as f32)) as u32;
    let min_y = ((cy - ry).floor().max(0.0)) as u32;
    let max_y = ((cy + ry).ceil().min(plane.height() as f32)) as u32;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            let t = (dx * dx + dy * dy).sqrt();
            if t <= 1.0 {
                plane.max_value(x, y, sample_stops(stops, t));
            }
        }
    }
}

/// Scale every texel of the plane by a radial gradient field.
///
/// Used to clip a gradient to an already-filled region (the lip ring): the
/// fill supplies coverage, the gradient supplies falloff. Texels beyond the
/// gradient extent are scaled by the final stop's alpha, matching canvas
/// gradient extension.
pub fn modulate_radial_gradient(
    plane: &mut MaskPlane,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    stops: &[GradientStop],
) {
    if rx <= 0.0 || ry <= 0.0 || stops.is_empty() {
        return;
    }
    for y in 0..plane.height() {
        for x in 0..plane.width() {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            let t = (dx * dx + dy * dy).sqrt();
            plane.scale_value(x, y, sample_stops(stops, t));
        }
    }
}

/// Interpolate the stop list at normalized distance `t`.
fn sample_stops(stops: &[GradientStop], t: f32) -> f32 {
    let first = stops[0];
    if t <= first.offset {
        return first.alpha;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.alpha;
            }
            let k = (t - a.offset) / span;
            return a.alpha + (b.alpha - a.alpha) * k;
        }
    }
    stops[stops.len() - 1].alpha
}

/// Blur the plane with three separable box passes approximating a Gaussian
/// of roughly `radius` pixels.
pub fn blur_plane(plane: &mut MaskPlane, radius: f32) {
    if radius < 1.0 {
        return;
    }
    // Three box passes of a third of the radius approximate the Gaussian.
    let box_radius = ((radius / 3.0).round() as u32).max(1);
    for _ in 0..3 {
        box_blur_pass(plane, box_radius, true);
        box_blur_pass(plane, box_radius, false);
    }
}

fn box_blur_pass(plane: &mut MaskPlane, radius: u32, horizontal: bool) {
    let width = plane.width() as i64;
    let height = plane.height() as i64;
    let (len, lines) = if horizontal {
        (width, height)
    } else {
        (height, width)
    };
    let r = radius as i64;
    let window = 2 * r + 1;

    let src: Vec<u8> = plane.as_bytes().to_vec();
    let dst = plane.data_mut();
    let at = |line: i64, i: i64| -> usize {
        let i = i.clamp(0, len - 1);
        if horizontal {
            (line * width + i) as usize
        } else {
            (i * width + line) as usize
        }
    };

    for line in 0..lines {
        // Sliding window sum with edge clamping.
        let mut sum: i64 = 0;
        for i in -r..=r {
            sum += src[at(line, i)] as i64;
        }
        for i in 0..len {
            dst[at(line, i)] = ((sum + window / 2) / window) as u8;
            sum += src[at(line, i + r + 1)] as i64;
            sum -= src[at(line, i - r)] as i64;
        }
    }
}
