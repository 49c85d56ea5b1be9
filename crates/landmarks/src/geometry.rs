//! Geometry helpers over indexed landmark subsets.
//!
//! All helpers operate in the landmarks' own normalized coordinate space and
//! skip indices outside the supplied slice, so a detector with an unexpected
//! topology degrades to partial measurements instead of panicking.

use crate::point::Landmark;
use crate::regions;

/// Axis-aligned bounding box in normalized coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}

fn indexed<'a>(
    landmarks: &'a [Landmark],
    indices: &'a [usize],
) -> impl Iterator<Item = &'a Landmark> {
    indices.iter().filter_map(|&i| landmarks.get(i))
}

/// Centroid of the indexed points. Returns `None` when no index resolves.
pub fn centroid_of(landmarks: &[Landmark], indices: &[usize]) -> Option<(f32, f32)> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for p in indexed(landmarks, indices) {
        sum_x += p.x;
        sum_y += p.y;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((sum_x / count as f32, sum_y / count as f32))
}

/// Bounding box of the indexed points. Returns `None` when no index resolves.
pub fn bounds_of(landmarks: &[Landmark], indices: &[usize]) -> Option<Bounds> {
    let mut iter = indexed(landmarks, indices);
    let first = iter.next()?;
    let mut bounds = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    for p in iter {
        bounds.min_x = bounds.min_x.min(p.x);
        bounds.min_y = bounds.min_y.min(p.y);
        bounds.max_x = bounds.max_x.max(p.x);
        bounds.max_y = bounds.max_y.max(p.y);
    }
    Some(bounds)
}

/// Measured face width: the x-extent of the face oval in normalized space.
pub fn face_width(landmarks: &[Landmark]) -> Option<f32> {
    bounds_of(landmarks, regions::FACE_OVAL).map(|b| b.width())
}
