//! Full-face skin mask.

use velvet_landmarks::{regions, Landmark};

use crate::plane::MaskPlane;
use crate::raster::{blur_plane, fill_path_even_odd, PointPx};

/// Blur applied to the filled face oval for a soft-edged skin region.
const FACE_BLUR_PX: f32 = 20.0;

/// Rasterize the face-oval polygon and soften its edge.
///
/// The result is the base "skin" region the smoothing stage is scoped to;
/// lips and eyes are excluded later via the skin-mask formula.
pub fn paint_face_mask(plane: &mut MaskPlane, landmarks: &[Landmark]) {
    plane.clear();

    let width = plane.width() as f32;
    let height = plane.height() as f32;
    let path: Vec<PointPx> = regions::FACE_OVAL
        .iter()
        .filter_map(|&i| landmarks.get(i))
        .map(|p| (p.x * width, p.y * height))
        .collect();
    if path.len() < 3 {
        return;
    }

    fill_path_even_odd(plane, &[&path], 1.0);
    blur_plane(plane, FACE_BLUR_PX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::synthetic_face;
    use velvet_common::Resolution;

    #[test]
    fn face_mask_covers_center_not_corners() {
        let mut plane = MaskPlane::new(Resolution::new(64, 64));
        paint_face_mask(&mut plane, &synthetic_face());
        assert!(plane.value(32, 32) > 0.7);
        assert!(plane.value(1, 1) < 0.05);
    }

    #[test]
    fn face_mask_edge_is_soft() {
        let mut plane = MaskPlane::new(Resolution::new(64, 64));
        paint_face_mask(&mut plane, &synthetic_face());
        // walk outward from the center and require intermediate values
        let mut saw_soft_edge = false;
        for x in 32..64 {
            let v = plane.value(x, 32);
            if v > 0.1 && v < 0.9 {
                saw_soft_edge = true;
            }
        }
        assert!(saw_soft_edge);
    }

    #[test]
    fn missing_landmarks_leave_plane_empty() {
        let mut plane = MaskPlane::new(Resolution::new(64, 64));
        paint_face_mask(&mut plane, &[]);
        assert!(plane.as_bytes().iter().all(|&b| b == 0));
    }
}
