//! Cheek blush masks.

use velvet_landmarks::{bounds_of, centroid_of, face_width, regions, Landmark};

use crate::plane::MaskPlane;
use crate::raster::{fill_radial_gradient, GradientStop};

/// Blush ellipse base radius as a fraction of the measured face width.
const BLUSH_RADIUS_FACTOR: f32 = 0.12;
/// Horizontal stretch of the blush ellipse.
const BLUSH_STRETCH_X: f32 = 1.3;
/// Vertical squash of the blush ellipse.
const BLUSH_SQUASH_Y: f32 = 0.9;

/// The gradient is soft enough that no post-blur is needed.
const BLUSH_STOPS: &[GradientStop] = &[
    GradientStop::new(0.0, 0.9),
    GradientStop::new(0.5, 0.5),
    GradientStop::new(1.0, 0.0),
];

/// Paint one elliptical gradient per cheek cluster.
///
/// The ellipse is sized from the measured face width and its center is
/// nudged slightly up and outward from the cluster centroid, onto the
/// cheekbone.
pub fn paint_blush_mask(plane: &mut MaskPlane, landmarks: &[Landmark]) {
    plane.clear();

    let width = plane.width() as f32;
    let height = plane.height() as f32;
    let Some(face_w) = face_width(landmarks) else {
        return;
    };
    let face_w_px = face_w * width;
    let radius_x = BLUSH_RADIUS_FACTOR * face_w_px * BLUSH_STRETCH_X;
    let radius_y = BLUSH_RADIUS_FACTOR * face_w_px * BLUSH_SQUASH_Y;

    let face_center_x = bounds_of(landmarks, regions::FACE_OVAL)
        .map(|b| b.center().0)
        .unwrap_or(0.5);

    for cluster in [regions::LEFT_CHEEK, regions::RIGHT_CHEEK] {
        let Some((cx, cy)) = centroid_of(landmarks, cluster) else {
            continue;
        };
        // outward = away from the face midline
        let outward = if cx < face_center_x { -1.0 } else { 1.0 };
        let center_x = cx * width + outward * 0.15 * radius_x;
        let center_y = cy * height - 0.2 * radius_y;
        fill_radial_gradient(plane, center_x, center_y, radius_x, radius_y, BLUSH_STOPS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::synthetic_face;
    use velvet_common::Resolution;

    #[test]
    fn blush_covers_both_cheeks() {
        let mut plane = MaskPlane::new(Resolution::new(128, 128));
        paint_blush_mask(&mut plane, &synthetic_face());
        // cheek clusters sit at (0.32, 0.58) and (0.68, 0.58)
        let left = plane.value(40, 72);
        let right = plane.value(88, 72);
        assert!(left > 0.3, "left cheek {left}");
        assert!(right > 0.3, "right cheek {right}");
        // nothing at the chin or forehead
        assert_eq!(plane.value(64, 120), 0.0);
        assert_eq!(plane.value(64, 20), 0.0);
    }

    #[test]
    fn blush_centers_shift_outward() {
        let mut plane = MaskPlane::new(Resolution::new(128, 128));
        paint_blush_mask(&mut plane, &synthetic_face());
        // the outward nudge makes the outer flank of the cheek stronger
        // than the mirrored inner flank
        let cheek_x = (0.32f32 * 128.0) as u32;
        let outer = plane.value(cheek_x - 6, 70);
        let inner = plane.value(cheek_x + 6, 70);
        assert!(
            outer > inner,
            "outer {outer} should exceed inner {inner} after outward shift"
        );
    }

    #[test]
    fn ellipse_is_wider_than_tall() {
        let mut plane = MaskPlane::new(Resolution::new(128, 128));
        paint_blush_mask(&mut plane, &synthetic_face());
        let cheek_x = (0.32f32 * 128.0) as u32;
        // centroid (41, 74) shifted up ~2px and outward ~-2px
        let horizontal_reach = plane.value(cheek_x - 12, 72);
        let vertical_reach = plane.value(cheek_x, 72 + 12);
        assert!(horizontal_reach > vertical_reach);
    }

    #[test]
    fn no_face_paints_nothing() {
        let mut plane = MaskPlane::new(Resolution::new(64, 64));
        paint_blush_mask(&mut plane, &[]);
        assert!(plane.as_bytes().iter().all(|&b| b == 0));
    }
}
