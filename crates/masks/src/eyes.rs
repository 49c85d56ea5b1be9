//! Eyelid / eyeshadow masks.

use velvet_landmarks::{bounds_of, regions, Landmark};

use crate::plane::MaskPlane;
use crate::raster::{blur_plane, fill_radial_gradient, GradientStop};

/// Blur applied after both eyes are painted.
const EYE_BLUR_PX: f32 = 10.0;

/// Gradient center shift toward the eyelid, as a fraction of eye height.
const LID_SHIFT: f32 = 0.3;

const EYE_STOPS: &[GradientStop] = &[
    GradientStop::new(0.0, 0.8),
    GradientStop::new(0.6, 0.4),
    GradientStop::new(1.0, 0.0),
];

/// Paint one gradient ellipse per upper-eyelid arc, shifted upward so the
/// shadow lands on the lid rather than the eye itself.
pub fn paint_eye_mask(plane: &mut MaskPlane, landmarks: &[Landmark]) {
    plane.clear();

    let width = plane.width() as f32;
    let height = plane.height() as f32;
    let mut painted = false;

    for arc in [regions::LEFT_EYE_UPPER, regions::RIGHT_EYE_UPPER] {
        let Some(bounds) = bounds_of(landmarks, arc) else {
            continue;
        };
        let eye_w = bounds.width() * width;
        let eye_h = bounds.height() * height;
        if eye_w <= 0.0 {
            continue;
        }
        let (cx, cy) = bounds.center();
        let center_x = cx * width;
        let center_y = cy * height - LID_SHIFT * eye_h;
        let radius_x = eye_w * 0.8;
        let radius_y = (eye_h * 1.5).max(eye_w * 0.2);

        fill_radial_gradient(plane, center_x, center_y, radius_x, radius_y, EYE_STOPS);
        painted = true;
    }

    if painted {
        blur_plane(plane, EYE_BLUR_PX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::synthetic_face;
    use velvet_common::Resolution;

    #[test]
    fn both_lids_are_shadowed() {
        let mut plane = MaskPlane::new(Resolution::new(128, 128));
        paint_eye_mask(&mut plane, &synthetic_face());
        // arcs span x 0.27..0.43 and 0.57..0.73 around y = 0.42
        let left = plane.value((0.35f32 * 128.0) as u32, 52);
        let right = plane.value((0.65f32 * 128.0) as u32, 52);
        assert!(left > 0.1, "left lid {left}");
        assert!(right > 0.1, "right lid {right}");
    }

    #[test]
    fn shadow_sits_above_the_eye_line() {
        let mut plane = MaskPlane::new(Resolution::new(128, 128));
        paint_eye_mask(&mut plane, &synthetic_face());
        let eye_x = (0.35f32 * 128.0) as u32;
        let eye_line_y = (0.42f32 * 128.0) as u32;
        let above = plane.value(eye_x, eye_line_y - 3);
        let below = plane.value(eye_x, eye_line_y + 5);
        assert!(
            above > below,
            "above {above} should exceed below {below} after lid shift"
        );
    }

    #[test]
    fn no_landmarks_paints_nothing() {
        let mut plane = MaskPlane::new(Resolution::new(64, 64));
        paint_eye_mask(&mut plane, &[]);
        assert!(plane.as_bytes().iter().all(|&b| b == 0));
    }
}
