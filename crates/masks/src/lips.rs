//! Lip ring mask.

use velvet_landmarks::{bounds_of, centroid_of, regions, Landmark};

use crate::plane::MaskPlane;
use crate::raster::{
    blur_plane, fill_path_even_odd, modulate_radial_gradient, GradientStop, PointPx,
};

/// Light blur for edge softness; the gradient supplies most of the falloff.
const LIP_BLUR_PX: f32 = 3.0;

/// Radial falloff from the lip centroid outward.
const LIP_STOPS: &[GradientStop] = &[
    GradientStop::new(0.0, 1.0),
    GradientStop::new(0.5, 0.95),
    GradientStop::new(0.8, 0.7),
    GradientStop::new(1.0, 0.2),
];

/// Rasterize the lip ring: outer contour minus inner contour (even-odd),
/// shaded by a radial gradient centered at the outer-contour centroid.
pub fn paint_lip_mask(plane: &mut MaskPlane, landmarks: &[Landmark]) {
    plane.clear();

    let width = plane.width() as f32;
    let height = plane.height() as f32;
    let to_px = |indices: &[usize]| -> Vec<PointPx> {
        indices
            .iter()
            .filter_map(|&i| landmarks.get(i))
            .map(|p| (p.x * width, p.y * height))
            .collect()
    };

    let outer = to_px(regions::LIP_OUTER);
    let inner = to_px(regions::LIP_INNER);
    if outer.len() < 3 {
        return;
    }

    let Some((cx, cy)) = centroid_of(landmarks, regions::LIP_OUTER) else {
        return;
    };
    let Some(bounds) = bounds_of(landmarks, regions::LIP_OUTER) else {
        return;
    };

    fill_path_even_odd(plane, &[&outer, &inner], 1.0);
    modulate_radial_gradient(
        plane,
        cx * width,
        cy * height,
        (bounds.width() * width * 0.5).max(1.0),
        (bounds.height() * height * 0.5).max(1.0),
        LIP_STOPS,
    );
    blur_plane(plane, LIP_BLUR_PX);
}
