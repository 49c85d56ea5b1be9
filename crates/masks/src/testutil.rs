//! Shared synthetic-face fixture for painter tests.

use velvet_landmarks::{regions, Landmark};

/// A plausible frontal face: oval, lip rings, cheek clusters, and eyelid
/// arcs placed on analytic curves. Every other topology point sits at the
/// frame center and is unused by the painters.
pub(crate) fn synthetic_face() -> Vec<Landmark> {
    let mut points = vec![Landmark::from_xy(0.5, 0.5); regions::LANDMARK_COUNT];

    place_ellipse(&mut points, regions::FACE_OVAL, (0.5, 0.5), 0.3, 0.35);
    place_ellipse(&mut points, regions::LIP_OUTER, (0.5, 0.72), 0.12, 0.05);
    place_ellipse(&mut points, regions::LIP_INNER, (0.5, 0.72), 0.07, 0.02);
    place_cluster(&mut points, regions::LEFT_CHEEK, (0.32, 0.58));
    place_cluster(&mut points, regions::RIGHT_CHEEK, (0.68, 0.58));
    place_arc(&mut points, regions::LEFT_EYE_UPPER, 0.27, 0.42);
    place_arc(&mut points, regions::RIGHT_EYE_UPPER, 0.57, 0.42);

    points
}

fn place_ellipse(
    points: &mut [Landmark],
    indices: &[usize],
    center: (f32, f32),
    rx: f32,
    ry: f32,
) {
    let n = indices.len();
    for (k, &idx) in indices.iter().enumerate() {
        let angle = k as f32 / n as f32 * std::f32::consts::TAU;
        points[idx] = Landmark::from_xy(center.0 + rx * angle.sin(), center.1 - ry * angle.cos());
    }
}

fn place_cluster(points: &mut [Landmark], indices: &[usize], center: (f32, f32)) {
    let n = indices.len();
    for (k, &idx) in indices.iter().enumerate() {
        let angle = k as f32 / n as f32 * std::f32::consts::TAU;
        points[idx] =
            Landmark::from_xy(center.0 + 0.02 * angle.cos(), center.1 + 0.02 * angle.sin());
    }
}

fn place_arc(points: &mut [Landmark], indices: &[usize], start_x: f32, base_y: f32) {
    let n = indices.len();
    for (k, &idx) in indices.iter().enumerate() {
        let t = k as f32 / (n - 1) as f32;
        let x = start_x + t * 0.16;
        let y = base_y - 0.015 * (t * std::f32::consts::PI).sin();
        points[idx] = Landmark::from_xy(x, y);
    }
}
