//! Motion-adaptive temporal landmark smoothing.
//!
//! A fixed exponential filter makes cosmetic overlays visibly lag the face
//! during head motion, while no filtering at all makes them jitter with
//! detector noise at rest. The smoother adapts the retention weight per
//! point from its frame-to-frame planar displacement: fast-moving points
//! trust the new sample, near-static points are heavily damped.

use crate::point::Landmark;

/// Retention weight for near-static points (heavy damping).
const ALPHA_SLOW: f32 = 0.75;
/// Retention weight for moderately moving points.
const ALPHA_MEDIUM: f32 = 0.55;
/// Retention weight for fast-moving points (track the new sample).
const ALPHA_FAST: f32 = 0.35;

/// Displacement above which a point counts as fast-moving.
const MOTION_FAST: f32 = 0.03;
/// Displacement above which a point counts as moderately moving.
const MOTION_MEDIUM: f32 = 0.01;

const ALPHA_MIN: f32 = 0.35;
const ALPHA_MAX: f32 = 0.85;

/// Exponentially-weighted temporal filter over landmark sets.
///
/// State is replaced on every call and discarded entirely on [`reset`] —
/// smoothing must never bridge a face-loss gap, which could interpolate
/// between two unrelated faces or stale geometry.
///
/// [`reset`]: LandmarkSmoother::reset
#[derive(Debug, Default)]
pub struct LandmarkSmoother {
    prev: Option<Vec<Landmark>>,
}

impl LandmarkSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smooth a raw detection against the previous frame's output.
    ///
    /// With no previous state, or when the topology length changes, the raw
    /// input passes through unchanged and becomes the new baseline.
    pub fn smooth(&mut self, raw: &[Landmark]) -> Vec<Landmark> {
        let smoothed = match &self.prev {
            Some(prev) if prev.len() == raw.len() => prev
                .iter()
                .zip(raw.iter())
                .map(|(p, c)| smooth_point(p, c))
                .collect(),
            _ => raw.to_vec(),
        };
        self.prev = Some(smoothed.clone());
        smoothed
    }

    /// Discard all temporal state (face lost).
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Whether the smoother currently holds a baseline.
    pub fn has_state(&self) -> bool {
        self.prev.is_some()
    }
}

fn smooth_point(prev: &Landmark, curr: &Landmark) -> Landmark {
    let motion = prev.planar_distance(curr);
    let alpha = if motion > MOTION_FAST {
        ALPHA_FAST
    } else if motion > MOTION_MEDIUM {
        ALPHA_MEDIUM
    } else {
        ALPHA_SLOW
    };
    let alpha = alpha.clamp(ALPHA_MIN, ALPHA_MAX);

    Landmark {
        x: prev.x * alpha + curr.x * (1.0 - alpha),
        y: prev.y * alpha + curr.y * (1.0 - alpha),
        z: prev.z * alpha + curr.z * (1.0 - alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_points(n: usize) -> Vec<Landmark> {
        (0..n)
            .map(|i| Landmark::new(0.1 + i as f32 * 0.01, 0.5, 0.0))
            .collect()
    }

    #[test]
    fn first_frame_passes_through() {
        let mut smoother = LandmarkSmoother::new();
        let raw = static_points(4);
        let out = smoother.smooth(&raw);
        assert_eq!(out, raw);
    }

    #[test]
    fn static_input_converges_monotonically() {
        let mut smoother = LandmarkSmoother::new();
        // Baseline at one position, then hold a displaced target static.
        smoother.smooth(&[Landmark::from_xy(0.0, 0.0)]);
        let target = Landmark::from_xy(0.004, 0.0);

        let mut prev_delta = f32::INFINITY;
        let mut prev_x = 0.0;
        for _ in 0..8 {
            let out = smoother.smooth(&[target]);
            let delta = (out[0].x - prev_x).abs();
            assert!(delta <= prev_delta + 1e-7, "delta grew: {delta} > {prev_delta}");
            assert!(out[0].x <= target.x + 1e-7);
            prev_delta = delta;
            prev_x = out[0].x;
        }
        // Converged close to the raw value and deltas shrank toward zero.
        assert!((target.x - prev_x).abs() < 1e-3);
        assert!(prev_delta < 1e-3);
    }

    #[test]
    fn fast_motion_uses_low_retention() {
        let mut smoother = LandmarkSmoother::new();
        smoother.smooth(&[Landmark::from_xy(0.0, 0.0)]);
        // displacement 0.05 > 0.03 => alpha = 0.35
        let out = smoother.smooth(&[Landmark::from_xy(0.05, 0.0)]);
        let expected = 0.0 * 0.35 + 0.05 * 0.65;
        assert!((out[0].x - expected).abs() < 1e-6);
    }

    #[test]
    fn medium_motion_uses_medium_retention() {
        let mut smoother = LandmarkSmoother::new();
        smoother.smooth(&[Landmark::from_xy(0.0, 0.0)]);
        // displacement 0.02 => alpha = 0.55
        let out = smoother.smooth(&[Landmark::from_xy(0.02, 0.0)]);
        let expected = 0.02 * 0.45;
        assert!((out[0].x - expected).abs() < 1e-6);
    }

    #[test]
    fn depth_is_smoothed_with_the_same_weight() {
        let mut smoother = LandmarkSmoother::new();
        smoother.smooth(&[Landmark::new(0.0, 0.0, 1.0)]);
        // static in x/y => alpha = 0.75 applies to z as well
        let out = smoother.smooth(&[Landmark::new(0.0, 0.0, 0.0)]);
        assert!((out[0].z - 0.75).abs() < 1e-6);
    }

    #[test]
    fn reset_breaks_temporal_continuity() {
        let mut smoother = LandmarkSmoother::new();
        smoother.smooth(&[Landmark::from_xy(0.9, 0.9)]);
        smoother.reset();
        assert!(!smoother.has_state());

        // First frame after reacquisition equals its raw input.
        let raw = [Landmark::from_xy(0.1, 0.1)];
        let out = smoother.smooth(&raw);
        assert_eq!(out[0], raw[0]);
    }

    #[test]
    fn topology_change_starts_a_fresh_baseline() {
        let mut smoother = LandmarkSmoother::new();
        smoother.smooth(&static_points(4));
        let raw = static_points(6);
        let out = smoother.smooth(&raw);
        assert_eq!(out, raw);
    }
}
