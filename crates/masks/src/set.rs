//! The four-plane mask set and the derived skin mask.

use tracing::debug;
use velvet_common::Resolution;
use velvet_landmarks::Landmark;

use crate::blush::paint_blush_mask;
use crate::eyes::paint_eye_mask;
use crate::face::paint_face_mask;
use crate::lips::paint_lip_mask;
use crate::plane::MaskPlane;

/// Combine the region masks into the skin mask the smoothing stage uses.
///
/// Lips and eyes are carved out of the face region so the blur never eats
/// detail-critical features:
/// `skin = face * (1 - lip*0.9) * (1 - eye*0.95)`.
pub fn skin_mask(face: f32, lip: f32, eye: f32) -> f32 {
    face * (1.0 - lip * 0.9) * (1.0 - eye * 0.95)
}

/// The four region masks, repainted per detection and reused across frames.
#[derive(Clone, Debug)]
pub struct MaskSet {
    face: MaskPlane,
    lip: MaskPlane,
    blush: MaskPlane,
    eye: MaskPlane,
    resolution: Resolution,
}

impl MaskSet {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            face: MaskPlane::new(resolution),
            lip: MaskPlane::new(resolution),
            blush: MaskPlane::new(resolution),
            eye: MaskPlane::new(resolution),
            resolution,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn face(&self) -> &MaskPlane {
        &self.face
    }

    pub fn lip(&self) -> &MaskPlane {
        &self.lip
    }

    pub fn blush(&self) -> &MaskPlane {
        &self.blush
    }

    pub fn eye(&self) -> &MaskPlane {
        &self.eye
    }

    /// Repaint all four masks from a (smoothed) landmark set.
    pub fn update(&mut self, landmarks: &[Landmark]) {
        debug!(landmark_count = landmarks.len(), "Repainting region masks");
        paint_face_mask(&mut self.face, landmarks);
        paint_lip_mask(&mut self.lip, landmarks);
        paint_blush_mask(&mut self.blush, landmarks);
        paint_eye_mask(&mut self.eye, landmarks);
    }

    /// Zero all four masks (face lost).
    pub fn clear(&mut self) {
        self.face.clear();
        self.lip.clear();
        self.blush.clear();
        self.eye.clear();
    }

    /// Reallocate all planes for a new output resolution.
    pub fn resize(&mut self, resolution: Resolution) {
        self.resolution = resolution;
        self.face.resize(resolution);
        self.lip.resize(resolution);
        self.blush.resize(resolution);
        self.eye.resize(resolution);
    }

    /// Derived skin-mask value at a texel.
    pub fn skin_value(&self, x: u32, y: u32) -> f32 {
        skin_mask(
            self.face.value(x, y),
            self.lip.value(x, y),
            self.eye.value(x, y),
        )
    }
}
