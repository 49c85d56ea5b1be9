//! Per-frame uniform assembly.
//!
//! The renderer consumes a typed name/value list rather than poking GL state
//! from business code; the set is rebuilt each frame from the settings record
//! and applied in one pass.

use velvet_common::{FilterSettings, Resolution};

/// Texture unit assignments for the five samplers.
pub const UNIT_FRAME: i32 = 0;
pub const UNIT_FACE_MASK: i32 = 1;
pub const UNIT_LIP_MASK: i32 = 2;
pub const UNIT_BLUSH_MASK: i32 = 3;
pub const UNIT_EYE_MASK: i32 = 4;

/// A single uniform value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    F32(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    /// Sampler bound to a texture unit.
    Sampler(i32),
}

/// Ordered uniform name/value list for one draw.
#[derive(Clone, Debug, Default)]
pub struct UniformSet {
    entries: Vec<(&'static str, UniformValue)>,
}

impl UniformSet {
    /// Assemble the full uniform set for a frame.
    pub fn for_frame(settings: &FilterSettings, resolution: Resolution) -> Self {
        let entries = vec![
            ("u_frame", UniformValue::Sampler(UNIT_FRAME)),
            ("u_face_mask", UniformValue::Sampler(UNIT_FACE_MASK)),
            ("u_lip_mask", UniformValue::Sampler(UNIT_LIP_MASK)),
            ("u_blush_mask", UniformValue::Sampler(UNIT_BLUSH_MASK)),
            ("u_eye_mask", UniformValue::Sampler(UNIT_EYE_MASK)),
            (
                "u_resolution",
                UniformValue::Vec2([resolution.width as f32, resolution.height as f32]),
            ),
            ("u_smoothing", UniformValue::F32(settings.smoothing)),
            ("u_brightness", UniformValue::F32(settings.brightness)),
            ("u_contrast", UniformValue::F32(settings.contrast)),
            ("u_saturation", UniformValue::F32(settings.saturation)),
            ("u_warmth", UniformValue::F32(settings.warmth)),
            ("u_lip_color", UniformValue::Vec3(settings.lip_color)),
            ("u_lip_intensity", UniformValue::F32(settings.lip_intensity)),
            ("u_lip_gloss", UniformValue::F32(settings.lip_gloss)),
            ("u_blush_color", UniformValue::Vec3(settings.blush_color)),
            (
                "u_blush_intensity",
                UniformValue::F32(settings.blush_intensity),
            ),
            (
                "u_eye_shadow_color",
                UniformValue::Vec3(settings.eye_shadow_color),
            ),
            (
                "u_eye_shadow_intensity",
                UniformValue::F32(settings.eye_shadow_intensity),
            ),
        ];
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, UniformValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by uniform name.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_covers_all_shader_inputs() {
        let set = UniformSet::for_frame(&FilterSettings::default(), Resolution::HD);
        assert_eq!(set.len(), 18);
    }

    #[test]
    fn sampler_units_are_distinct_and_ordered() {
        let units = [
            UNIT_FRAME,
            UNIT_FACE_MASK,
            UNIT_LIP_MASK,
            UNIT_BLUSH_MASK,
            UNIT_EYE_MASK,
        ];
        for (i, &unit) in units.iter().enumerate() {
            assert_eq!(unit, i as i32);
        }
    }

    #[test]
    fn settings_values_flow_through() {
        let mut settings = FilterSettings::default();
        settings.smoothing = 0.6;
        settings.lip_color = [0.9, 0.4, 0.45];
        let set = UniformSet::for_frame(&settings, Resolution::new(640, 480));

        assert_eq!(set.get("u_smoothing"), Some(&UniformValue::F32(0.6)));
        assert_eq!(
            set.get("u_lip_color"),
            Some(&UniformValue::Vec3([0.9, 0.4, 0.45]))
        );
        assert_eq!(
            set.get("u_resolution"),
            Some(&UniformValue::Vec2([640.0, 480.0]))
        );
        assert!(set.get("u_missing").is_none());
    }

    #[test]
    fn every_uniform_name_appears_in_the_fragment_shader() {
        let set = UniformSet::for_frame(&FilterSettings::default(), Resolution::HD);
        for (name, _) in set.iter() {
            assert!(
                crate::shaders::FRAGMENT_SHADER.contains(name),
                "shader missing {name}"
            );
        }
    }
}
