//! Filter settings and the preset adapter.
//!
//! [`FilterSettings`] is the normalized record the compositor reads every
//! frame: intensities in `[0, 1]`, colors as RGB triples in `[0, 1]`.
//! [`FilterPreset`] is the human-facing description (0–100 sliders, hex
//! colors, an optional CSS-style filter string) that UIs and stored presets
//! use; the adapter translates it into a partial settings update.

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, Rgb};

/// Normalized settings consumed by the compositing stage.
///
/// `brightness`, `contrast`, and `saturation` are multipliers with identity
/// at `1.0`; `warmth` is a signed offset with identity at `0.0`; everything
/// else is an intensity in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Skin-smoothing strength.
    pub smoothing: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub warmth: f32,

    pub lip_color: Rgb,
    pub lip_intensity: f32,
    pub lip_gloss: f32,

    pub blush_color: Rgb,
    pub blush_intensity: f32,

    pub eye_shadow_color: Rgb,
    pub eye_shadow_intensity: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            smoothing: 0.0,
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            warmth: 0.0,
            lip_color: [1.0, 1.0, 1.0],
            lip_intensity: 0.0,
            lip_gloss: 0.0,
            blush_color: [1.0, 1.0, 1.0],
            blush_intensity: 0.0,
            eye_shadow_color: [1.0, 1.0, 1.0],
            eye_shadow_intensity: 0.0,
        }
    }
}

impl FilterSettings {
    /// Merge a partial update into this record. `None` fields are untouched.
    pub fn merge(&mut self, update: &FilterSettingsUpdate) {
        macro_rules! take {
            ($field:ident) => {
                if let Some(v) = update.$field {
                    self.$field = v;
                }
            };
        }
        take!(smoothing);
        take!(brightness);
        take!(contrast);
        take!(saturation);
        take!(warmth);
        take!(lip_color);
        take!(lip_intensity);
        take!(lip_gloss);
        take!(blush_color);
        take!(blush_intensity);
        take!(eye_shadow_color);
        take!(eye_shadow_intensity);
    }

    /// Build a full settings record from defaults plus a preset.
    pub fn from_preset(preset: &FilterPreset) -> Self {
        let mut settings = Self::default();
        settings.merge(&preset.to_update());
        settings
    }
}

/// Partial settings change; `None` means "leave unchanged".
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSettingsUpdate {
    pub smoothing: Option<f32>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub warmth: Option<f32>,
    pub lip_color: Option<Rgb>,
    pub lip_intensity: Option<f32>,
    pub lip_gloss: Option<f32>,
    pub blush_color: Option<Rgb>,
    pub blush_intensity: Option<f32>,
    pub eye_shadow_color: Option<Rgb>,
    pub eye_shadow_intensity: Option<f32>,
}

/// One cosmetic layer of a preset: a hex color plus a 0–100 intensity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CosmeticPreset {
    /// Hex color string; unparseable values fall back to white.
    pub color: String,
    /// Intensity slider, 0–100.
    pub intensity: f32,
}

impl CosmeticPreset {
    pub fn new(color: impl Into<String>, intensity: f32) -> Self {
        Self {
            color: color.into(),
            intensity,
        }
    }

    fn rgb(&self) -> Rgb {
        hex_to_rgb(&self.color)
    }

    fn normalized_intensity(&self) -> f32 {
        (self.intensity / 100.0).clamp(0.0, 1.0)
    }
}

/// Human-facing filter preset (0–100 sliders, hex colors, CSS filter string).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    /// Skin smoothing, 0–100.
    pub smooth: Option<f32>,
    /// Brightening, 0–100. Maps to `1 + (value/100) * 0.25` — brightening
    /// only, darkening is not expressible through this field.
    pub brighten: Option<f32>,
    pub lip_tint: Option<CosmeticPreset>,
    pub lip_gloss: Option<CosmeticPreset>,
    pub blush: Option<CosmeticPreset>,
    pub eye_shadow: Option<CosmeticPreset>,
    /// Free-form CSS-style filter string, e.g.
    /// `"saturate(1.2) brightness(1.05) sepia(0.2)"`. Parsed last, so it wins
    /// over the discrete fields on conflict.
    pub filter: Option<String>,
}

impl FilterPreset {
    /// Translate the preset into a partial settings update.
    pub fn to_update(&self) -> FilterSettingsUpdate {
        let mut update = FilterSettingsUpdate::default();

        if let Some(smooth) = self.smooth {
            update.smoothing = Some((smooth / 100.0).clamp(0.0, 1.0));
        }
        if let Some(brighten) = self.brighten {
            update.brightness = Some(1.0 + (brighten / 100.0).clamp(0.0, 1.0) * 0.25);
        }
        if let Some(lip) = &self.lip_tint {
            update.lip_color = Some(lip.rgb());
            update.lip_intensity = Some(lip.normalized_intensity());
        }
        if let Some(gloss) = &self.lip_gloss {
            update.lip_gloss = Some(gloss.normalized_intensity());
        }
        if let Some(blush) = &self.blush {
            update.blush_color = Some(blush.rgb());
            update.blush_intensity = Some(blush.normalized_intensity());
        }
        if let Some(shadow) = &self.eye_shadow {
            update.eye_shadow_color = Some(shadow.rgb());
            update.eye_shadow_intensity = Some(shadow.normalized_intensity());
        }

        // The filter string is applied after the discrete fields so it wins
        // when both touch the same property.
        if let Some(filter) = &self.filter {
            apply_filter_string(filter, &mut update);
        }

        update
    }
}

/// Extract `saturate()`, `brightness()`, and `sepia()` from a CSS-style
/// filter string into the update. `sepia(v)` maps to `warmth = v * 2`.
fn apply_filter_string(filter: &str, update: &mut FilterSettingsUpdate) {
    if let Some(v) = extract_function(filter, "saturate") {
        update.saturation = Some(v);
    }
    if let Some(v) = extract_function(filter, "brightness") {
        update.brightness = Some(v);
    }
    if let Some(v) = extract_function(filter, "sepia") {
        update.warmth = Some(v * 2.0);
    }
}

/// Find `name(value)` in a filter string and parse the value. Percentage
/// values (`"120%"`) are scaled to fractions.
fn extract_function(filter: &str, name: &str) -> Option<f32> {
    let start = filter.find(name)? + name.len();
    let rest = filter[start..].trim_start();
    let rest = rest.strip_prefix('(')?;
    let end = rest.find(')')?;
    let raw = rest[..end].trim();
    if let Some(pct) = raw.strip_suffix('%') {
        pct.trim().parse::<f32>().ok().map(|v| v / 100.0)
    } else {
        raw.parse::<f32>().ok()
    }
}
