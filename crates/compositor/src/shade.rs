//! Reference per-pixel compositing math.
//!
//! These functions are the normative semantics of the fragment shader in
//! [`shaders`](crate::shaders): the GLSL mirrors them stage for stage. The
//! software fallback uses the grading stage directly; the cosmetic stages
//! define what the GL path computes per texel.
//!
//! All color math is in linear `[0, 1]` f32 space. Stage order is fixed:
//! smoothing, grading (brightness, contrast, saturation, warmth), blush,
//! lip, eyeshadow, final clamp.

use velvet_common::blend::{overlay, soft_light};
use velvet_common::color::{
    clamp01, clamp_rgb, hsv_to_rgb, luminance, mix_rgb, rgb_to_hsv, smoothstep, Rgb,
};
use velvet_common::FilterSettings;

/// Skin-mask floor below which the smoothing stage is skipped outright.
pub const SKIN_MASK_MIN: f32 = 0.1;
/// Smoothing-slider floor below which the smoothing stage is skipped.
pub const SMOOTHING_MIN: f32 = 0.15;
/// Neighbor sampling offset for the edge-aware blur, in pixels.
pub const BLUR_SAMPLE_OFFSET: f32 = 1.5;

/// Whether the edge-aware blur runs at all for a texel (cheap reject).
pub fn smoothing_active(skin_mask: f32, smoothing: f32) -> bool {
    skin_mask >= SKIN_MASK_MIN && smoothing >= SMOOTHING_MIN
}

/// Blend factor for mixing the blurred color back into the original.
///
/// Jointly controlled by mask confidence and the smoothing slider, capped at
/// 0.5 so skin never fully loses texture.
pub fn smoothing_mix(face_mask: f32, smoothing: f32) -> f32 {
    (face_mask * smoothing * 0.7).clamp(0.0, 0.5)
}

/// Tone-preserving neighbor weight for the edge-aware blur.
///
/// Neighbors whose color distance from the center is large contribute less:
/// `exp(-d² / (2·0.1²)) · 0.8`.
pub fn bilateral_weight(color_distance: f32) -> f32 {
    (-(color_distance * color_distance) / (2.0 * 0.1 * 0.1)).exp() * 0.8
}

/// Global grading: brightness (multiply), contrast (pivot at 0.5),
/// saturation (HSV S-scale), warmth (push red, pull blue), in that order.
pub fn apply_grading(color: Rgb, settings: &FilterSettings) -> Rgb {
    let mut c = [
        color[0] * settings.brightness,
        color[1] * settings.brightness,
        color[2] * settings.brightness,
    ];
    c = [
        (c[0] - 0.5) * settings.contrast + 0.5,
        (c[1] - 0.5) * settings.contrast + 0.5,
        (c[2] - 0.5) * settings.contrast + 0.5,
    ];

    let mut hsv = rgb_to_hsv(clamp_rgb(c));
    hsv[1] = clamp01(hsv[1] * settings.saturation);
    c = hsv_to_rgb(hsv);

    c[0] += settings.warmth * 0.08;
    c[2] -= settings.warmth * 0.04;
    clamp_rgb(c)
}

/// Blush mix factor: `smoothstep(0, 0.5, mask) · intensity · 0.35`.
pub fn blush_mix(mask: f32, intensity: f32) -> f32 {
    smoothstep(0.0, 0.5, mask) * intensity * 0.35
}

/// Soft-light the blush color onto the graded frame.
pub fn apply_blush(color: Rgb, mask: f32, settings: &FilterSettings) -> Rgb {
    if settings.blush_intensity <= 0.0 || mask <= 0.02 {
        return color;
    }
    let blended = [
        soft_light(color[0], settings.blush_color[0]),
        soft_light(color[1], settings.blush_color[1]),
        soft_light(color[2], settings.blush_color[2]),
    ];
    mix_rgb(color, blended, blush_mix(mask, settings.blush_intensity))
}

/// Lip mix factor: `smoothstep(0, 0.4, mask) · intensity · 0.55`.
pub fn lip_mix(mask: f32, intensity: f32) -> f32 {
    smoothstep(0.0, 0.4, mask) * intensity * 0.55
}

/// Luminance-aware lip tint.
///
/// The tint tracks the lip's existing shading instead of overpainting flat:
/// `tint = mix(color·lipColor·1.2, lipColor, 0.5)` re-mixed with
/// `tint·luminance·1.5` at weight 0.3.
pub fn lip_tint(color: Rgb, lip_color: Rgb) -> Rgb {
    let tinted = [
        color[0] * lip_color[0] * 1.2,
        color[1] * lip_color[1] * 1.2,
        color[2] * lip_color[2] * 1.2,
    ];
    let tint = mix_rgb(tinted, lip_color, 0.5);
    let lum = luminance(color);
    let shaded = [tint[0] * lum * 1.5, tint[1] * lum * 1.5, tint[2] * lum * 1.5];
    mix_rgb(tint, shaded, 0.3)
}

/// Vertically-centered specular highlight shape for lip gloss.
pub fn gloss_highlight(uv_y: f32) -> f32 {
    let falloff = (1.0 - (uv_y - 0.5).abs() * 4.0).max(0.0);
    falloff * falloff * falloff
}

/// Apply lip tint and gloss.
pub fn apply_lip(color: Rgb, mask: f32, uv_y: f32, settings: &FilterSettings) -> Rgb {
    if settings.lip_intensity <= 0.0 || mask <= 0.05 {
        return color;
    }
    let tint = lip_tint(color, settings.lip_color);
    let mut out = mix_rgb(color, tint, lip_mix(mask, settings.lip_intensity));

    if settings.lip_gloss > 0.0 {
        let highlight = gloss_highlight(uv_y) * settings.lip_gloss * mask;
        out = [out[0] + highlight, out[1] + highlight, out[2] + highlight];
    }
    out
}

/// Eyeshadow mix factor: `smoothstep(0, 0.5, mask) · intensity · 0.3`.
pub fn eye_shadow_mix(mask: f32, intensity: f32) -> f32 {
    smoothstep(0.0, 0.5, mask) * intensity * 0.3
}

/// Overlay-blend the eyeshadow color.
pub fn apply_eye_shadow(color: Rgb, mask: f32, settings: &FilterSettings) -> Rgb {
    if settings.eye_shadow_intensity <= 0.0 || mask <= 0.05 {
        return color;
    }
    let blended = [
        overlay(color[0], settings.eye_shadow_color[0]),
        overlay(color[1], settings.eye_shadow_color[1]),
        overlay(color[2], settings.eye_shadow_color[2]),
    ];
    mix_rgb(
        color,
        blended,
        eye_shadow_mix(mask, settings.eye_shadow_intensity),
    )
}

/// Grading plus the three cosmetic overlays for one texel (the shader's
/// stages 4–8; the neighborhood blur of stage 3 needs image context and is
/// handled by the renderers).
pub fn grade_and_overlay(
    color: Rgb,
    lip_mask: f32,
    blush_mask: f32,
    eye_mask: f32,
    uv_y: f32,
    settings: &FilterSettings,
) -> Rgb {
    let mut c = apply_grading(color, settings);
    c = apply_blush(c, blush_mask, settings);
    c = apply_lip(c, lip_mask, uv_y, settings);
    c = apply_eye_shadow(c, eye_mask, settings);
    clamp_rgb(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FilterSettings {
        FilterSettings::default()
    }

    #[test]
    fn grading_is_identity_at_defaults() {
        let s = settings();
        for &color in &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [0.3, 0.6, 0.9], [0.5, 0.5, 0.5]] {
            let out = apply_grading(color, &s);
            for ch in 0..3 {
                assert!(
                    (out[ch] - color[ch]).abs() < 1e-4,
                    "grading changed {color:?} -> {out:?}"
                );
            }
        }
    }

    #[test]
    fn brightness_scales_before_contrast_pivot() {
        let mut s = settings();
        s.brightness = 2.0;
        let out = apply_grading([0.25, 0.25, 0.25], &s);
        assert!((out[0] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn contrast_pivots_at_mid_gray() {
        let mut s = settings();
        s.contrast = 2.0;
        let out = apply_grading([0.5, 0.5, 0.5], &s);
        assert!((out[0] - 0.5).abs() < 1e-5);
        let darker = apply_grading([0.25, 0.25, 0.25], &s);
        assert!(darker[0] < 0.25);
    }

    #[test]
    fn warmth_pushes_red_pulls_blue() {
        let mut s = settings();
        s.warmth = 0.5;
        let out = apply_grading([0.5, 0.5, 0.5], &s);
        assert!((out[0] - 0.54).abs() < 1e-5);
        assert!((out[1] - 0.5).abs() < 1e-5);
        assert!((out[2] - 0.48).abs() < 1e-5);
    }

    #[test]
    fn saturation_zero_grays_out() {
        let mut s = settings();
        s.saturation = 0.0;
        let out = apply_grading([0.8, 0.2, 0.4], &s);
        assert!((out[0] - out[1]).abs() < 1e-5);
        assert!((out[1] - out[2]).abs() < 1e-5);
    }

    #[test]
    fn smoothing_stage_rejects_cheaply() {
        // slider below the threshold bypasses the blur regardless of mask
        assert!(!smoothing_active(1.0, 0.1));
        // weak skin mask bypasses regardless of slider
        assert!(!smoothing_active(0.05, 1.0));
        assert!(smoothing_active(0.5, 0.5));
    }

    #[test]
    fn smoothing_mix_is_capped() {
        assert!((smoothing_mix(1.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((smoothing_mix(0.5, 0.5) - 0.175).abs() < 1e-6);
        assert_eq!(smoothing_mix(0.0, 1.0), 0.0);
    }

    #[test]
    fn bilateral_weight_decays_with_distance() {
        let near = bilateral_weight(0.0);
        let far = bilateral_weight(0.5);
        assert!((near - 0.8).abs() < 1e-6);
        assert!(far < near);
        assert!(far < 1e-5);
    }

    #[test]
    fn lip_mix_at_full_mask_and_intensity() {
        // full mask, full intensity: smoothstep(0, 0.4, 1) * 1 * 0.55 = 0.55
        assert!((lip_mix(1.0, 1.0) - 0.55).abs() < 1e-6);
    }

    #[test]
    fn lip_stage_gates_on_mask_and_intensity() {
        let mut s = settings();
        s.lip_intensity = 1.0;
        s.lip_color = [0.9, 0.4, 0.45];
        let color = [0.6, 0.5, 0.5];
        assert_eq!(apply_lip(color, 0.04, 0.5, &s), color);
        s.lip_intensity = 0.0;
        assert_eq!(apply_lip(color, 1.0, 0.5, &s), color);
    }

    #[test]
    fn lip_tint_tracks_luminance() {
        let lip = [0.9, 0.4, 0.45];
        let bright = lip_tint([0.8, 0.8, 0.8], lip);
        let dark = lip_tint([0.1, 0.1, 0.1], lip);
        // brighter lips keep a brighter tint
        assert!(bright[0] > dark[0]);
    }

    #[test]
    fn gloss_highlight_is_band_limited() {
        assert!(gloss_highlight(0.5) > 0.99);
        assert_eq!(gloss_highlight(0.0), 0.0);
        assert_eq!(gloss_highlight(1.0), 0.0);
        assert!(gloss_highlight(0.6) > gloss_highlight(0.7));
    }

    #[test]
    fn blush_mix_factor() {
        assert!((blush_mix(0.5, 1.0) - 0.35).abs() < 1e-6);
        assert!((blush_mix(1.0, 0.5) - 0.175).abs() < 1e-6);
    }

    #[test]
    fn blush_gates_on_small_masks() {
        let mut s = settings();
        s.blush_intensity = 1.0;
        s.blush_color = [0.9, 0.5, 0.5];
        let color = [0.5, 0.5, 0.5];
        assert_eq!(apply_blush(color, 0.01, &s), color);
        assert_ne!(apply_blush(color, 0.5, &s), color);
    }

    #[test]
    fn eye_shadow_mix_factor() {
        assert!((eye_shadow_mix(1.0, 1.0) - 0.3).abs() < 1e-6);
        assert!((eye_shadow_mix(0.25, 1.0) - 0.5 * 0.3).abs() < 1e-6);
    }

    #[test]
    fn full_stage_order_clamps_output() {
        let mut s = settings();
        s.brightness = 1.25;
        s.warmth = 1.0;
        s.lip_intensity = 1.0;
        s.lip_gloss = 1.0;
        s.lip_color = [1.0, 1.0, 1.0];
        let out = grade_and_overlay([0.95, 0.95, 0.95], 1.0, 0.0, 0.0, 0.5, &s);
        for ch in out {
            assert!((0.0..=1.0).contains(&ch));
        }
    }

    #[test]
    fn overlays_are_identity_at_default_settings() {
        let s = settings();
        let color = [0.4, 0.45, 0.5];
        let out = grade_and_overlay(color, 1.0, 1.0, 1.0, 0.5, &s);
        for ch in 0..3 {
            assert!((out[ch] - color[ch]).abs() < 1e-4);
        }
    }
}
