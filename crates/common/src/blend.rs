//! Blend mode definitions and per-channel compositing formulas.
//!
//! The cosmetic overlays use the standard Photoshop-style piecewise blend
//! formulas. Unlike a full layer compositor only the modes the retouching
//! stage actually draws with are provided here.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Blend modes used by the cosmetic compositing stage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
}

impl BlendMode {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Multiply => "Multiply",
            Self::Screen => "Screen",
            Self::Overlay => "Overlay",
            Self::SoftLight => "Soft Light",
        }
    }

    /// All blend modes in display order.
    pub fn all() -> &'static [BlendMode] {
        &[
            Self::Normal,
            Self::Multiply,
            Self::Screen,
            Self::Overlay,
            Self::SoftLight,
        ]
    }
}

/// Overlay blend for a single channel. Branches on `base < 0.5`.
pub fn overlay(base: f32, blend: f32) -> f32 {
    if base < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    }
}

/// Soft-light blend for a single channel (Photoshop formula, branch on
/// `blend < 0.5`).
pub fn soft_light(base: f32, blend: f32) -> f32 {
    if blend < 0.5 {
        2.0 * base * blend + base * base * (1.0 - 2.0 * blend)
    } else {
        2.0 * base * (1.0 - blend) + base.sqrt() * (2.0 * blend - 1.0)
    }
}

/// Apply a blend mode per channel.
pub fn blend_channel(mode: BlendMode, base: f32, blend: f32) -> f32 {
    match mode {
        BlendMode::Normal => blend,
        BlendMode::Multiply => base * blend,
        BlendMode::Screen => 1.0 - (1.0 - base) * (1.0 - blend),
        BlendMode::Overlay => overlay(base, blend),
        BlendMode::SoftLight => soft_light(base, blend),
    }
}

/// Apply a blend mode across an RGB triple.
pub fn blend_rgb(mode: BlendMode, base: Rgb, blend: Rgb) -> Rgb {
    [
        blend_channel(mode, base[0], blend[0]),
        blend_channel(mode, base[1], blend[1]),
        blend_channel(mode, base[2], blend[2]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_branches_on_base() {
        // dark base: multiply-like
        assert!((overlay(0.25, 0.5) - 0.25).abs() < 1e-6);
        // light base: screen-like
        assert!((overlay(0.75, 0.5) - 0.75).abs() < 1e-6);
        // continuity at the branch point
        let below = overlay(0.4999, 0.3);
        let above = overlay(0.5001, 0.3);
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn soft_light_branches_on_blend() {
        // blend below 0.5 darkens a mid base
        assert!(soft_light(0.5, 0.25) < 0.5);
        // blend above 0.5 lightens a mid base
        assert!(soft_light(0.5, 0.75) > 0.5);
        // neutral blend leaves the base untouched
        assert!((soft_light(0.3, 0.5) - 0.3).abs() < 1e-6);
        assert!((soft_light(0.8, 0.5) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn blend_modes_stay_in_range() {
        for &mode in BlendMode::all() {
            for i in 0..=10 {
                for j in 0..=10 {
                    let base = i as f32 / 10.0;
                    let blend = j as f32 / 10.0;
                    let out = blend_channel(mode, base, blend);
                    assert!(
                        (0.0..=1.0 + 1e-6).contains(&out),
                        "{mode:?} left range: blend({base}, {blend}) = {out}"
                    );
                }
            }
        }
    }

    #[test]
    fn normal_returns_blend_color() {
        let out = blend_rgb(BlendMode::Normal, [0.1, 0.2, 0.3], [0.9, 0.8, 0.7]);
        assert_eq!(out, [0.9, 0.8, 0.7]);
    }

    #[test]
    fn multiply_with_white_is_identity() {
        let base = [0.2, 0.5, 0.8];
        assert_eq!(blend_rgb(BlendMode::Multiply, base, [1.0, 1.0, 1.0]), base);
    }
}
