//! Color conversion and interpolation helpers.
//!
//! All color math operates on linear-ish RGB triples in `[0, 1]` f32 space,
//! matching what the compositing shader consumes.

/// RGB triple, each channel in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Opaque white, the fallback for unparseable user-supplied colors.
pub const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Parse a hex color string (`#rrggbb`, `rrggbb`, or `#rgb`) into an RGB triple.
///
/// Returns [`WHITE`] on any parse failure — user-supplied colors must never
/// crash the pipeline, so bad input degrades to a visible-but-wrong default.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(WHITE)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // expand each nibble (e.g. "f" -> 0xff)
            Some([
                (r * 17) as f32 / 255.0,
                (g * 17) as f32 / 255.0,
                (b * 17) as f32 / 255.0,
            ])
        }
        _ => None,
    }
}

/// Convert RGB to HSV. Hue is in `[0, 360)`, S and V in `[0, 1]`.
pub fn rgb_to_hsv(rgb: Rgb) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta < f32::EPSILON {
        0.0
    } else if (max - r).abs() < f32::EPSILON {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max < f32::EPSILON { 0.0 } else { delta / max };

    [h, s, max]
}

/// Convert HSV back to RGB. Inverse of [`rgb_to_hsv`].
pub fn hsv_to_rgb(hsv: [f32; 3]) -> Rgb {
    let [h, s, v] = hsv;
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}

/// Rec. 601 luma of an RGB triple.
pub fn luminance(rgb: Rgb) -> f32 {
    0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2]
}

/// Linear interpolation between two scalars.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Per-channel linear interpolation between two RGB triples.
pub fn mix_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        mix(a[0], b[0], t),
        mix(a[1], b[1], t),
        mix(a[2], b[2], t),
    ]
}

/// Hermite smoothstep, matching the GLSL builtin.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp01((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Clamp a scalar to `[0, 1]`.
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Clamp each channel of an RGB triple to `[0, 1]`.
pub fn clamp_rgb(rgb: Rgb) -> Rgb {
    [clamp01(rgb[0]), clamp01(rgb[1]), clamp01(rgb[2])]
}
