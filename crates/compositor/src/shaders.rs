//! Static GLSL sources for the compositing program.
//!
//! The fragment shader mirrors the reference math in [`shade`](crate::shade)
//! stage for stage; keep the two in sync when touching either.

/// Fullscreen-quad vertex shader: positions and UVs from two vertex buffers.
pub const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec2 a_uv;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

/// Single-pass retouching shader: skin smoothing, grading, blush, lip
/// tint/gloss, eyeshadow.
pub const FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 v_uv;
out vec4 frag_color;

uniform sampler2D u_frame;
uniform sampler2D u_face_mask;
uniform sampler2D u_lip_mask;
uniform sampler2D u_blush_mask;
uniform sampler2D u_eye_mask;

uniform vec2 u_resolution;
uniform float u_smoothing;
uniform float u_brightness;
uniform float u_contrast;
uniform float u_saturation;
uniform float u_warmth;
uniform vec3 u_lip_color;
uniform float u_lip_intensity;
uniform float u_lip_gloss;
uniform vec3 u_blush_color;
uniform float u_blush_intensity;
uniform vec3 u_eye_shadow_color;
uniform float u_eye_shadow_intensity;

vec3 rgb2hsv(vec3 c) {
    vec4 K = vec4(0.0, -1.0 / 3.0, 2.0 / 3.0, -1.0);
    vec4 p = mix(vec4(c.bg, K.wz), vec4(c.gb, K.xy), step(c.b, c.g));
    vec4 q = mix(vec4(p.xyw, c.r), vec4(c.r, p.yzx), step(p.x, c.r));
    float d = q.x - min(q.w, q.y);
    float e = 1.0e-10;
    return vec3(abs(q.z + (q.w - q.y) / (6.0 * d + e)), d / (q.x + e), q.x);
}

vec3 hsv2rgb(vec3 c) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(c.xxx + K.xyz) * 6.0 - K.www);
    return c.z * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), c.y);
}

float soft_light_ch(float base, float blend) {
    if (blend < 0.5) {
        return 2.0 * base * blend + base * base * (1.0 - 2.0 * blend);
    }
    return 2.0 * base * (1.0 - blend) + sqrt(base) * (2.0 * blend - 1.0);
}

vec3 soft_light(vec3 base, vec3 blend) {
    return vec3(
        soft_light_ch(base.r, blend.r),
        soft_light_ch(base.g, blend.g),
        soft_light_ch(base.b, blend.b)
    );
}

float overlay_ch(float base, float blend) {
    if (base < 0.5) {
        return 2.0 * base * blend;
    }
    return 1.0 - 2.0 * (1.0 - base) * (1.0 - blend);
}

vec3 overlay_blend(vec3 base, vec3 blend) {
    return vec3(
        overlay_ch(base.r, blend.r),
        overlay_ch(base.g, blend.g),
        overlay_ch(base.b, blend.b)
    );
}

void main() {
    vec4 src = texture(u_frame, v_uv);
    vec3 color = src.rgb;

    float face = texture(u_face_mask, v_uv).r;
    float lip = texture(u_lip_mask, v_uv).r;
    float blush = texture(u_blush_mask, v_uv).r;
    float eye = texture(u_eye_mask, v_uv).r;
    float skin = face * (1.0 - lip * 0.9) * (1.0 - eye * 0.95);

    // Edge-aware smoothing, scoped to skin texels.
    if (u_smoothing >= 0.15 && skin >= 0.1) {
        vec2 texel = 1.5 / u_resolution;
        vec2 offsets[4] = vec2[](
            vec2(texel.x, 0.0), vec2(-texel.x, 0.0),
            vec2(0.0, texel.y), vec2(0.0, -texel.y)
        );
        vec3 accum = vec3(0.0);
        float weight_sum = 0.0;
        for (int i = 0; i < 4; ++i) {
            vec3 neighbor = texture(u_frame, v_uv + offsets[i]).rgb;
            float d = distance(neighbor, color);
            float w = exp(-(d * d) / (2.0 * 0.1 * 0.1)) * 0.8;
            accum += neighbor * w;
            weight_sum += w;
        }
        if (weight_sum > 0.0) {
            vec3 blurred = accum / weight_sum;
            float amount = clamp(face * u_smoothing * 0.7, 0.0, 0.5);
            color = mix(color, blurred, amount);
        }
    }

    // Grading: brightness, contrast, saturation, warmth, in that order.
    color *= u_brightness;
    color = (color - 0.5) * u_contrast + 0.5;
    vec3 hsv = rgb2hsv(clamp(color, 0.0, 1.0));
    hsv.y = clamp(hsv.y * u_saturation, 0.0, 1.0);
    color = hsv2rgb(hsv);
    color.r += u_warmth * 0.08;
    color.b -= u_warmth * 0.04;
    color = clamp(color, 0.0, 1.0);

    if (u_blush_intensity > 0.0 && blush > 0.02) {
        vec3 blended = soft_light(color, u_blush_color);
        color = mix(color, blended, smoothstep(0.0, 0.5, blush) * u_blush_intensity * 0.35);
    }

    if (u_lip_intensity > 0.0 && lip > 0.05) {
        vec3 tint = mix(color * u_lip_color * 1.2, u_lip_color, 0.5);
        float lum = dot(color, vec3(0.299, 0.587, 0.114));
        tint = mix(tint, tint * lum * 1.5, 0.3);
        color = mix(color, tint, smoothstep(0.0, 0.4, lip) * u_lip_intensity * 0.55);
        if (u_lip_gloss > 0.0) {
            float falloff = max(0.0, 1.0 - abs(v_uv.y - 0.5) * 4.0);
            color += pow(falloff, 3.0) * u_lip_gloss * lip;
        }
    }

    if (u_eye_shadow_intensity > 0.0 && eye > 0.05) {
        vec3 blended = overlay_blend(color, u_eye_shadow_color);
        color = mix(color, blended, smoothstep(0.0, 0.5, eye) * u_eye_shadow_intensity * 0.3);
    }

    frag_color = vec4(clamp(color, 0.0, 1.0), src.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_shader_declares_every_uniform() {
        for name in [
            "u_frame",
            "u_face_mask",
            "u_lip_mask",
            "u_blush_mask",
            "u_eye_mask",
            "u_resolution",
            "u_smoothing",
            "u_brightness",
            "u_contrast",
            "u_saturation",
            "u_warmth",
            "u_lip_color",
            "u_lip_intensity",
            "u_lip_gloss",
            "u_blush_color",
            "u_blush_intensity",
            "u_eye_shadow_color",
            "u_eye_shadow_intensity",
        ] {
            assert!(FRAGMENT_SHADER.contains(name), "missing uniform {name}");
        }
    }

    #[test]
    fn shader_stage_constants_match_reference_math() {
        // thresholds and coefficients mirrored from the shade module
        assert!(FRAGMENT_SHADER.contains("u_smoothing >= 0.15"));
        assert!(FRAGMENT_SHADER.contains("skin >= 0.1"));
        assert!(FRAGMENT_SHADER.contains("1.5 / u_resolution"));
        assert!(FRAGMENT_SHADER.contains("1.0 - lip * 0.9"));
        assert!(FRAGMENT_SHADER.contains("1.0 - eye * 0.95"));
        assert!(FRAGMENT_SHADER.contains("* 0.55"));
        assert!(FRAGMENT_SHADER.contains("* 0.35"));
        assert!(FRAGMENT_SHADER.contains("* 0.3"));
    }
}
