//! `velvet-compositor` — Compositing stage and frame pipeline.
//!
//! One fragment-shader pass combines the video frame with four region masks
//! into the retouched output: edge-aware skin smoothing, global grading,
//! blush, lip tint/gloss, and eyeshadow. The per-pixel semantics live in
//! [`shade`] as pure functions; the GLSL in [`shaders`] mirrors them.
//!
//! [`BeautyPipeline`] is the entry point: it owns the landmark smoother, the
//! mask set, the settings record, and one renderer — [`GlRenderer`] when a
//! context is available, [`SoftwareRenderer`] otherwise.

pub mod gl;
pub mod pipeline;
pub mod shade;
pub mod shaders;
pub mod software;
pub mod uniforms;

mod error;

// Re-export primary API
pub use error::RenderError;
pub use gl::GlRenderer;
pub use pipeline::BeautyPipeline;
pub use software::SoftwareRenderer;
pub use uniforms::{UniformSet, UniformValue};
