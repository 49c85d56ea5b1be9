//! Compositor error types.

use thiserror::Error;

/// Errors surfaced by renderer construction and per-frame rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A shader stage failed to compile; carries the driver's info log.
    #[error("{stage} shader compile failed: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    /// The shader program failed to link.
    #[error("Shader program link failed: {log}")]
    ProgramLink { log: String },

    /// A GL object could not be created.
    #[error("GL resource creation failed: {0}")]
    ResourceCreate(String),

    /// The supplied frame does not match the pipeline resolution.
    #[error("Frame resolution {got} does not match pipeline resolution {expected}")]
    ResolutionMismatch { expected: String, got: String },

    /// Frame data was rejected at the ingestion boundary.
    #[error("Frame error: {0}")]
    Frame(#[from] velvet_common::FrameError),

    /// The pipeline was destroyed; no further calls are accepted.
    #[error("Pipeline has been destroyed")]
    Destroyed,
}
