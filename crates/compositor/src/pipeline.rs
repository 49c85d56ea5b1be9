//! Frame-driven pipeline orchestration.
//!
//! [`BeautyPipeline`] ties the stages together: landmark smoothing, mask
//! repainting, and the per-frame composite. It owns one renderer backend —
//! GL when a context is available and the program builds, otherwise the
//! software fallback — chosen once at construction and never re-attempted
//! per frame.
//!
//! Detection and render cadence are independent: [`update_face_mesh`] runs
//! per detection result, [`render`] per display frame, and the compositor
//! always reuses the most recently painted masks.
//!
//! [`update_face_mesh`]: BeautyPipeline::update_face_mesh
//! [`render`]: BeautyPipeline::render

use tracing::{debug, warn};
use velvet_common::{FilterPreset, FilterSettings, FilterSettingsUpdate, Frame, Resolution};
use velvet_landmarks::{Landmark, LandmarkSmoother};
use velvet_masks::MaskSet;

use crate::error::RenderError;
use crate::gl::GlRenderer;
use crate::software::SoftwareRenderer;

/// Explicit lifecycle tracking so post-destroy calls fail fast instead of
/// touching released GPU handles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Lifecycle {
    Ready,
    Destroyed,
}

enum Backend {
    Gl(GlRenderer),
    Software(SoftwareRenderer),
}

/// The beauty-filter pipeline: smoother, mask set, settings, one renderer.
pub struct BeautyPipeline {
    resolution: Resolution,
    settings: FilterSettings,
    smoother: LandmarkSmoother,
    masks: MaskSet,
    backend: Backend,
    state: Lifecycle,
}

impl BeautyPipeline {
    /// Build a pipeline on the software renderer.
    pub fn new_software(resolution: Resolution) -> Self {
        Self::with_backend(Backend::Software(SoftwareRenderer::new(resolution)), resolution)
    }

    /// Build a pipeline on the GL renderer, falling back to software when
    /// the context is unusable or the shader fails to build.
    ///
    /// Both failure modes demote to the same fallback: a missing context and
    /// a compile/link failure leave the caller with a working (reduced
    /// fidelity) pipeline either way.
    ///
    /// # Safety
    ///
    /// `gl` must be current on this thread and must remain current for the
    /// pipeline's lifetime whenever [`render`], [`resize`], or [`destroy`]
    /// is called.
    ///
    /// [`render`]: BeautyPipeline::render
    /// [`resize`]: BeautyPipeline::resize
    /// [`destroy`]: BeautyPipeline::destroy
    pub unsafe fn with_gl(gl: glow::Context, resolution: Resolution) -> Self {
        match GlRenderer::new(gl, resolution) {
            Ok(renderer) => Self::with_backend(Backend::Gl(renderer), resolution),
            Err(err) => {
                warn!(error = %err, "GL renderer unavailable, using software fallback");
                Self::new_software(resolution)
            }
        }
    }

    fn with_backend(backend: Backend, resolution: Resolution) -> Self {
        Self {
            resolution,
            settings: FilterSettings::default(),
            smoother: LandmarkSmoother::new(),
            masks: MaskSet::new(resolution),
            backend,
            state: Lifecycle::Ready,
        }
    }

    fn check_ready(&self) -> Result<(), RenderError> {
        match self.state {
            Lifecycle::Ready => Ok(()),
            Lifecycle::Destroyed => Err(RenderError::Destroyed),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn masks(&self) -> &MaskSet {
        &self.masks
    }

    /// Whether the GL backend is active (false once fallen back to software).
    pub fn is_gl_accelerated(&self) -> bool {
        matches!(self.backend, Backend::Gl(_))
    }

    /// The composited surface on the software path; `None` on the GL path,
    /// where output lands in the bound framebuffer.
    pub fn output(&self) -> Option<&[u8]> {
        match &self.backend {
            Backend::Software(renderer) => Some(renderer.output()),
            Backend::Gl(_) => None,
        }
    }

    /// Feed one detection result: smooth the landmarks and repaint the
    /// masks, or — on face loss — clear the masks and discard all temporal
    /// state so smoothing never bridges the gap.
    pub fn update_face_mesh(
        &mut self,
        detection: Option<&[Landmark]>,
    ) -> Result<(), RenderError> {
        self.check_ready()?;
        match detection {
            Some(landmarks) => {
                let smoothed = self.smoother.smooth(landmarks);
                self.masks.update(&smoothed);
            }
            None => {
                debug!("Face lost: clearing masks and smoothing state");
                self.smoother.reset();
                self.masks.clear();
            }
        }
        Ok(())
    }

    /// Composite one frame with the current masks and settings.
    pub fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.check_ready()?;
        match &mut self.backend {
            // Safety: `with_gl` established that the context is current on
            // this thread for the pipeline's lifetime.
            Backend::Gl(renderer) => unsafe { renderer.render(frame, &self.masks, &self.settings) },
            Backend::Software(renderer) => renderer.render(frame, &self.settings),
        }
    }

    /// Merge a partial settings update.
    pub fn update_settings(&mut self, update: &FilterSettingsUpdate) -> Result<(), RenderError> {
        self.check_ready()?;
        self.settings.merge(update);
        Ok(())
    }

    /// Apply a human-facing preset through the settings adapter.
    pub fn apply_preset(&mut self, preset: &FilterPreset) -> Result<(), RenderError> {
        self.update_settings(&preset.to_update())
    }

    /// Re-initialize mask planes and renderer surfaces for a new resolution.
    pub fn resize(&mut self, resolution: Resolution) -> Result<(), RenderError> {
        self.check_ready()?;
        self.masks.resize(resolution);
        match &mut self.backend {
            // Safety: see `render`.
            Backend::Gl(renderer) => unsafe { renderer.resize(resolution)? },
            Backend::Software(renderer) => renderer.resize(resolution),
        }
        self.resolution = resolution;
        Ok(())
    }

    /// Release GPU resources. Further calls on any entry point return
    /// [`RenderError::Destroyed`]. Idempotent.
    pub fn destroy(&mut self) {
        if self.state == Lifecycle::Destroyed {
            return;
        }
        if let Backend::Gl(renderer) = &mut self.backend {
            // Safety: see `render`.
            unsafe { renderer.destroy() };
        }
        self.state = Lifecycle::Destroyed;
        debug!("Pipeline destroyed");
    }
}
