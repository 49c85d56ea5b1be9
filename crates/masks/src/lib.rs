//! `velvet-masks` — Region mask rasterization.
//!
//! Given a smoothed landmark set and the output resolution, this crate
//! rasterizes four independent single-channel alpha masks — face, lips,
//! blush, eyes — into owned [`MaskPlane`] buffers. The planes are cleared
//! and fully repainted on every detection and re-used frame to frame; the
//! compositor uploads them as textures (GL path) or samples them directly
//! (software tests).
//!
//! Rasterization primitives live in [`raster`]: even-odd scanline polygon
//! fill (single and compound paths), elliptical radial gradients with
//! arbitrary alpha stops, and a separable triple-box blur approximating a
//! Gaussian.

pub mod blush;
pub mod eyes;
pub mod face;
pub mod lips;
pub mod plane;
pub mod raster;
pub mod set;

#[cfg(test)]
pub(crate) mod testutil;

pub use plane::MaskPlane;
pub use set::{skin_mask, MaskSet};
