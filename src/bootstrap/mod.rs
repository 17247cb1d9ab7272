//! Bootstrap uncertainty analysis for splitting measurements.
//!
//! Purpose
//! -------
//! Complement the parametric F test with resampling: build statistic
//! distributions by paired resampling of the corrected record,
//! propagate uncertainty in upstream corrections, generate
//! phase-randomised noise surrogates, and smooth the draws into a
//! density over the searched surface.
//!
//! Submodules
//! ----------
//! - `errors`: [`BootstrapError`] and the result alias.
//! - `resample`: paired and spectral resampling primitives.
//! - `kde`: Gaussian kernel density estimation (Scott's rule).
//! - `engine`: seeded parallel trials and density summaries.

pub mod engine;
pub mod errors;
pub mod kde;
pub mod resample;

pub use engine::{
    conf_level_from_pdf, estimate_pdf, trim_to_tail, BootstrapEngine, CorrectionInfo,
    ResampleMode,
};
pub use errors::{BootstrapError, BootstrapResult};
pub use kde::GaussianKde;
pub use resample::{resample_noise, resample_with_replacement};

pub mod prelude {
    //! Single-import surface for the bootstrap layer.
    pub use super::engine::{
        conf_level_from_pdf, estimate_pdf, trim_to_tail, BootstrapEngine, CorrectionInfo,
        ResampleMode,
    };
    pub use super::errors::{BootstrapError, BootstrapResult};
    pub use super::kde::GaussianKde;
    pub use super::resample::{resample_noise, resample_with_replacement};
}
