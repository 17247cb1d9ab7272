//! Confidence analysis for splitting measurements.
//!
//! Purpose
//! -------
//! Turn a searched error surface into quoted uncertainties: estimate
//! the effective degrees of freedom of the noise from its spectrum,
//! threshold the surface with an F test, and read one-sigma errors off
//! the resulting confidence region with the angle axis treated as
//! cyclic.
//!
//! Submodules
//! ----------
//! - `errors`: [`ConfidenceError`] and the crate-standard result alias.
//! - `ndf`: spectral degrees-of-freedom estimation (Walsh et al. 2013).
//! - `ftest`: the F-test threshold and membership mask.
//! - `bounds`: one-sigma errors from the mask.

pub mod bounds;
pub mod errors;
pub mod ftest;
pub mod ndf;

pub use bounds::bounds;
pub use errors::{ConfidenceError, ConfidenceResult};
pub use ftest::conf_level;
pub use ndf::degrees_of_freedom;

pub mod prelude {
    //! Single-import surface for confidence analysis.
    pub use super::bounds::bounds;
    pub use super::errors::{ConfidenceError, ConfidenceResult};
    pub use super::ftest::conf_level;
    pub use super::ndf::degrees_of_freedom;
}
