//! confidence::ftest — F-test threshold for the confidence region.
//!
//! Purpose
//! -------
//! Convert an error surface and an effective degrees-of-freedom count
//! into the statistic level bounding the 100(1−α)% confidence region,
//! following the Silver & Chan (1991) F test with two fitted
//! parameters (fast direction and delay).
//!
//! Key behaviors
//! -------------
//! - For a minimised statistic the level sits above the minimum,
//!   `level = min · (1 + (k/(ndf−k)) F)`, and the region is every node
//!   at or below it.
//! - For a maximised statistic the dual form is used,
//!   `level = max / (1 + (k/(ndf−k)) F)`, and the region is every node
//!   at or above it.
//! - `F` is the 1−α quantile of the Fisher–Snedecor distribution with
//!   `(k, ndf)` degrees of freedom.

use ndarray::Array2;
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::confidence::errors::{ConfidenceError, ConfidenceResult};
use crate::measure::statistic::Sense;

/// Number of fitted parameters: the fast direction and the delay.
const K: f64 = 2.0;

/// conf_level — F-test threshold and membership mask for a surface.
///
/// Parameters
/// ----------
/// - `vals`: `&Array2<f64>`
///   The error surface, shape `(nlags, ndegs)`.
/// - `ndf`: `f64`
///   Effective degrees of freedom of the noise.
/// - `alpha`: `f64`
///   Significance level, strictly in (0, 1); 0.05 gives the
///   conventional 95% region.
/// - `sense`: `Sense`
///   Whether the statistic is minimised or maximised.
///
/// Returns
/// -------
/// - `ConfidenceResult<(f64, Array2<bool>)>`
///   The threshold level and the per-node membership mask.
///
/// Errors
/// ------
/// - `ConfidenceError::InvalidAlpha` outside (0, 1).
/// - `ConfidenceError::InsufficientData` when `ndf <= 2`.
/// - `ConfidenceError::Distribution` if the F distribution cannot be
///   built from the given ndf.
pub fn conf_level(
    vals: &Array2<f64>,
    ndf: f64,
    alpha: f64,
    sense: Sense,
) -> ConfidenceResult<(f64, Array2<bool>)> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ConfidenceError::InvalidAlpha(alpha));
    }
    if !ndf.is_finite() || ndf <= K {
        return Err(ConfidenceError::InsufficientData { ndf });
    }

    let fdist = FisherSnedecor::new(K, ndf)
        .map_err(|e| ConfidenceError::Distribution(e.to_string()))?;
    let f = fdist.inverse_cdf(1.0 - alpha);
    let inflation = 1.0 + (K / (ndf - K)) * f;

    let (level, mask) = match sense {
        Sense::Minimize => {
            let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
            let level = min * inflation;
            (level, vals.mapv(|v| v <= level))
        }
        Sense::Maximize => {
            let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let level = max / inflation;
            (level, vals.mapv(|v| v >= level))
        }
    };
    Ok((level, mask))
}
