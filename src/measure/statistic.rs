//! measure::statistic — misfit statistics evaluated at each grid node.
//!
//! Purpose
//! -------
//! Define the catalogue of splitting statistics and evaluate them on a
//! windowed, trial-corrected waveform pair. Every statistic maps two
//! equal-length traces to a scalar; the grid search stores that scalar
//! per node and optimises it in the statistic's preferred sense.
//!
//! Key behaviors
//! -------------
//! - [`Statistic::evaluate`] computes the node value plus, for the
//!   eigenvalue statistic, the companion larger eigenvalue.
//! - [`Statistic::sense`] reports whether the optimum is a minimum
//!   (residual-style statistics) or a maximum (similarity-style).
//! - [`Statistic::needs_polarisation`] flags the transverse-energy
//!   statistic, which is undefined without a source polarisation.
//!
//! Theoretical notes
//! -----------------
//! The eigenvalue statistic is the smaller eigenvalue of the 2×2
//! covariance of the corrected pair (Silver & Chan 1991): at the true
//! correction the particle motion is linearised and the second
//! eigenvalue collapses to the noise level. For a symmetric 2×2 matrix
//! the eigenvalues follow in closed form from the trace and
//! determinant, so no linear-algebra backend is needed.

use ndarray::Array1;

/// Optimisation sense of a statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// The best node has the smallest value (residual statistics).
    Minimize,
    /// The best node has the largest value (similarity statistics).
    Maximize,
}

/// Tail of a bootstrap distribution retained when forming a one-sided
/// confidence distribution: the side of worse-than-median fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    Upper,
    Lower,
}

/// Statistic — the misfit measure evaluated at every (angle, lag) node.
///
/// Variants
/// --------
/// - `Eigenvalue`
///   Smaller eigenvalue λ₂ of the corrected pair's covariance; the
///   classic Silver & Chan measure. Minimised.
/// - `CrossCorrelation`
///   Normalised zero-lag cross-correlation of the corrected fast and
///   slow components, absolute value. Maximised.
/// - `TransverseEnergy`
///   Energy on the transverse component after rotating the corrected
///   pair to the source polarisation. Minimised; requires a known
///   polarisation.
/// - `Pearson`
///   Pearson correlation coefficient of the corrected components,
///   absolute value. Maximised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    #[default]
    Eigenvalue,
    CrossCorrelation,
    TransverseEnergy,
    Pearson,
}

/// A statistic evaluated at one grid node.
///
/// `lam1` is populated only by the eigenvalue statistic, where the
/// larger eigenvalue is reported alongside for quality control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatValue {
    pub scalar: f64,
    pub lam1: Option<f64>,
}

impl Statistic {
    /// Whether the optimum of this statistic is a minimum or a maximum.
    pub fn sense(&self) -> Sense {
        match self {
            Statistic::Eigenvalue | Statistic::TransverseEnergy => Sense::Minimize,
            Statistic::CrossCorrelation | Statistic::Pearson => Sense::Maximize,
        }
    }

    /// Whether this statistic needs a source polarisation to be defined.
    pub fn needs_polarisation(&self) -> bool {
        matches!(self, Statistic::TransverseEnergy)
    }

    /// Bootstrap tail kept for a one-sided confidence distribution:
    /// worse fits sit above the median for a minimised statistic and
    /// below it for a maximised one.
    pub fn bootstrap_tail(&self) -> Tail {
        match self.sense() {
            Sense::Minimize => Tail::Upper,
            Sense::Maximize => Tail::Lower,
        }
    }

    /// evaluate — compute the statistic on one corrected, windowed pair.
    ///
    /// Parameters
    /// ----------
    /// - `x`, `y`: `&Array1<f64>`
    ///   Equal-length corrected components. For `TransverseEnergy` the
    ///   caller must already have rotated the pair so that `y` is the
    ///   transverse component.
    ///
    /// Returns
    /// -------
    /// - `StatValue`
    ///   The node value; `lam1` is `Some` only for `Eigenvalue`.
    ///
    /// Notes
    /// -----
    /// Degenerate inputs (zero variance) yield 0.0 for the
    /// similarity statistics rather than NaN.
    pub fn evaluate(&self, x: &Array1<f64>, y: &Array1<f64>) -> StatValue {
        match self {
            Statistic::Eigenvalue => {
                let (lam1, lam2) = eigvalcov(x, y);
                StatValue { scalar: lam2, lam1: Some(lam1) }
            }
            Statistic::CrossCorrelation => {
                StatValue { scalar: crosscorr(x, y).abs(), lam1: None }
            }
            Statistic::TransverseEnergy => {
                StatValue { scalar: transenergy(y), lam1: None }
            }
            Statistic::Pearson => StatValue { scalar: pearson(x, y).abs(), lam1: None },
        }
    }
}

/// eigvalcov — eigenvalues of the 2×2 covariance of a trace pair.
///
/// Returns
/// -------
/// - `(f64, f64)`
///   `(lam1, lam2)` with `lam1 >= lam2 >= 0` up to rounding.
///
/// Notes
/// -----
/// The covariance is mean-removed and unbiased (N − 1 denominator).
/// Uses the closed form for a symmetric 2×2 matrix,
/// λ = (t ± √(t² − 4d)) / 2 with t the trace and d the determinant.
/// The discriminant is clamped at zero against rounding.
pub fn eigvalcov(x: &Array1<f64>, y: &Array1<f64>) -> (f64, f64) {
    let n = x.len() as f64;
    let xc = x - x.sum() / n;
    let yc = y - y.sum() / n;
    let cxx = xc.dot(&xc) / (n - 1.0);
    let cyy = yc.dot(&yc) / (n - 1.0);
    let cxy = xc.dot(&yc) / (n - 1.0);

    let trace = cxx + cyy;
    let det = cxx * cyy - cxy * cxy;
    let disc = (trace * trace - 4.0 * det).max(0.0).sqrt();

    ((trace + disc) / 2.0, (trace - disc) / 2.0)
}

/// crosscorr — normalised zero-lag cross-correlation, in [-1, 1].
pub fn crosscorr(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let norm = (x.dot(x) * y.dot(y)).sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    x.dot(y) / norm
}

/// transenergy — total energy of one component, Σ y².
pub fn transenergy(y: &Array1<f64>) -> f64 {
    y.dot(y)
}

/// pearson — Pearson correlation coefficient of two traces, in [-1, 1].
///
/// Identical to [`crosscorr`] on mean-removed traces.
pub fn pearson(x: &Array1<f64>, y: &Array1<f64>) -> f64 {
    let n = x.len() as f64;
    let xc = x - x.sum() / n;
    let yc = y - y.sum() / n;
    crosscorr(&xc, &yc)
}
