//! confidence::ndf — spectral degrees-of-freedom estimation.
//!
//! Purpose
//! -------
//! Estimate the effective number of degrees of freedom in a noise
//! record from its amplitude spectrum, following Walsh, Arnold &
//! Savage (2013). Band-limited noise carries far fewer independent
//! samples than its length suggests, and the F test needs the
//! effective count.
//!
//! Key behaviors
//! -------------
//! - The full complex FFT is taken and the endpoint bins (DC and the
//!   last bin) are half-weighted, matching the trapezoidal spectral
//!   sums of the reference derivation.
//! - `ndf = 2 (2 E2² / E4 − 1)` with `E2 = Σ a A²` and
//!   `E4 = Σ (4a²/3) A⁴` over the weighted amplitude spectrum `A`.
//! - White noise yields an ndf of the order of the record length; a
//!   pure sinusoid collapses to a handful regardless of length.

use ndarray::Array1;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::confidence::errors::{ConfidenceError, ConfidenceResult};
use crate::wave::{chop_one, detrend, Window};

/// degrees_of_freedom — effective ndf of a noise trace.
///
/// Parameters
/// ----------
/// - `y`: `&Array1<f64>`
///   The noise record, conventionally the transverse component of the
///   corrected, polarisation-rotated pair.
/// - `window`: `Option<&Window>`
///   Restrict the estimate to a window first; pass `None` when the
///   trace is already chopped.
/// - `remove_trend`: `bool`
///   Remove a least-squares linear trend before the FFT, so baseline
///   drift does not masquerade as low-frequency power.
///
/// Returns
/// -------
/// - `ConfidenceResult<f64>`
///   The effective degrees of freedom; not an integer.
///
/// Errors
/// ------
/// - `ConfidenceError::EmptySpectrum` for an empty or identically zero
///   record.
pub fn degrees_of_freedom(
    y: &Array1<f64>,
    window: Option<&Window>,
    remove_trend: bool,
) -> ConfidenceResult<f64> {
    let mut trace = match window {
        Some(w) => chop_one(y, w),
        None => y.clone(),
    };
    if remove_trend {
        trace = detrend(&trace);
    }
    let n = trace.len();
    if n == 0 {
        return Err(ConfidenceError::EmptySpectrum);
    }

    let mut buf: Vec<Complex<f64>> =
        trace.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buf);

    // Endpoint bins carry half weight in the spectral sums.
    let mut e2 = 0.0;
    let mut e4 = 0.0;
    for (i, c) in buf.iter().enumerate() {
        let a = if i == 0 || i == n - 1 { 0.5 } else { 1.0 };
        let amp2 = c.norm_sqr();
        e2 += a * amp2;
        e4 += (4.0 * a * a / 3.0) * amp2 * amp2;
    }
    if e4 == 0.0 {
        return Err(ConfidenceError::EmptySpectrum);
    }

    Ok(2.0 * (2.0 * e2 * e2 / e4 - 1.0))
}
