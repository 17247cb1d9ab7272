//! bootstrap::resample — sample-level resampling schemes.
//!
//! Purpose
//! -------
//! Provide the two resampling primitives of the bootstrap layer:
//! classic paired resampling with replacement, and spectral noise
//! resampling that keeps a record's amplitude spectrum while
//! randomising its phase (Sandvol & Hearn style surrogates).
//!
//! Key behaviors
//! -------------
//! - [`resample_with_replacement`] draws sample indices, not values,
//!   so the (x, y) pairing of each time sample is preserved.
//! - [`resample_noise`] randomises the phase of every independent
//!   frequency bin and mirrors it conjugately, so the surrogate is
//!   real and has the original amplitude spectrum bin for bin.
//! - Both are deterministic given the caller's RNG state.

use ndarray::Array1;
use rand::Rng;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::bootstrap::errors::{BootstrapError, BootstrapResult};

/// resample_with_replacement — paired index resampling.
///
/// Parameters
/// ----------
/// - `x`, `y`: `&Array1<f64>`
///   Equal-length traces; sample `i` of the output comes from one
///   drawn index applied to both.
/// - `rng`: `&mut impl Rng`
///   Source of index draws.
///
/// Returns
/// -------
/// - `BootstrapResult<(Array1<f64>, Array1<f64>)>`
///
/// Errors
/// ------
/// - `BootstrapError::InsufficientData` for fewer than two samples.
pub fn resample_with_replacement(
    x: &Array1<f64>,
    y: &Array1<f64>,
    rng: &mut impl Rng,
) -> BootstrapResult<(Array1<f64>, Array1<f64>)> {
    let n = x.len();
    if n < 2 {
        return Err(BootstrapError::InsufficientData { nsamps: n });
    }
    let mut rx = Array1::zeros(n);
    let mut ry = Array1::zeros(n);
    for i in 0..n {
        let j = rng.gen_range(0..n);
        rx[i] = x[j];
        ry[i] = y[j];
    }
    Ok((rx, ry))
}

/// resample_noise — phase-randomised surrogate of a noise record.
///
/// The forward FFT is taken, every independent bin gets a uniform
/// random phase with its mirror bin conjugated, and the inverse FFT
/// is returned. Purely real bins (DC, and Nyquist for even lengths)
/// keep their values, so the amplitude spectrum is preserved exactly.
///
/// Parameters
/// ----------
/// - `y`: `&Array1<f64>`
///   The noise record.
/// - `rng`: `&mut impl Rng`
///   Source of phase draws.
///
/// Returns
/// -------
/// - `BootstrapResult<Array1<f64>>`
///   A real surrogate with the same length and amplitude spectrum.
pub fn resample_noise(y: &Array1<f64>, rng: &mut impl Rng) -> BootstrapResult<Array1<f64>> {
    let n = y.len();
    if n < 2 {
        return Err(BootstrapError::InsufficientData { nsamps: n });
    }

    let mut buf: Vec<Complex<f64>> = y.iter().map(|&v| Complex::new(v, 0.0)).collect();
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(n).process(&mut buf);

    // Hermitian symmetry: bins k and n-k must stay conjugate for a
    // real inverse transform.
    let half = (n - 1) / 2;
    for k in 1..=half {
        let amp = buf[k].norm();
        let phase = rng.gen_range(0.0..std::f64::consts::TAU);
        let c = Complex::from_polar(amp, phase);
        buf[k] = c;
        buf[n - k] = c.conj();
    }

    planner.plan_fft_inverse(n).process(&mut buf);
    Ok(Array1::from_iter(buf.into_iter().map(|c| c.re / n as f64)))
}
