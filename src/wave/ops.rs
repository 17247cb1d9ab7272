//! wave::ops — elementary vector operations on two-component traces.
//!
//! Purpose
//! -------
//! Implement the low-level array arithmetic under every splitting
//! measurement: orthonormal rotation of a component pair, the symmetric
//! even-sample lag operator, window chopping, the composed split/unsplit
//! operators, and time ↔ sample conversion with parity control.
//!
//! Key behaviors
//! -------------
//! - `rotate` applies a norm-preserving 2-D rotation; rotating by `deg`
//!   then `-deg` reproduces the input to floating-point tolerance.
//! - `lag` shifts trace 1 forward and trace 2 backward by `n/2` samples
//!   each and truncates to the common overlap, so an odd input length
//!   stays odd (the shift `n` must be even).
//! - `split`/`unsplit` compose rotate — lag — rotate back, modelling (or
//!   removing) an anisotropic delay along a given fast direction.
//! - `time2samps` converts seconds to a sample count and bumps the result
//!   to the requested parity, since windows need odd and shifts even
//!   counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers pass equal-length traces; the pair-level validation in
//!   `wave::waveform` is the boundary where mismatches are rejected, so
//!   these free functions only guard the constraints specific to each
//!   operation (lag parity and overlap).
//! - All functions are pure and allocate fresh output arrays; inputs are
//!   never mutated.
//!
//! Conventions
//! -----------
//! - Angles are degrees measured in the instrument frame; a positive
//!   rotation moves component 1 toward component 2.
//! - A positive lag advances trace 1 relative to trace 2.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the rotation round-trip law, lag parity and length
//!   bookkeeping, chop index arithmetic, and the split/unsplit inverse
//!   relationship on a delta spike.

use ndarray::{s, Array1};

use crate::wave::errors::{WaveError, WaveResult};
use crate::wave::window::Window;

/// Parity — sample-count parity requested from [`time2samps`].
///
/// `Even` is used for relative shifts (split symmetrically between the
/// two components), `Odd` for window widths (a unique centre sample),
/// `Any` for plain conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Any,
    Even,
    Odd,
}

/// Convert a time in seconds to a sample count honouring a parity rule.
///
/// Parameters
/// ----------
/// - `time`: `f64`
///   Duration in seconds; may be negative for signed offsets.
/// - `delta`: `f64`
///   Sample interval, assumed positive (validated by callers).
/// - `parity`: [`Parity`]
///   Parity constraint; when the rounded count violates it, the count is
///   bumped away from zero by one sample.
///
/// Returns
/// -------
/// `i64`
///   The nearest sample count satisfying the parity rule.
pub fn time2samps(time: f64, delta: f64, parity: Parity) -> i64 {
    let samps = (time / delta).round() as i64;
    let bump = if samps < 0 { -1 } else { 1 };
    match parity {
        Parity::Any => samps,
        Parity::Even => {
            if samps % 2 == 0 {
                samps
            } else {
                samps + bump
            }
        }
        Parity::Odd => {
            if samps % 2 != 0 {
                samps
            } else {
                samps + bump
            }
        }
    }
}

/// Convert a sample count back to a time in seconds.
pub fn samps2time(samps: i64, delta: f64) -> f64 {
    samps as f64 * delta
}

/// Rotate a two-component pair by `degrees` (orthonormal, norm-preserving).
///
/// Parameters
/// ----------
/// - `x`, `y`: `&Array1<f64>`
///   Equal-length component traces.
/// - `degrees`: `f64`
///   Rotation angle in degrees.
///
/// Returns
/// -------
/// `(Array1<f64>, Array1<f64>)`
///   The rotated pair; `rotate(rotate(x, y, d), -d)` round-trips to the
///   input within floating-point tolerance.
pub fn rotate(x: &Array1<f64>, y: &Array1<f64>, degrees: f64) -> (Array1<f64>, Array1<f64>) {
    let ang = degrees.to_radians();
    let (sin, cos) = ang.sin_cos();
    let rx = x * cos + y * sin;
    let ry = y * cos - x * sin;
    (rx, ry)
}

/// Apply a symmetric relative shift of `nsamps` samples to a pair.
///
/// Trace 1 is shifted forward and trace 2 backward by `nsamps/2` samples
/// each, and both are truncated to the common overlapping region, so the
/// output length is `len - |nsamps|` and odd input parity is preserved.
///
/// Parameters
/// ----------
/// - `x`, `y`: `&Array1<f64>`
///   Equal-length component traces.
/// - `nsamps`: `i64`
///   Relative shift in samples; must be even. Negative values reverse
///   the shift direction.
///
/// Returns
/// -------
/// `WaveResult<(Array1<f64>, Array1<f64>)>`
///   - `Err(WaveError::OddLagSamples(nsamps))` for odd shifts.
///   - `Err(WaveError::LagExceedsTrace { .. })` when `|nsamps| >= len`.
pub fn lag(x: &Array1<f64>, y: &Array1<f64>, nsamps: i64) -> WaveResult<(Array1<f64>, Array1<f64>)> {
    if nsamps == 0 {
        return Ok((x.clone(), y.clone()));
    }
    if nsamps % 2 != 0 {
        return Err(WaveError::OddLagSamples(nsamps));
    }
    let n = x.len();
    let shift = nsamps.unsigned_abs() as usize;
    if shift >= n {
        return Err(WaveError::LagExceedsTrace { lag: nsamps, nsamps: n });
    }
    if nsamps > 0 {
        Ok((x.slice(s![shift..]).to_owned(), y.slice(s![..n - shift]).to_owned()))
    } else {
        Ok((x.slice(s![..n - shift]).to_owned(), y.slice(s![shift..]).to_owned()))
    }
}

/// Restrict a pair to a window's inclusive `[start, end]` sample range.
pub fn chop(
    x: &Array1<f64>,
    y: &Array1<f64>,
    window: &Window,
) -> (Array1<f64>, Array1<f64>) {
    let n = x.len();
    let (start, end) = (window.start(n), window.end(n));
    (
        x.slice(s![start..=end]).to_owned(),
        y.slice(s![start..=end]).to_owned(),
    )
}

/// Restrict a single trace to a window's inclusive sample range.
pub fn chop_one(x: &Array1<f64>, window: &Window) -> Array1<f64> {
    let n = x.len();
    x.slice(s![window.start(n)..=window.end(n)]).to_owned()
}

/// Apply a splitting operator: rotate to `degrees`, lag by `nsamps`,
/// rotate back.
///
/// Models the anisotropic delay a shear wave accrues traversing a layer
/// whose fast axis lies at `degrees`; [`unsplit`] is its inverse.
pub fn split(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degrees: f64,
    nsamps: i64,
) -> WaveResult<(Array1<f64>, Array1<f64>)> {
    if nsamps == 0 {
        return Ok((x.clone(), y.clone()));
    }
    let (fx, fy) = rotate(x, y, degrees);
    let (lx, ly) = lag(&fx, &fy, nsamps)?;
    Ok(rotate(&lx, &ly, -degrees))
}

/// Remove a splitting operator: rotate to `degrees`, lag by `-nsamps`,
/// rotate back. Inverse of [`split`].
pub fn unsplit(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degrees: f64,
    nsamps: i64,
) -> WaveResult<(Array1<f64>, Array1<f64>)> {
    split(x, y, degrees, -nsamps)
}

/// Remove a least-squares linear trend from a trace.
///
/// Used before the spectral degrees-of-freedom estimate so a drifting
/// baseline does not masquerade as low-frequency noise power.
pub fn detrend(y: &Array1<f64>) -> Array1<f64> {
    let n = y.len();
    if n < 2 {
        return y.clone();
    }
    let nf = n as f64;
    let t_mean = (nf - 1.0) / 2.0;
    let y_mean = y.sum() / nf;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &v) in y.iter().enumerate() {
        let dt = i as f64 - t_mean;
        num += dt * (v - y_mean);
        den += dt * dt;
    }
    let slope = num / den;
    Array1::from_iter(
        y.iter()
            .enumerate()
            .map(|(i, &v)| v - y_mean - slope * (i as f64 - t_mean)),
    )
}

/// Signal-to-noise ratio of Restivo & Helffrich (1999).
///
/// The peak amplitude on the signal (radial) component over twice the
/// standard deviation of the noise (transverse) component of a windowed,
/// polarization-rotated pair.
pub fn snr_rh(signal: &Array1<f64>, noise: &Array1<f64>) -> f64 {
    let peak = signal.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    let n = noise.len() as f64;
    let mean = noise.sum() / n;
    let var = noise.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / n;
    peak / (2.0 * var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Array1<f64> {
        Array1::from_iter((0..n).map(|i| i as f64))
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parity bumping in time2samps.
    // - Rotation round-trip and norm preservation.
    // - Lag parity checks, overlap truncation, and centre symmetry.
    // - Split followed by unsplit recovering the input.
    //
    // They intentionally DO NOT cover:
    // - Grid-search behaviour built on these primitives (measure tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the parity rules of time2samps, including the away-from-zero
    // bump for negative times.
    //
    // Given
    // -----
    // - 1.2 s at delta = 0.1 s, which rounds to 12 samples.
    //
    // Expect
    // ------
    // - Any -> 12, Even -> 12, Odd -> 13 (bumped up by one).
    // - A negative odd count bumps away from zero under Even.
    fn time2samps_honours_parity() {
        assert_eq!(time2samps(1.2, 0.1, Parity::Any), 12);
        assert_eq!(time2samps(1.2, 0.1, Parity::Even), 12);
        assert_eq!(time2samps(1.2, 0.1, Parity::Odd), 13);
        assert_eq!(time2samps(-0.3, 0.1, Parity::Even), -4);
    }

    #[test]
    // Purpose
    // -------
    // Verify that rotating by +deg then -deg reproduces the input and
    // that the rotation preserves the vector norm samplewise.
    //
    // Given
    // -----
    // - A short arbitrary pair rotated by 37.5 degrees.
    //
    // Expect
    // ------
    // - Round-trip error below 1e-12 per sample.
    // - x^2 + y^2 unchanged per sample below 1e-12.
    fn rotate_round_trips_and_preserves_norm() {
        // Arrange
        let x = Array1::from(vec![1.0, -2.0, 0.5, 3.0, -0.25]);
        let y = Array1::from(vec![0.3, 0.7, -1.1, 0.0, 2.0]);

        // Act
        let (rx, ry) = rotate(&x, &y, 37.5);
        let (bx, by) = rotate(&rx, &ry, -37.5);

        // Assert
        for i in 0..x.len() {
            assert!((bx[i] - x[i]).abs() < 1e-12, "x round-trip at {i}");
            assert!((by[i] - y[i]).abs() < 1e-12, "y round-trip at {i}");
            let before = x[i] * x[i] + y[i] * y[i];
            let after = rx[i] * rx[i] + ry[i] * ry[i];
            assert!((before - after).abs() < 1e-12, "norm at {i}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify lag bookkeeping: even-shift enforcement, output length
    // len - |n|, and the symmetric slicing of the two traces.
    //
    // Given
    // -----
    // - Two 11-sample ramps lagged by +4 samples.
    //
    // Expect
    // ------
    // - Odd shift is rejected with OddLagSamples.
    // - Output length is 7 (odd preserved); x starts at sample 4, y at 0.
    fn lag_truncates_to_common_overlap() {
        // Arrange
        let x = ramp(11);
        let y = ramp(11);

        // Act & Assert: parity
        match lag(&x, &y, 3) {
            Err(WaveError::OddLagSamples(3)) => (),
            other => panic!("expected OddLagSamples(3), got {other:?}"),
        }

        // Act
        let (lx, ly) = lag(&x, &y, 4).expect("even shift within trace");

        // Assert
        assert_eq!(lx.len(), 7);
        assert_eq!(ly.len(), 7);
        assert_eq!(lx[0], 4.0);
        assert_eq!(ly[0], 0.0);

        // Negative shift mirrors the slicing.
        let (nx, ny) = lag(&x, &y, -4).expect("even shift within trace");
        assert_eq!(nx[0], 0.0);
        assert_eq!(ny[0], 4.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a shift consuming the whole trace is rejected rather
    // than producing an empty pair.
    //
    // Given
    // -----
    // - 5-sample traces and a 6-sample shift.
    //
    // Expect
    // ------
    // - LagExceedsTrace with both payloads.
    fn lag_rejects_shift_beyond_trace() {
        let x = ramp(5);
        let y = ramp(5);
        match lag(&x, &y, 6) {
            Err(WaveError::LagExceedsTrace { lag: 6, nsamps: 5 }) => (),
            other => panic!("expected LagExceedsTrace, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that unsplit(split(pair)) recovers the original pair on the
    // overlapping region.
    //
    // Given
    // -----
    // - A 31-sample pair with a centred spike on x, split at 30 degrees
    //   with a 4-sample lag, then unsplit with the same parameters.
    //
    // Expect
    // ------
    // - The recovered pair matches the original's central samples to
    //   1e-12 (each operation trims 4 samples, 2 per side).
    fn split_then_unsplit_recovers_centre() {
        // Arrange
        let n = 31;
        let mut xv = vec![0.0; n];
        xv[n / 2] = 1.0;
        xv[n / 2 - 1] = 0.5;
        xv[n / 2 + 1] = 0.5;
        let x = Array1::from(xv);
        let y = Array1::from(vec![0.0; n]);

        // Act
        let (sx, sy) = split(&x, &y, 30.0, 4).expect("valid split");
        let (ux, uy) = unsplit(&sx, &sy, 30.0, 4).expect("valid unsplit");

        // Assert: compare to the original centre region (trimmed 4 per op)
        let trim = 4;
        for i in 0..ux.len() {
            assert!((ux[i] - x[i + trim]).abs() < 1e-12, "x at {i}");
            assert!((uy[i] - y[i + trim]).abs() < 1e-12, "y at {i}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that detrend removes an exact linear ramp.
    //
    // Given
    // -----
    // - y = 3 + 0.5 t for t = 0..20.
    //
    // Expect
    // ------
    // - All residuals below 1e-10.
    fn detrend_removes_linear_ramp() {
        let y = Array1::from_iter((0..21).map(|t| 3.0 + 0.5 * t as f64));
        let r = detrend(&y);
        assert!(r.iter().all(|v| v.abs() < 1e-10), "residual trend left: {r:?}");
    }
}
