//! wave::window — analysis-window geometry over sampled traces.
//!
//! Purpose
//! -------
//! Represent the rectangular analysis window used to restrict a waveform
//! pair to the shear-wave arrival. A window is an odd sample width plus an
//! integer offset from the trace's geometric centre, so the same window
//! value stays meaningful as traces shrink symmetrically under the lag
//! operator.
//!
//! Key behaviors
//! -------------
//! - Validate the odd, ≥ 1 width constraint at construction.
//! - Derive start/end sample indices for a given trace length, clamped to
//!   the valid sample range.
//! - Build a window from a `(start_time, end_time)` pair honouring the
//!   even/odd parity rules of time-to-sample conversion.
//!
//! Invariants & assumptions
//! ------------------------
//! - `width` is odd and ≥ 1; `offset` measures samples from the centre
//!   sample of the host trace and may be negative.
//! - A `Window` is immutable once constructed; builder-style methods
//!   derive modified copies rather than mutating one in place.
//!
//! Conventions
//! -----------
//! - `start`/`end` are inclusive sample indices.
//! - The optional `taper` fraction is carried as metadata for callers that
//!   apply a cosine taper before spectral estimates; the chop operation
//!   itself is rectangular.

use crate::wave::errors::{WaveError, WaveResult};
use crate::wave::ops::{time2samps, Parity};

/// Window — odd-width analysis window centred near a trace's midpoint.
///
/// Purpose
/// -------
/// Describe the sample range `[start, end]` used to chop a waveform pair
/// to its analysis segment, as a width plus an offset from the trace
/// centre rather than absolute indices, so the window composes with the
/// symmetric-lag operator.
///
/// Fields
/// ------
/// - `width`: `usize`
///   Odd sample count covered by the window, ≥ 1.
/// - `offset`: `isize`
///   Signed sample offset of the window centre from the trace centre.
/// - `taper`: `Option<f64>`
///   Optional Tukey taper fraction carried for spectral callers; unused
///   by the rectangular chop itself.
///
/// Invariants
/// ----------
/// - `width % 2 == 1` and `width >= 1`, enforced by [`Window::new`].
/// - For any trace length `n`, `start(n) <= end(n)` and both are clamped
///   into `[0, n-1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    width: usize,
    offset: isize,
    taper: Option<f64>,
}

impl Window {
    /// Construct a window of odd `width` samples offset from the trace centre.
    ///
    /// Parameters
    /// ----------
    /// - `width`: `usize`
    ///   Sample count covered by the window; must be odd and ≥ 1.
    /// - `offset`: `isize`
    ///   Signed offset of the window centre from the trace centre sample.
    ///
    /// Returns
    /// -------
    /// `WaveResult<Window>`
    ///   - `Ok(Window)` when the width constraint holds.
    ///   - `Err(WaveError::ZeroWindowWidth)` when `width == 0`.
    ///   - `Err(WaveError::EvenWindowWidth(width))` when `width` is even.
    pub fn new(width: usize, offset: isize) -> WaveResult<Self> {
        if width == 0 {
            return Err(WaveError::ZeroWindowWidth);
        }
        if width % 2 == 0 {
            return Err(WaveError::EvenWindowWidth(width));
        }
        Ok(Window { width, offset, taper: None })
    }

    /// Construct a window from inclusive `(start, end)` times on a trace.
    ///
    /// The centre time maps to a sample offset from the trace centre; the
    /// width is the even sample span of `end - start` plus one, so a span
    /// of `k` sample intervals covers `k + 1` samples and stays odd.
    ///
    /// Parameters
    /// ----------
    /// - `start`, `end`: `f64`
    ///   Window limits in seconds from the start of the trace; must
    ///   satisfy `start <= end`.
    /// - `delta`: `f64`
    ///   Sample interval of the host trace, strictly positive.
    /// - `nsamps`: `usize`
    ///   Length of the host trace, used to locate its centre sample.
    ///
    /// Returns
    /// -------
    /// `WaveResult<Window>`
    ///   - `Err(WaveError::InvalidTimeRange { .. })` when `start > end`.
    ///   - `Err(WaveError::NonPositiveDelta(..))` when `delta <= 0`.
    pub fn from_times(start: f64, end: f64, delta: f64, nsamps: usize) -> WaveResult<Self> {
        if delta <= 0.0 {
            return Err(WaveError::NonPositiveDelta(delta));
        }
        if start > end {
            return Err(WaveError::InvalidTimeRange { start, end });
        }
        let time_centre = (start + end) / 2.0;
        let centre_samp = time2samps(time_centre, delta, Parity::Any);
        let offset = centre_samp - (nsamps / 2) as i64;
        // even span plus one keeps the width odd
        let width = time2samps(end - start, delta, Parity::Even) + 1;
        Window::new(width as usize, offset as isize)
    }

    /// Width of the window in samples (odd, ≥ 1).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Signed sample offset of the window centre from the trace centre.
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Optional Tukey taper fraction.
    pub fn taper(&self) -> Option<f64> {
        self.taper
    }

    /// Return a copy of this window with a Tukey taper fraction attached.
    pub fn with_taper(self, fraction: f64) -> Self {
        Window { taper: Some(fraction), ..self }
    }

    /// Centre sample index of the window on a trace of `nsamps` samples.
    pub fn centre(&self, nsamps: usize) -> isize {
        (nsamps / 2) as isize + self.offset
    }

    /// First sample index covered on a trace of `nsamps` samples, clamped
    /// into `[0, nsamps-1]`.
    pub fn start(&self, nsamps: usize) -> usize {
        let half = ((self.width - 1) / 2) as isize;
        let start = self.centre(nsamps) - half;
        start.clamp(0, nsamps.saturating_sub(1) as isize) as usize
    }

    /// Last sample index covered on a trace of `nsamps` samples (inclusive),
    /// clamped into `[0, nsamps-1]`.
    pub fn end(&self, nsamps: usize) -> usize {
        let half = ((self.width - 1) / 2) as isize;
        let end = self.centre(nsamps) + half;
        end.clamp(0, nsamps.saturating_sub(1) as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Width validation (odd, non-zero) at construction.
    // - Start/end derivation, including clamping at trace boundaries.
    // - Time-pair construction parity rules.
    //
    // They intentionally DO NOT cover:
    // - Interaction with the lag operator; that lives in the grid-search
    //   tests where the window centre shrinks with the trial shift.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify width validation rejects zero and even widths and accepts an
    // odd width.
    //
    // Given
    // -----
    // - Widths 0, 10, and 11 at zero offset.
    //
    // Expect
    // ------
    // - 0 -> ZeroWindowWidth, 10 -> EvenWindowWidth, 11 -> Ok.
    fn window_new_enforces_odd_nonzero_width() {
        // Act & Assert
        assert_eq!(Window::new(0, 0), Err(WaveError::ZeroWindowWidth));
        assert_eq!(Window::new(10, 0), Err(WaveError::EvenWindowWidth(10)));
        assert!(Window::new(11, 0).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a centred window on an odd trace covers a symmetric
    // range about the centre sample.
    //
    // Given
    // -----
    // - A width-5 window at zero offset on a 21-sample trace (centre 10).
    //
    // Expect
    // ------
    // - start = 8 and end = 12.
    fn window_start_end_symmetric_about_centre() {
        // Arrange
        let w = Window::new(5, 0).expect("width 5 is valid");

        // Assert
        assert_eq!(w.start(21), 8);
        assert_eq!(w.end(21), 12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that start/end are clamped when the offset pushes the window
    // past the trace boundary.
    //
    // Given
    // -----
    // - A width-5 window offset by +9 on a 21-sample trace, so the raw
    //   end index would be 21.
    //
    // Expect
    // ------
    // - end is clamped to 20, start stays at 17.
    fn window_start_end_clamped_to_trace() {
        // Arrange
        let w = Window::new(5, 9).expect("width 5 is valid");

        // Assert
        assert_eq!(w.start(21), 17);
        assert_eq!(w.end(21), 20);
    }

    #[test]
    // Purpose
    // -------
    // Verify that from_times builds an odd-width window spanning the
    // requested interval and rejects inverted time ranges.
    //
    // Given
    // -----
    // - A 101-sample trace at delta = 0.1 s, so the centre sits at
    //   sample 50 (t = 5.0 s); a window from 4.0 s to 6.0 s.
    //
    // Expect
    // ------
    // - Width 21 samples (20 intervals + 1), zero offset.
    // - Inverted limits produce InvalidTimeRange.
    fn window_from_times_spans_requested_interval() {
        // Act
        let w = Window::from_times(4.0, 6.0, 0.1, 101).expect("valid time range");

        // Assert
        assert_eq!(w.width(), 21);
        assert_eq!(w.offset(), 0);
        match Window::from_times(6.0, 4.0, 0.1, 101) {
            Err(WaveError::InvalidTimeRange { .. }) => (),
            other => panic!("expected InvalidTimeRange, got {other:?}"),
        }
    }

}
