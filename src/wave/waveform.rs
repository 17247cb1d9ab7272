//! wave::waveform — the validated two-component waveform pair.
//!
//! Purpose
//! -------
//! Own the two equal-length component traces of a shear-wave record
//! together with their sample interval, display unit, analysis window,
//! and the azimuth of component 1. All parity and shape invariants the
//! measurement layer relies on are enforced once, at construction.
//!
//! Key behaviors
//! -------------
//! - Validate odd, equal lengths, a positive sample interval, and finite
//!   samples in [`WaveformPair::new`].
//! - Track the azimuth of component 1 (`cmp_angle`) so [`rotate_to`] is an
//!   absolute operation and repeated rotations do not accumulate error
//!   bookkeeping in callers.
//! - Provide pair-level split/unsplit in time units, window accessors in
//!   seconds, and the principal-axis polarization estimate used when no
//!   source polarization is supplied.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len()`, odd; `delta > 0`; all samples finite.
//! - The pair is never mutated by the measurement layer; corrections are
//!   applied to explicit copies.
//!
//! Conventions
//! -----------
//! - `cmp_angle` is degrees; a freshly constructed pair has component 1
//!   at 0°.
//! - The default window covers the odd third of the trace about its
//!   centre, mirroring the original tooling's guess.
//!
//! [`rotate_to`]: WaveformPair::rotate_to

use ndarray::Array1;

use crate::wave::errors::{WaveError, WaveResult};
use crate::wave::ops::{self, time2samps, Parity};
use crate::wave::window::Window;

/// WaveformPair — two equal-length component traces plus their geometry.
///
/// Purpose
/// -------
/// Serve as the validated input to grid search, correction, and bootstrap
/// routines: two real traces, a strictly positive sample interval, a
/// display unit, an analysis window, and the azimuth of component 1.
///
/// Fields
/// ------
/// - `x`, `y`: `Array1<f64>`
///   The component traces; equal odd lengths, finite samples.
/// - `delta`: `f64`
///   Sample interval in seconds, strictly positive.
/// - `units`: `String`
///   Display unit label for the time axis (reporting only).
/// - `window`: [`Window`]
///   Analysis window; defaults to the odd third of the trace.
/// - `cmp_angle`: `f64`
///   Azimuth of component 1 in degrees; 0 at construction.
///
/// Invariants
/// ----------
/// - Length, parity, finiteness, and `delta > 0` hold for the lifetime of
///   the value; mutating operations (`rotate_to`, `split`, `unsplit`,
///   `chop`) preserve them (the lag operator trims an even sample count,
///   keeping the length odd).
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformPair {
    x: Array1<f64>,
    y: Array1<f64>,
    delta: f64,
    units: String,
    window: Window,
    cmp_angle: f64,
}

impl WaveformPair {
    /// Construct a validated waveform pair with the default window.
    ///
    /// Parameters
    /// ----------
    /// - `x`, `y`: `Array1<f64>`
    ///   Component traces; must be equal-length, odd, and finite.
    /// - `delta`: `f64`
    ///   Sample interval in seconds; must be strictly positive.
    ///
    /// Returns
    /// -------
    /// `WaveResult<WaveformPair>`
    ///   - `Err(WaveError::MismatchedLengths(..))` on unequal lengths.
    ///   - `Err(WaveError::EvenSampleCount(..))` on even length.
    ///   - `Err(WaveError::NonPositiveDelta(..))` on `delta <= 0`.
    ///   - `Err(WaveError::NonFiniteSample(..))` on NaN or ±∞ samples.
    pub fn new(x: Array1<f64>, y: Array1<f64>, delta: f64) -> WaveResult<Self> {
        if x.len() != y.len() {
            return Err(WaveError::MismatchedLengths(x.len(), y.len()));
        }
        if x.len() % 2 == 0 {
            return Err(WaveError::EvenSampleCount(x.len()));
        }
        if delta <= 0.0 {
            return Err(WaveError::NonPositiveDelta(delta));
        }
        if let Some(&bad) = x.iter().chain(y.iter()).find(|v| !v.is_finite()) {
            return Err(WaveError::NonFiniteSample(bad));
        }
        let window = default_window(x.len());
        Ok(WaveformPair { x, y, delta, units: "s".to_string(), window, cmp_angle: 0.0 })
    }

    /// Component 1 trace.
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Component 2 trace.
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Sample interval in seconds.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Display unit label.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Set the display unit label.
    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    /// Current analysis window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Replace the analysis window.
    pub fn set_window(&mut self, window: Window) {
        self.window = window;
    }

    /// Set the analysis window from inclusive `(start, end)` times.
    pub fn set_window_times(&mut self, start: f64, end: f64) -> WaveResult<()> {
        self.window = Window::from_times(start, end, self.delta, self.nsamps())?;
        Ok(())
    }

    /// Azimuth of component 1 in degrees.
    pub fn cmp_angle(&self) -> f64 {
        self.cmp_angle
    }

    /// Number of samples per component (odd).
    pub fn nsamps(&self) -> usize {
        self.x.len()
    }

    /// Index of the centre sample.
    pub fn centre_samp(&self) -> usize {
        self.x.len() / 2
    }

    /// Window width in seconds (sample spans, not counts).
    pub fn wwidth(&self) -> f64 {
        (self.window.width() - 1) as f64 * self.delta
    }

    /// Window start time in seconds.
    pub fn wbeg(&self) -> f64 {
        self.window.start(self.nsamps()) as f64 * self.delta
    }

    /// Window end time in seconds.
    pub fn wend(&self) -> f64 {
        self.window.end(self.nsamps()) as f64 * self.delta
    }

    /// Rotate the pair so component 1 points to `degrees` (absolute).
    pub fn rotate_to(&mut self, degrees: f64) {
        let (rx, ry) = ops::rotate(&self.x, &self.y, degrees - self.cmp_angle);
        self.x = rx;
        self.y = ry;
        self.cmp_angle = degrees;
    }

    /// Apply a splitting operator of (`degrees`, `lag_secs`) to the pair.
    ///
    /// The lag converts to the nearest even sample count; the rotation is
    /// taken relative to the current component azimuth. Trims the trace
    /// by the shift, preserving odd length.
    pub fn split(&mut self, degrees: f64, lag_secs: f64) -> WaveResult<()> {
        let nsamps = time2samps(lag_secs, self.delta, Parity::Even);
        let (sx, sy) = ops::split(&self.x, &self.y, degrees - self.cmp_angle, nsamps)?;
        self.x = sx;
        self.y = sy;
        Ok(())
    }

    /// Remove a splitting operator of (`degrees`, `lag_secs`) from the pair.
    pub fn unsplit(&mut self, degrees: f64, lag_secs: f64) -> WaveResult<()> {
        let nsamps = time2samps(lag_secs, self.delta, Parity::Even);
        let (sx, sy) = ops::unsplit(&self.x, &self.y, degrees - self.cmp_angle, nsamps)?;
        self.x = sx;
        self.y = sy;
        Ok(())
    }

    /// Remove a splitting operator expressed directly in samples.
    pub fn unsplit_samples(&mut self, degrees: f64, lag_samples: i64) -> WaveResult<()> {
        let (sx, sy) = ops::unsplit(&self.x, &self.y, degrees - self.cmp_angle, lag_samples)?;
        self.x = sx;
        self.y = sy;
        Ok(())
    }

    /// The pair restricted to the analysis window.
    pub fn chopped(&self) -> (Array1<f64>, Array1<f64>) {
        ops::chop(&self.x, &self.y, &self.window)
    }

    /// Estimate the source polarization as the azimuth of the principal
    /// covariance eigenvector of the windowed pair, in degrees.
    ///
    /// Returns the absolute azimuth (the component azimuth plus the
    /// in-frame principal direction), used when no explicit polarization
    /// is supplied for transverse-energy analysis or noise extraction.
    pub fn estimate_pol(&self) -> f64 {
        let (cx, cy) = self.chopped();
        let n = cx.len() as f64;
        let mx = cx.sum() / n;
        let my = cy.sum() / n;
        let mut cxx = 0.0;
        let mut cyy = 0.0;
        let mut cxy = 0.0;
        for i in 0..cx.len() {
            let dx = cx[i] - mx;
            let dy = cy[i] - my;
            cxx += dx * dx;
            cyy += dy * dy;
            cxy += dx * dy;
        }
        // principal-axis angle of the 2x2 covariance, in the pair frame
        let theta = 0.5 * (2.0 * cxy).atan2(cxx - cyy);
        self.cmp_angle + theta.to_degrees()
    }

    /// Signal-to-noise ratio of Restivo & Helffrich (1999) on the
    /// windowed pair, with component 1 as signal and component 2 as noise.
    pub fn snr(&self) -> f64 {
        let (cx, cy) = self.chopped();
        ops::snr_rh(&cx, &cy)
    }
}

/// Default window: the odd third of the trace about its centre.
fn default_window(nsamps: usize) -> Window {
    let mut width = nsamps / 3;
    if width % 2 == 0 {
        width += 1;
    }
    // width is odd and >= 1 by construction
    Window::new(width.max(1), 0).unwrap_or_else(|_| unreachable!("odd width is always valid"))
}
