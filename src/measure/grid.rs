//! measure::grid — candidate (angle, lag) grid for the splitting search.
//!
//! Purpose
//! -------
//! Build and validate the two search axes: trial fast directions in
//! degrees and trial delay times. Lag times are snapped to even sample
//! counts at construction so that every shift in the search preserves
//! the odd trace length, and the snapped set is deduplicated and sorted
//! so the lag axis is strictly increasing.
//!
//! Key behaviors
//! -------------
//! - [`SearchGrid::new`] validates both axes and snaps lags to even
//!   sample shifts; the time axis is recomputed from the snapped shifts
//!   so times and sample counts can never disagree.
//! - [`SearchGrid::default_for`] derives the conventional axes from a
//!   waveform pair: angles −90°..90° in 2° steps and forty lags spanning
//!   up to a quarter of the analysis window.
//!
//! Invariants
//! ----------
//! - `lags[i] == slags[i] as f64 * delta` for every node.
//! - `slags` is strictly increasing, every entry even and non-negative.
//! - Angles are unique modulo the 180° period of a fast direction.

use ndarray::Array1;

use crate::measure::errors::{MeasureError, MeasureResult};
use crate::wave::{time2samps, Parity, WaveformPair};

/// Number of lag nodes on the default axis.
const DEFAULT_NLAGS: usize = 40;
/// Angle step of the default axis, degrees.
const DEFAULT_DEG_STEP: f64 = 2.0;

/// SearchGrid — validated candidate axes for the splitting grid search.
///
/// Fields
/// ------
/// - `degs`: `Array1<f64>`
///   Trial fast directions in degrees, unique modulo 180°.
/// - `lags`: `Array1<f64>`
///   Trial delay times in seconds, recomputed from the snapped shifts.
/// - `slags`: `Array1<i64>`
///   Trial delays in samples: even, non-negative, strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGrid {
    degs: Array1<f64>,
    lags: Array1<f64>,
    slags: Array1<i64>,
}

impl SearchGrid {
    /// new — validate axes and snap lag times to even sample shifts.
    ///
    /// Parameters
    /// ----------
    /// - `degs`: `Array1<f64>`
    ///   Candidate fast directions in degrees.
    /// - `lags`: `&Array1<f64>`
    ///   Candidate delay times in seconds, non-negative.
    /// - `delta`: `f64`
    ///   Sample interval of the traces the grid will search.
    /// - `nsamps`: `usize`
    ///   Trace length in samples, used to refuse shifts that leave
    ///   fewer than three samples.
    ///
    /// Returns
    /// -------
    /// - `MeasureResult<SearchGrid>`
    ///
    /// Errors
    /// ------
    /// - `MeasureError::EmptyAngles` / `EmptyLags`
    /// - `MeasureError::NegativeLag` for any negative lag time.
    /// - `MeasureError::DuplicateAngle` for angles equal modulo 180°.
    /// - `MeasureError::LagExceedsWindow` when the largest snapped shift
    ///   leaves fewer than three samples of trace.
    ///
    /// Notes
    /// -----
    /// Distinct lag times that snap to the same even shift are merged,
    /// so the output axis can be shorter than the input.
    pub fn new(
        degs: Array1<f64>,
        lags: &Array1<f64>,
        delta: f64,
        nsamps: usize,
    ) -> MeasureResult<Self> {
        if degs.is_empty() {
            return Err(MeasureError::EmptyAngles);
        }
        if lags.is_empty() {
            return Err(MeasureError::EmptyLags);
        }
        for (i, &a) in degs.iter().enumerate() {
            for &b in degs.iter().take(i) {
                let r = (a - b).rem_euclid(180.0);
                if r < 1e-9 || r > 180.0 - 1e-9 {
                    return Err(MeasureError::DuplicateAngle(a));
                }
            }
        }

        let mut slags: Vec<i64> = Vec::with_capacity(lags.len());
        for &lag in lags {
            if lag < 0.0 {
                return Err(MeasureError::NegativeLag(lag));
            }
            slags.push(time2samps(lag, delta, Parity::Even));
        }
        slags.sort_unstable();
        slags.dedup();

        let max_slag = *slags.last().unwrap_or(&0);
        if max_slag as usize + 3 > nsamps {
            return Err(MeasureError::LagExceedsWindow { slag: max_slag, nsamps });
        }

        let snapped = Array1::from_iter(slags.iter().map(|&s| s as f64 * delta));
        Ok(SearchGrid { degs, lags: snapped, slags: Array1::from_vec(slags) })
    }

    /// default_for — conventional axes for a waveform pair.
    ///
    /// Angles span −90° to 90° (exclusive) in 2° steps; lags span zero
    /// to a quarter of the analysis-window duration in forty nodes.
    pub fn default_for(pair: &WaveformPair) -> MeasureResult<Self> {
        let nsteps = (180.0 / DEFAULT_DEG_STEP) as usize;
        let degs = Array1::from_iter((0..nsteps).map(|i| -90.0 + i as f64 * DEFAULT_DEG_STEP));

        let max_lag = pair.wwidth() / 4.0;
        let lags = Array1::from_iter(
            (0..DEFAULT_NLAGS).map(|i| max_lag * i as f64 / (DEFAULT_NLAGS - 1) as f64),
        );

        SearchGrid::new(degs, &lags, pair.delta(), pair.nsamps())
    }

    pub fn degs(&self) -> &Array1<f64> {
        &self.degs
    }

    pub fn lags(&self) -> &Array1<f64> {
        &self.lags
    }

    pub fn slags(&self) -> &Array1<i64> {
        &self.slags
    }

    /// Angle step of the axis, degrees. Meaningful once there are at
    /// least two angles; a single-angle axis reports 0.
    pub fn deg_step(&self) -> f64 {
        if self.degs.len() < 2 {
            0.0
        } else {
            self.degs[1] - self.degs[0]
        }
    }

    /// Lag step of the axis, seconds. A single-lag axis reports 0.
    pub fn lag_step(&self) -> f64 {
        if self.lags.len() < 2 {
            0.0
        } else {
            self.lags[1] - self.lags[0]
        }
    }
}
