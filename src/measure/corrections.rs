//! measure::corrections — receiver, source, and polarisation corrections.
//!
//! Purpose
//! -------
//! Carry previously measured splitting operators that must be removed
//! before (receiver side) or inside (source side) the grid search, plus
//! an optionally known source polarisation. A correction is stored as
//! an angle and an even sample shift so applying it is exact on the
//! grid.
//!
//! Key behaviors
//! -------------
//! - [`Correction::from_time`] snaps a delay time to an even sample
//!   shift with the same rounding as the search grid.
//! - [`CorrectionSet`] groups the three optional pieces; the grid
//!   search reads them as: receiver correction removed once up front,
//!   source correction removed per trial node, polarisation consumed
//!   by statistics that need it.

use crate::wave::{time2samps, Parity};

/// Correction — one splitting operator to remove, as (angle, shift).
///
/// Fields
/// ------
/// - `angle_deg`: `f64`
///   Fast direction of the operator, degrees.
/// - `lag_samples`: `i64`
///   Delay of the operator in samples; even and non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub angle_deg: f64,
    pub lag_samples: i64,
}

impl Correction {
    /// from_time — build a correction from a delay in seconds.
    ///
    /// The delay snaps to the nearest even sample count, matching the
    /// snapping the search grid applies to its own lag axis.
    pub fn from_time(angle_deg: f64, lag_secs: f64, delta: f64) -> Self {
        Correction { angle_deg, lag_samples: time2samps(lag_secs, delta, Parity::Even) }
    }
}

/// CorrectionSet — the optional corrections a measurement can carry.
///
/// Fields
/// ------
/// - `rcv`: `Option<Correction>`
///   Receiver-side operator, removed from the data once before the
///   search.
/// - `src`: `Option<Correction>`
///   Source-side operator, removed inside each trial node with its
///   angle taken relative to the trial fast direction.
/// - `pol`: `Option<f64>`
///   Known source polarisation in degrees, required by
///   polarisation-dependent statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CorrectionSet {
    pub rcv: Option<Correction>,
    pub src: Option<Correction>,
    pub pol: Option<f64>,
}

impl CorrectionSet {
    /// A set with no corrections and no known polarisation.
    pub fn none() -> Self {
        CorrectionSet::default()
    }
}
