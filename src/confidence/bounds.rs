//! confidence::bounds — one-sigma errors from the confidence region.
//!
//! Purpose
//! -------
//! Convert the confidence-region membership mask into one-sigma errors
//! on the fast direction and the delay, taken as a quarter of the
//! region's extent along each axis.
//!
//! Key behaviors
//! -------------
//! - The lag axis is linear: the extent runs from the first to the
//!   last flagged lag row, inclusive.
//! - The fast axis is cyclic with period 180°, so a region touching
//!   one end wraps to the other. The extent is found by doubling the
//!   per-angle flags and measuring the longest run of unflagged
//!   columns; the shortest arc containing every flagged column is the
//!   axis length minus that run.
//!
//! Invariants & assumptions
//! ------------------------
//! - A mask that flags nothing or everything carries no information
//!   and is refused as degenerate.

use ndarray::Array2;

use crate::confidence::errors::{ConfidenceError, ConfidenceResult};

/// bounds — one-sigma (dfast, dlag) from a membership mask.
///
/// Parameters
/// ----------
/// - `mask`: `&Array2<bool>`
///   Confidence-region membership, shape `(nlags, ndegs)`.
/// - `deg_step`: `f64` / `lag_step`: `f64`
///   Grid steps of the two axes.
///
/// Returns
/// -------
/// - `ConfidenceResult<(f64, f64)>`
///   `(dfast, dlag)`: a quarter of the region's angular arc and lag
///   extent respectively.
///
/// Errors
/// ------
/// - `ConfidenceError::DegenerateRegion` when the mask is all false or
///   all true.
pub fn bounds(mask: &Array2<bool>, deg_step: f64, lag_step: f64) -> ConfidenceResult<(f64, f64)> {
    let any_true = mask.iter().any(|&b| b);
    let all_true = mask.iter().all(|&b| b);
    if !any_true || all_true {
        return Err(ConfidenceError::DegenerateRegion);
    }

    // Lag axis: first to last flagged row, inclusive.
    let row_flags: Vec<bool> = mask.rows().into_iter().map(|r| r.iter().any(|&b| b)).collect();
    let first = row_flags.iter().position(|&b| b).unwrap_or(0);
    let last = row_flags.iter().rposition(|&b| b).unwrap_or(0);
    let dlag = (last - first + 1) as f64 * lag_step * 0.25;

    // Fast axis: shortest cyclic arc containing every flagged column.
    let col_flags: Vec<bool> =
        mask.columns().into_iter().map(|c| c.iter().any(|&b| b)).collect();
    let dfast = cyclic_extent(&col_flags) as f64 * deg_step * 0.25;

    Ok((dfast, dlag))
}

/// Length of the shortest cyclic run covering all true entries.
///
/// Doubles the vector and takes the largest gap between consecutive
/// true indices; the covering run is the length minus that gap.
fn cyclic_extent(flags: &[bool]) -> usize {
    let n = flags.len();
    let doubled: Vec<usize> = flags
        .iter()
        .chain(flags.iter())
        .enumerate()
        .filter_map(|(i, &b)| b.then_some(i))
        .collect();
    let longest_gap = doubled.windows(2).map(|w| w[1] - w[0] - 1).max().unwrap_or(0);
    n - longest_gap.min(n - 1)
}
