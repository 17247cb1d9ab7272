//! measure::gridsearch — evaluate a statistic over the (angle, lag) grid.
//!
//! Purpose
//! -------
//! Run the core search: for every candidate fast direction and delay,
//! remove the trial splitting operator from the data, restrict to the
//! analysis window, and evaluate the chosen statistic. Columns of the
//! surface (one per trial angle) are independent, so they are evaluated
//! in parallel.
//!
//! Key behaviors
//! -------------
//! - The pair is rotated so component 1 sits at 0° before the search,
//!   making trial angles absolute fast directions.
//! - A receiver correction is removed once, up front; a source
//!   correction is removed per node with its angle taken relative to
//!   the trial angle, since the source operator acts in the medium
//!   frame of the trial split.
//! - The analysis window is positioned relative to the trace centre, so
//!   each trial's trimming moves the window by half the shift and the
//!   same window value serves every node.
//! - When a source polarisation is supplied, each node is rotated to
//!   the (polarisation − trial angle) frame before evaluation; the
//!   transverse-energy statistic refuses to run without one.
//!
//! Invariants & assumptions
//! ------------------------
//! - The grid was validated against the uncorrected trace length; the
//!   fit of the window after corrections is re-checked here because the
//!   receiver correction shortens the trace.

use ndarray::Array2;
use rayon::prelude::*;

use crate::measure::corrections::CorrectionSet;
use crate::measure::errors::{MeasureError, MeasureResult};
use crate::measure::grid::SearchGrid;
use crate::measure::statistic::{StatValue, Statistic};
use crate::measure::surface::ErrorSurface;
use crate::wave::{chop, lag, rotate, unsplit, WaveformPair, Window};

/// grid_search — evaluate `statistic` at every node of `grid`.
///
/// Parameters
/// ----------
/// - `pair`: `&WaveformPair`
///   The record to search; its analysis window selects the samples
///   entering the statistic. The pair itself is not modified.
/// - `grid`: `&SearchGrid`
///   Validated candidate axes.
/// - `statistic`: `Statistic`
///   The misfit measure evaluated per node.
/// - `corrections`: `&CorrectionSet`
///   Optional receiver/source operators and source polarisation.
///
/// Returns
/// -------
/// - `MeasureResult<ErrorSurface>`
///   The full surface, shape `(nlags, ndegs)`, with the companion
///   larger eigenvalue populated for the eigenvalue statistic.
///
/// Errors
/// ------
/// - `MeasureError::WindowTooNarrow` for windows under three samples.
/// - `MeasureError::MissingPolarisation` when the statistic needs one.
/// - `MeasureError::LagExceedsWindow` when, after corrections, the
///   largest trial shift pushes the window off the trace.
/// - `MeasureError::InvalidInput` for waveform-level failures while
///   applying corrections.
pub fn grid_search(
    pair: &WaveformPair,
    grid: &SearchGrid,
    statistic: Statistic,
    corrections: &CorrectionSet,
) -> MeasureResult<ErrorSurface> {
    let window = *pair.window();
    if window.width() < 3 {
        return Err(MeasureError::WindowTooNarrow(window.width()));
    }
    if statistic.needs_polarisation() && corrections.pol.is_none() {
        return Err(MeasureError::MissingPolarisation);
    }

    // Trial angles are absolute once component 1 points north.
    let mut work = pair.clone();
    work.rotate_to(0.0);
    let (mut x, mut y) = (work.x().clone(), work.y().clone());

    if let Some(rcv) = corrections.rcv {
        let (ux, uy) = unsplit(&x, &y, rcv.angle_deg, rcv.lag_samples)?;
        x = ux;
        y = uy;
    }

    let nsamps = x.len();
    let max_slag = grid.slags().iter().copied().max().unwrap_or(0);
    if max_slag as usize + 3 > nsamps
        || !window_fits(&window, nsamps - max_slag as usize)
    {
        return Err(MeasureError::LagExceedsWindow { slag: max_slag, nsamps });
    }

    let degs: Vec<f64> = grid.degs().to_vec();
    let slags: Vec<i64> = grid.slags().to_vec();
    let pol = corrections.pol;
    let src = corrections.src;

    let columns: Vec<MeasureResult<Vec<StatValue>>> = degs
        .par_iter()
        .map(|&ang| {
            let (rx, ry) = rotate(&x, &y, ang);
            slags
                .iter()
                .map(|&shift| {
                    let (mut tx, mut ty) = lag(&rx, &ry, -shift)?;
                    if let Some(src) = src {
                        let (sx, sy) =
                            unsplit(&tx, &ty, src.angle_deg - ang, src.lag_samples)?;
                        tx = sx;
                        ty = sy;
                    }
                    let (mut cx, mut cy) = chop(&tx, &ty, &window);
                    if let Some(pol) = pol {
                        let (px, py) = rotate(&cx, &cy, pol - ang);
                        cx = px;
                        cy = py;
                    }
                    Ok(statistic.evaluate(&cx, &cy))
                })
                .collect()
        })
        .collect();

    let (nlags, ndegs) = (slags.len(), degs.len());
    let mut vals = Array2::zeros((nlags, ndegs));
    let mut lam1 =
        matches!(statistic, Statistic::Eigenvalue).then(|| Array2::zeros((nlags, ndegs)));
    for (i, column) in columns.into_iter().enumerate() {
        for (j, node) in column?.into_iter().enumerate() {
            vals[[j, i]] = node.scalar;
            if let Some(l1) = lam1.as_mut() {
                l1[[j, i]] = node.lam1.unwrap_or(f64::NAN);
            }
        }
    }

    Ok(ErrorSurface {
        vals,
        lam1,
        degs: grid.degs().clone(),
        lags: grid.lags().clone(),
        slags: grid.slags().clone(),
        statistic,
    })
}

/// Whether a centre-relative window lies fully on a trace of `nsamps`.
fn window_fits(window: &Window, nsamps: usize) -> bool {
    let half = ((window.width() - 1) / 2) as isize;
    let centre = (nsamps / 2) as isize + window.offset();
    centre - half >= 0 && centre + half <= nsamps as isize - 1
}

/// data_corr — the pair with the winning operator (and any receiver and
/// source corrections) removed.
///
/// Used after a search to inspect the corrected particle motion and to
/// extract the residual component for noise-level estimates.
///
/// Parameters
/// ----------
/// - `pair`: `&WaveformPair`
///   The original record.
/// - `fast`: `f64` / `lag_secs`: `f64`
///   The measured splitting operator.
/// - `corrections`: `&CorrectionSet`
///   The corrections the search was run with; removed in the same
///   order (receiver, then the measured operator, then source).
pub fn data_corr(
    pair: &WaveformPair,
    fast: f64,
    lag_secs: f64,
    corrections: &CorrectionSet,
) -> MeasureResult<WaveformPair> {
    let mut out = pair.clone();
    out.rotate_to(0.0);
    if let Some(rcv) = corrections.rcv {
        out.unsplit_samples(rcv.angle_deg, rcv.lag_samples)?;
    }
    out.unsplit(fast, lag_secs)?;
    if let Some(src) = corrections.src {
        out.unsplit_samples(src.angle_deg, src.lag_samples)?;
    }
    Ok(out)
}
