//! measure::surface — the evaluated misfit surface and its optimum.
//!
//! Purpose
//! -------
//! Hold the statistic evaluated at every (lag, angle) node, the axes it
//! was evaluated on, and locate the best node in the statistic's
//! optimisation sense. The surface is the common currency between the
//! grid search, the confidence analysis, and the bootstrap engine.
//!
//! Key behaviors
//! -------------
//! - Values are stored with lags along rows and angles along columns,
//!   so `vals[[j, i]]` is lag node `j` evaluated at angle node `i`.
//! - [`ErrorSurface::optimum`] scans the surface once and returns the
//!   winning node with its axis values resolved.
//! - The profile helpers collapse the surface onto one axis using the
//!   per-node best over the other, for plotting and for bound checks.

use ndarray::{Array1, Array2};

use crate::measure::statistic::{Sense, Statistic};

/// Optimum — the winning node of a searched surface.
///
/// Fields
/// ------
/// - `fast`: `f64`
///   Fast direction at the optimum, degrees.
/// - `lag`: `f64`
///   Delay time at the optimum, seconds.
/// - `deg_index` / `lag_index`: `usize`
///   Axis indices of the optimum.
/// - `value`: `f64`
///   Statistic value at the optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    pub fast: f64,
    pub lag: f64,
    pub deg_index: usize,
    pub lag_index: usize,
    pub value: f64,
}

/// ErrorSurface — a statistic evaluated over the full search grid.
///
/// Fields
/// ------
/// - `vals`: `Array2<f64>`
///   Statistic values, shape `(nlags, ndegs)`.
/// - `lam1`: `Option<Array2<f64>>`
///   Larger covariance eigenvalue per node; present only for the
///   eigenvalue statistic.
/// - `degs` / `lags` / `slags`
///   The axes the surface was evaluated on.
/// - `statistic`: `Statistic`
///   Which statistic produced the values.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSurface {
    pub(crate) vals: Array2<f64>,
    pub(crate) lam1: Option<Array2<f64>>,
    pub(crate) degs: Array1<f64>,
    pub(crate) lags: Array1<f64>,
    pub(crate) slags: Array1<i64>,
    pub(crate) statistic: Statistic,
}

impl ErrorSurface {
    pub fn vals(&self) -> &Array2<f64> {
        &self.vals
    }

    pub fn lam1(&self) -> Option<&Array2<f64>> {
        self.lam1.as_ref()
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

    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    /// optimum — locate the best node in the statistic's sense.
    ///
    /// Returns
    /// -------
    /// - `Optimum`
    ///   The first-encountered extremal node in row-major order; ties
    ///   resolve to the smallest (lag, angle) indices.
    pub fn optimum(&self) -> Optimum {
        let sense = self.statistic.sense();
        let mut best = (0, 0, self.vals[[0, 0]]);
        for ((j, i), &v) in self.vals.indexed_iter() {
            let better = match sense {
                Sense::Minimize => v < best.2,
                Sense::Maximize => v > best.2,
            };
            if better {
                best = (j, i, v);
            }
        }
        Optimum {
            fast: self.degs[best.1],
            lag: self.lags[best.0],
            deg_index: best.1,
            lag_index: best.0,
            value: best.2,
        }
    }

    /// fast_profile — per-angle best value over all lags.
    pub fn fast_profile(&self) -> Array1<f64> {
        let sense = self.statistic.sense();
        Array1::from_iter(self.vals.columns().into_iter().map(|col| fold_best(col.iter(), sense)))
    }

    /// lag_profile — per-lag best value over all angles.
    pub fn lag_profile(&self) -> Array1<f64> {
        let sense = self.statistic.sense();
        Array1::from_iter(self.vals.rows().into_iter().map(|row| fold_best(row.iter(), sense)))
    }
}

fn fold_best<'a>(vals: impl Iterator<Item = &'a f64>, sense: Sense) -> f64 {
    vals.copied()
        .reduce(|a, b| match sense {
            Sense::Minimize => a.min(b),
            Sense::Maximize => a.max(b),
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_surface(statistic: Statistic) -> ErrorSurface {
        // 3 lags × 2 angles, minimum at (lag 1, angle 1), maximum at (2, 0).
        ErrorSurface {
            vals: array![[4.0, 3.0], [2.0, 1.0], [9.0, 5.0]],
            lam1: None,
            degs: array![-10.0, 30.0],
            lags: array![0.0, 0.2, 0.4],
            slags: array![0_i64, 2, 4],
            statistic,
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Optimum location in both senses.
    // - Axis profiles collapsing in the correct sense.
    //
    // They intentionally DO NOT cover:
    // - Surfaces produced by a real grid search (gridsearch tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the optimum respects the statistic's sense.
    //
    // Given
    // -----
    // - The same values under a minimising and a maximising statistic.
    //
    // Expect
    // ------
    // - Eigenvalue picks the minimum at (lag 0.2, angle 30°); Pearson
    //   picks the maximum at (lag 0.4, angle -10°).
    fn optimum_follows_sense() {
        // Act
        let min_opt = small_surface(Statistic::Eigenvalue).optimum();
        let max_opt = small_surface(Statistic::Pearson).optimum();

        // Assert
        assert_eq!((min_opt.lag_index, min_opt.deg_index, min_opt.value), (1, 1, 1.0));
        assert_eq!(min_opt.fast, 30.0);
        assert!((min_opt.lag - 0.2).abs() < 1e-12);

        assert_eq!((max_opt.lag_index, max_opt.deg_index, max_opt.value), (2, 0, 9.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the profiles collapse the off-axis in the correct sense.
    //
    // Given
    // -----
    // - The small 3×2 surface under the minimising statistic.
    //
    // Expect
    // ------
    // - fast_profile is the column minima [2, 1]; lag_profile is the
    //   row minima [3, 1, 5].
    fn profiles_collapse_in_sense() {
        // Arrange
        let surface = small_surface(Statistic::Eigenvalue);

        // Assert
        assert_eq!(surface.fast_profile(), array![2.0, 1.0]);
        assert_eq!(surface.lag_profile(), array![3.0, 1.0, 5.0]);
    }
}
