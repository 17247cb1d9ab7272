//! Splitting estimation: statistics, grids, search, and the driver.
//!
//! Purpose
//! -------
//! Implement the measurement layer: the catalogue of misfit statistics,
//! validated (angle, lag) search grids, the parallel grid search with
//! receiver/source corrections, the searched error surface, and the
//! full-pipeline driver that attaches confidence information to the
//! winning node.
//!
//! Submodules
//! ----------
//! - `errors`: [`MeasureError`] and the result alias.
//! - `statistic`: misfit statistics and their optimisation sense.
//! - `grid`: validated candidate axes with even-sample lag snapping.
//! - `corrections`: receiver/source operators and source polarisation.
//! - `gridsearch`: the parallel node evaluation and operator removal.
//! - `surface`: the evaluated surface and its optimum.
//! - `measurement`: the end-to-end driver.

pub mod corrections;
pub mod errors;
pub mod grid;
pub mod gridsearch;
pub mod measurement;
pub mod statistic;
pub mod surface;

pub use corrections::{Correction, CorrectionSet};
pub use errors::{MeasureError, MeasureResult};
pub use grid::SearchGrid;
pub use gridsearch::{data_corr, grid_search};
pub use measurement::{measure, Measurement, MeasurementConfig};
pub use statistic::{Sense, StatValue, Statistic, Tail};
pub use surface::{ErrorSurface, Optimum};

pub mod prelude {
    //! Single-import surface for the measurement layer.
    pub use super::corrections::{Correction, CorrectionSet};
    pub use super::errors::{MeasureError, MeasureResult};
    pub use super::grid::SearchGrid;
    pub use super::gridsearch::{data_corr, grid_search};
    pub use super::measurement::{measure, Measurement, MeasurementConfig};
    pub use super::statistic::{Sense, StatValue, Statistic, Tail};
    pub use super::surface::{ErrorSurface, Optimum};
}
