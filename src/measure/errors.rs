//! measure::errors — error types for grid construction and grid search.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the measurement layer:
//! malformed search grids, waveform-input violations surfacing at the
//! measurement boundary, and confidence-analysis failures propagated by
//! the high-level measurement driver.
//!
//! Key behaviors
//! -------------
//! - Define [`MeasureResult`] and [`MeasureError`], wrapping the lower
//!   [`WaveError`] and downstream [`ConfidenceError`] so the driver can
//!   return a single error surface.
//! - Phrase messages as domain constraints ("lag values must be
//!   non-negative") rather than implementation detail.
//!
//! Conventions
//! -----------
//! - Grid-shape violations get their own variants; waveform violations
//!   are wrapped, not restated.

use crate::confidence::errors::ConfidenceError;
use crate::wave::errors::WaveError;

pub type MeasureResult<T> = Result<T, MeasureError>;

/// MeasureError — failures raised while building grids or searching them.
///
/// Variants
/// --------
/// - `InvalidInput(WaveError)`
///   A malformed waveform or window reached the measurement boundary.
/// - `EmptyAngles` / `EmptyLags`
///   The candidate angle or lag set is empty; a grid search over nothing
///   is refused rather than yielding an empty surface.
/// - `NegativeLag(lag)`
///   A candidate lag time is negative; splitting delays are
///   non-negative by definition.
/// - `DuplicateAngle(deg)`
///   Two candidate angles coincide modulo the 180° period, which would
///   duplicate a column of the surface.
/// - `LagExceedsWindow { slag, nsamps }`
///   The largest candidate shift leaves fewer than three samples of
///   trace, so no covariance can be formed at that node.
/// - `WindowTooNarrow(width)`
///   The analysis window covers fewer than three samples; a 2×2
///   covariance needs at least two and a meaningful one more.
/// - `MissingPolarisation`
///   A polarisation-dependent statistic was requested without a source
///   polarisation.
/// - `Confidence(ConfidenceError)`
///   A confidence-analysis failure propagated by the measurement driver.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    //------ Input validation ------
    InvalidInput(WaveError),
    //------ Grid validation ------
    EmptyAngles,
    EmptyLags,
    NegativeLag(f64),
    DuplicateAngle(f64),
    LagExceedsWindow { slag: i64, nsamps: usize },
    WindowTooNarrow(usize),
    MissingPolarisation,
    //------ Propagated analysis failures ------
    Confidence(ConfidenceError),
}

impl std::error::Error for MeasureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeasureError::InvalidInput(err) => Some(err),
            MeasureError::Confidence(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasureError::InvalidInput(err) => write!(f, "Invalid waveform input: {err}"),
            MeasureError::EmptyAngles => {
                write!(f, "Candidate angle set is empty. Provide at least one angle.")
            }
            MeasureError::EmptyLags => {
                write!(f, "Candidate lag set is empty. Provide at least one lag.")
            }
            MeasureError::NegativeLag(lag) => {
                write!(f, "Invalid lag value: {lag}. Lags must be non-negative.")
            }
            MeasureError::DuplicateAngle(deg) => {
                write!(f, "Duplicate angle {deg} modulo 180°. Grid angles must be unique.")
            }
            MeasureError::LagExceedsWindow { slag, nsamps } => {
                write!(
                    f,
                    "Largest candidate shift of {slag} samples leaves too little of a \
                     {nsamps}-sample trace to analyse."
                )
            }
            MeasureError::WindowTooNarrow(width) => {
                write!(f, "Analysis window of {width} samples is too narrow; need at least 3.")
            }
            MeasureError::MissingPolarisation => {
                write!(
                    f,
                    "The chosen statistic needs a source polarisation, but none was supplied."
                )
            }
            MeasureError::Confidence(err) => write!(f, "Confidence analysis failed: {err}"),
        }
    }
}

impl From<WaveError> for MeasureError {
    fn from(err: WaveError) -> Self {
        MeasureError::InvalidInput(err)
    }
}

impl From<ConfidenceError> for MeasureError {
    fn from(err: ConfidenceError) -> Self {
        MeasureError::Confidence(err)
    }
}
