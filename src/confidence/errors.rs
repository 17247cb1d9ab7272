//! confidence::errors — error types for uncertainty analysis.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the
//! degrees-of-freedom estimator, the F-test thresholding step, and the
//! confidence-region bound extraction.
//!
//! Key behaviors
//! -------------
//! - Define [`ConfidenceResult`] and [`ConfidenceError`] with one
//!   variant per failure class so callers can branch on the cause.
//! - Keep the distribution-construction failure (`Distribution`) textual:
//!   `statrs` construction errors are strings by the time they surface.
//!
//! Conventions
//! -----------
//! - `InsufficientData` carries the effective ndf so the message can say
//!   how short the record fell.

pub type ConfidenceResult<T> = Result<T, ConfidenceError>;

/// ConfidenceError — failures raised during uncertainty analysis.
///
/// Variants
/// --------
/// - `InsufficientData { ndf }`
///   The estimated degrees of freedom did not exceed the number of
///   fitted parameters, so the F statistic is undefined.
/// - `DegenerateRegion`
///   The thresholded confidence region is empty or covers the whole
///   surface, so no finite uncertainty can be quoted.
/// - `InvalidAlpha(alpha)`
///   The requested significance level lies outside (0, 1).
/// - `EmptySpectrum`
///   The record handed to the spectral ndf estimator has no samples or
///   zero energy.
/// - `Distribution(msg)`
///   The reference F distribution could not be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfidenceError {
    InsufficientData { ndf: f64 },
    DegenerateRegion,
    InvalidAlpha(f64),
    EmptySpectrum,
    Distribution(String),
}

impl std::error::Error for ConfidenceError {}

impl std::fmt::Display for ConfidenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceError::InsufficientData { ndf } => {
                write!(
                    f,
                    "Estimated {ndf} degrees of freedom, but more than 2 are required \
                     for an F test with 2 fitted parameters."
                )
            }
            ConfidenceError::DegenerateRegion => {
                write!(
                    f,
                    "Confidence region is degenerate (empty or covering the whole \
                     search surface). No finite uncertainty can be quoted."
                )
            }
            ConfidenceError::InvalidAlpha(alpha) => {
                write!(f, "Invalid significance level: {alpha}. Must lie strictly in (0, 1).")
            }
            ConfidenceError::EmptySpectrum => {
                write!(f, "Record has no samples or zero spectral energy.")
            }
            ConfidenceError::Distribution(msg) => {
                write!(f, "Could not construct the reference F distribution: {msg}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display payload embedding for the data-bearing variants.
    //
    // They intentionally DO NOT cover:
    // - The analysis paths that raise each variant (ndf/ftest/bounds tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that InsufficientData and InvalidAlpha embed their payloads.
    //
    // Given
    // -----
    // - InsufficientData { ndf: 1.7 } and InvalidAlpha(1.2).
    //
    // Expect
    // ------
    // - Each formatted message contains its payload value.
    fn confidence_error_messages_embed_payloads() {
        let short = ConfidenceError::InsufficientData { ndf: 1.7 }.to_string();
        assert!(short.contains("1.7"), "missing payload: {short}");

        let alpha = ConfidenceError::InvalidAlpha(1.2).to_string();
        assert!(alpha.contains("1.2"), "missing payload: {alpha}");
    }
}
