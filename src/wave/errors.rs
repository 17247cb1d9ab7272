//! wave::errors — shared error types for waveform primitives.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the waveform-level
//! building blocks (pair construction, window geometry, and the elementary
//! rotate/lag/chop/split operations). Malformed waveforms and windows are
//! rejected here, at the lowest boundary, so higher layers can assume the
//! parity and shape invariants hold.
//!
//! Key behaviors
//! -------------
//! - Define [`WaveResult`] and [`WaveError`] as the canonical result and
//!   error types for the `wave` subtree.
//! - Attach human-readable `Display` messages phrased in terms of the
//!   domain constraints (odd sample counts, even lag shifts, positive
//!   sample intervals) rather than low-level details.
//!
//! Conventions
//! -----------
//! - Each variant carries just enough payload (the offending length, value,
//!   or index) to make diagnostics actionable without hauling around data
//!   arrays.
//! - Higher subtrees (`measure`, `bootstrap`) wrap these errors rather than
//!   redefining the underlying conditions.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads; the
//!   conditions that raise each variant are exercised in the modules that
//!   detect them.

pub type WaveResult<T> = Result<T, WaveError>;

/// WaveError — invalid waveform, window, or primitive-operation input.
///
/// Variants
/// --------
/// - `EvenSampleCount(n)`
///   A trace has an even number of samples; the split/lag operators
///   require odd length so a unique centre sample exists.
/// - `MismatchedLengths(nx, ny)`
///   The two components of a pair differ in length.
/// - `NonPositiveDelta(delta)`
///   The sample interval is zero or negative.
/// - `NonFiniteSample(value)`
///   A trace contains a NaN or infinite sample.
/// - `OddLagSamples(n)`
///   A relative shift was requested with an odd sample count; shifts are
///   split symmetrically ± n/2 between the components and must be even.
/// - `LagExceedsTrace { lag, nsamps }`
///   A shift of `lag` samples leaves no overlap for a trace of `nsamps`
///   samples.
/// - `EvenWindowWidth(width)` / `ZeroWindowWidth`
///   A window width violates the odd, ≥ 1 constraint.
/// - `InvalidTimeRange { start, end }`
///   A window was requested from a `(start, end)` time pair with
///   `start > end`.
///
/// Invariants
/// ----------
/// - Variants are small and `Clone`, suitable for tests and for wrapping
///   by the `measure` subtree's `InvalidInput` umbrella.
#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    //------ Waveform validation ------
    EvenSampleCount(usize),
    MismatchedLengths(usize, usize),
    NonPositiveDelta(f64),
    NonFiniteSample(f64),
    //------ Primitive operations ------
    OddLagSamples(i64),
    LagExceedsTrace { lag: i64, nsamps: usize },
    //------ Window geometry ------
    EvenWindowWidth(usize),
    ZeroWindowWidth,
    InvalidTimeRange { start: f64, end: f64 },
}

impl std::error::Error for WaveError {}

impl std::fmt::Display for WaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaveError::EvenSampleCount(n) => {
                write!(f, "Trace has {n} samples. Sample count must be odd.")
            }
            WaveError::MismatchedLengths(nx, ny) => {
                write!(f, "Component lengths differ: {nx} vs {ny}. Must be equal.")
            }
            WaveError::NonPositiveDelta(delta) => {
                write!(f, "Invalid sample interval: {delta}. Must be positive.")
            }
            WaveError::NonFiniteSample(value) => {
                write!(f, "Invalid sample value: {value}. Must be a finite number.")
            }
            WaveError::OddLagSamples(n) => {
                write!(f, "Invalid lag of {n} samples. Relative shifts must be even.")
            }
            WaveError::LagExceedsTrace { lag, nsamps } => {
                write!(f, "Lag of {lag} samples leaves no overlap on a {nsamps}-sample trace.")
            }
            WaveError::EvenWindowWidth(width) => {
                write!(f, "Invalid window width: {width}. Must be odd.")
            }
            WaveError::ZeroWindowWidth => {
                write!(f, "Window width must be at least 1 sample.")
            }
            WaveError::InvalidTimeRange { start, end } => {
                write!(f, "Invalid window times: start {start} is later than end {end}.")
            }
        }
    }
}
