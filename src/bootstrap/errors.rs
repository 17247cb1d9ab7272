//! bootstrap::errors — error types for the bootstrap engine.

use crate::wave::errors::WaveError;

pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// BootstrapError — failures raised by resampling and density work.
///
/// Variants
/// --------
/// - `InsufficientData { nsamps }`
///   Fewer than two samples: nothing to resample or smooth.
/// - `ZeroSpread`
///   All bootstrap values coincide, so no kernel bandwidth exists.
/// - `ZeroTrials`
///   The engine was asked for zero trials.
/// - `InvalidSigma(sigma)`
///   A correction uncertainty is negative or not finite.
/// - `InvalidAlpha(alpha)`
///   The requested density mass level lies outside (0, 1).
/// - `InvalidInput(WaveError)`
///   A waveform-level failure while applying a trial correction.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapError {
    InsufficientData { nsamps: usize },
    ZeroSpread,
    ZeroTrials,
    InvalidSigma(f64),
    InvalidAlpha(f64),
    InvalidInput(WaveError),
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapError::InsufficientData { nsamps } => {
                write!(f, "Cannot bootstrap {nsamps} samples; need at least 2.")
            }
            BootstrapError::ZeroSpread => {
                write!(f, "Bootstrap values have zero spread; no density can be estimated.")
            }
            BootstrapError::ZeroTrials => {
                write!(f, "Trial count must be at least 1.")
            }
            BootstrapError::InvalidSigma(sigma) => {
                write!(f, "Invalid correction uncertainty: {sigma}. Must be finite and >= 0.")
            }
            BootstrapError::InvalidAlpha(alpha) => {
                write!(f, "Invalid mass level: {alpha}. Must lie strictly in (0, 1).")
            }
            BootstrapError::InvalidInput(err) => write!(f, "Invalid waveform input: {err}"),
        }
    }
}

impl From<WaveError> for BootstrapError {
    fn from(err: WaveError) -> Self {
        BootstrapError::InvalidInput(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Display payload embedding and the wrapping From impl.
    //
    // They intentionally DO NOT cover:
    // - The sites that raise each variant (engine and kde tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify payloads survive formatting and wrapping.
    //
    // Given
    // -----
    // - InsufficientData { nsamps: 1 } and a wrapped OddLagSamples(3).
    //
    // Expect
    // ------
    // - Each message contains its payload.
    fn bootstrap_error_messages_embed_payloads() {
        let short = BootstrapError::InsufficientData { nsamps: 1 }.to_string();
        assert!(short.contains('1'), "missing payload: {short}");

        let wrapped: BootstrapError = WaveError::OddLagSamples(3).into();
        assert!(wrapped.to_string().contains('3'), "payload lost in wrapping");
    }
}
