//! bootstrap::kde — Gaussian kernel density estimation.
//!
//! Purpose
//! -------
//! Smooth a set of bootstrap statistic values into a continuous
//! density that can be evaluated at every node of an error surface.
//!
//! Key behaviors
//! -------------
//! - Bandwidth follows Scott's rule, `h = σ̂ · n^(−1/5)`, with σ̂ the
//!   population standard deviation of the samples.
//! - `pdf` evaluates the mean of unit-mass Gaussian kernels, so the
//!   density integrates to one over the real line.

use ndarray::Array1;

use crate::bootstrap::errors::{BootstrapError, BootstrapResult};

/// GaussianKde — a Gaussian kernel density over bootstrap values.
///
/// Fields
/// ------
/// - `centres`: `Array1<f64>`
///   The sample values, one kernel each.
/// - `bandwidth`: `f64`
///   Common kernel standard deviation (Scott's rule).
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    centres: Array1<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// new — fit a density to a set of samples.
    ///
    /// Errors
    /// ------
    /// - `BootstrapError::InsufficientData` for fewer than two samples.
    /// - `BootstrapError::ZeroSpread` when all samples coincide.
    pub fn new(samples: &Array1<f64>) -> BootstrapResult<Self> {
        let n = samples.len();
        if n < 2 {
            return Err(BootstrapError::InsufficientData { nsamps: n });
        }
        let nf = n as f64;
        let mean = samples.sum() / nf;
        let var = samples.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / nf;
        if var == 0.0 {
            return Err(BootstrapError::ZeroSpread);
        }
        let bandwidth = var.sqrt() * nf.powf(-0.2);
        Ok(GaussianKde { centres: samples.clone(), bandwidth })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at a single point.
    pub fn pdf(&self, at: f64) -> f64 {
        let h = self.bandwidth;
        let norm = 1.0 / (h * (2.0 * std::f64::consts::PI).sqrt());
        let mut acc = 0.0;
        for &c in &self.centres {
            let z = (at - c) / h;
            acc += (-0.5 * z * z).exp();
        }
        norm * acc / self.centres.len() as f64
    }
}
