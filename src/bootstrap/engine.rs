//! bootstrap::engine — trial orchestration and density summaries.
//!
//! Purpose
//! -------
//! Drive the bootstrap analyses on a completed measurement: resample
//! the corrected record many times to build a statistic distribution,
//! propagate uncertainty in upstream corrections by redrawing them,
//! and summarise either as a probability density over the searched
//! surface.
//!
//! Key behaviors
//! -------------
//! - Trials run in parallel but are reproducible: each trial seeds its
//!   own generator from the engine seed mixed with the trial index, so
//!   results are independent of scheduling and thread count.
//! - The record entering the resampler is oriented per statistic: the
//!   polarisation frame for transverse energy, the fast frame for the
//!   correlation statistics, as-is for the rotation-invariant
//!   eigenvalue.
//! - Two resampling schemes: paired index draws, or phase-randomised
//!   noise surrogates built in the polarisation frame.
//! - The density over the surface is normalised to unit total mass so
//!   confidence levels read directly as mass fractions.

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::bootstrap::errors::{BootstrapError, BootstrapResult};
use crate::bootstrap::kde::GaussianKde;
use crate::bootstrap::resample::{resample_noise, resample_with_replacement};
use crate::measure::statistic::{Statistic, Tail};
use crate::measure::surface::ErrorSurface;
use crate::measure::Measurement;
use crate::wave::{rotate, WaveformPair};

/// CorrectionInfo — a correction with one-sigma uncertainties.
///
/// Fields
/// ------
/// - `fast` / `dfast`: `f64`
///   Fast direction of the operator and its one-sigma error, degrees.
/// - `lag` / `dlag`: `f64`
///   Delay of the operator and its one-sigma error, seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionInfo {
    pub fast: f64,
    pub dfast: f64,
    pub lag: f64,
    pub dlag: f64,
}

impl CorrectionInfo {
    fn validate(&self) -> BootstrapResult<()> {
        for &sigma in &[self.dfast, self.dlag] {
            if !sigma.is_finite() || sigma < 0.0 {
                return Err(BootstrapError::InvalidSigma(sigma));
            }
        }
        Ok(())
    }
}

/// ResampleMode — how each bootstrap trial rebuilds the record.
///
/// Variants
/// --------
/// - `Paired`
///   Draw sample indices with replacement, keeping the two components
///   paired. The default, appropriate when no noise model is assumed.
/// - `NoiseSurrogate`
///   Keep the signal component and replace the noise component with a
///   phase-randomised surrogate of itself, preserving its amplitude
///   spectrum. Appropriate when the polarisation frame cleanly
///   separates signal from noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleMode {
    #[default]
    Paired,
    NoiseSurrogate,
}

/// BootstrapEngine — seeded, parallel bootstrap trials.
///
/// Fields
/// ------
/// - `n_trials`: `usize`
///   Number of resampling trials; 5000 by default.
/// - `base_seed`: `u64`
///   Seed mixed into every trial's generator.
/// - `mode`: `ResampleMode`
///   Per-trial resampling scheme; paired index draws by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapEngine {
    pub n_trials: usize,
    pub base_seed: u64,
    pub mode: ResampleMode,
}

impl Default for BootstrapEngine {
    fn default() -> Self {
        BootstrapEngine { n_trials: 5000, base_seed: 0, mode: ResampleMode::Paired }
    }
}

impl BootstrapEngine {
    pub fn new(n_trials: usize, base_seed: u64) -> Self {
        BootstrapEngine { n_trials, base_seed, mode: ResampleMode::Paired }
    }

    /// Return a copy of this engine with a different resampling mode.
    pub fn with_mode(self, mode: ResampleMode) -> Self {
        BootstrapEngine { mode, ..self }
    }

    /// run — distribution of the statistic over resampled records.
    ///
    /// Parameters
    /// ----------
    /// - `measurement`: `&Measurement`
    ///   A completed measurement; its corrected record is resampled
    ///   per the engine's [`ResampleMode`].
    ///
    /// Returns
    /// -------
    /// - `BootstrapResult<Array1<f64>>`
    ///   One statistic value per trial, in trial order.
    ///
    /// Errors
    /// ------
    /// - `BootstrapError::ZeroTrials` for an empty engine.
    /// - `BootstrapError::InsufficientData` for records under two
    ///   samples.
    pub fn run(&self, measurement: &Measurement) -> BootstrapResult<Array1<f64>> {
        if self.n_trials == 0 {
            return Err(BootstrapError::ZeroTrials);
        }
        let statistic = measurement.statistic();
        match self.mode {
            ResampleMode::Paired => {
                let (x, y) = prep(measurement);
                self.collect_trials(|rng| {
                    let (rx, ry) = resample_with_replacement(&x, &y, rng)?;
                    Ok(statistic.evaluate(&rx, &ry).scalar)
                })
            }
            ResampleMode::NoiseSurrogate => {
                // In the polarisation frame the second component is the
                // noise estimate; the surrogate keeps its spectrum.
                let mut data = measurement.corrected().clone();
                data.rotate_to(measurement.pol());
                let (x, y) = data.chopped();
                let spin = measurement.fast() - measurement.pol();
                self.collect_trials(|rng| {
                    let ys = resample_noise(&y, rng)?;
                    let (rx, ry) = match statistic {
                        Statistic::CrossCorrelation | Statistic::Pearson => {
                            rotate(&x, &ys, spin)
                        }
                        Statistic::Eigenvalue | Statistic::TransverseEnergy => (x.clone(), ys),
                    };
                    Ok(statistic.evaluate(&rx, &ry).scalar)
                })
            }
        }
    }

    /// Run one seeded generator per trial and gather the draws.
    fn collect_trials<F>(&self, trial: F) -> BootstrapResult<Array1<f64>>
    where
        F: Fn(&mut Xoshiro256PlusPlus) -> BootstrapResult<f64> + Sync,
    {
        let vals: Vec<BootstrapResult<f64>> = (0..self.n_trials)
            .into_par_iter()
            .map(|i| {
                let mut rng =
                    Xoshiro256PlusPlus::seed_from_u64(trial_seed(self.base_seed, i as u64));
                trial(&mut rng)
            })
            .collect();
        vals.into_iter().collect::<BootstrapResult<Vec<f64>>>().map(Array1::from_vec)
    }

    /// correction_variance — statistic spread under uncertain corrections.
    ///
    /// Each trial redraws the receiver and/or source correction from a
    /// normal distribution around its measured value, removes the
    /// redrawn operators plus the measured one from the original
    /// record, and bootstraps the statistic `subsamples` times on the
    /// result.
    ///
    /// Parameters
    /// ----------
    /// - `pair`: `&WaveformPair`
    ///   The original, uncorrected record.
    /// - `measurement`: `&Measurement`
    ///   The completed measurement whose operator is removed each trial.
    /// - `rcv`, `src`: `Option<&CorrectionInfo>`
    ///   Corrections with uncertainties; `None` skips that side.
    /// - `subsamples`: `usize`
    ///   Resampling draws per trial correction.
    ///
    /// Returns
    /// -------
    /// - `BootstrapResult<Array1<f64>>`
    ///   `n_trials · subsamples` statistic values, flattened in trial
    ///   order.
    pub fn correction_variance(
        &self,
        pair: &WaveformPair,
        measurement: &Measurement,
        rcv: Option<&CorrectionInfo>,
        src: Option<&CorrectionInfo>,
        subsamples: usize,
    ) -> BootstrapResult<Array1<f64>> {
        if self.n_trials == 0 || subsamples == 0 {
            return Err(BootstrapError::ZeroTrials);
        }
        if let Some(info) = rcv {
            info.validate()?;
        }
        if let Some(info) = src {
            info.validate()?;
        }
        let statistic = measurement.statistic();
        let fast = measurement.fast();
        let lag = measurement.lag();
        let pol = measurement.pol();

        let trials: Vec<BootstrapResult<Vec<f64>>> = (0..self.n_trials)
            .into_par_iter()
            .map(|i| {
                let mut rng =
                    Xoshiro256PlusPlus::seed_from_u64(trial_seed(self.base_seed, i as u64));

                let mut data = pair.clone();
                data.rotate_to(0.0);
                if let Some(info) = rcv {
                    let (deg, secs) = draw_correction(info, &mut rng)?;
                    data.unsplit(deg, secs)?;
                }
                data.unsplit(fast, lag)?;
                if let Some(info) = src {
                    let (deg, secs) = draw_correction(info, &mut rng)?;
                    data.unsplit(deg, secs)?;
                }
                match statistic {
                    Statistic::TransverseEnergy => data.rotate_to(pol),
                    Statistic::CrossCorrelation | Statistic::Pearson => data.rotate_to(fast),
                    Statistic::Eigenvalue => {}
                }
                let (x, y) = data.chopped();

                (0..subsamples)
                    .map(|_| {
                        let (rx, ry) = resample_with_replacement(&x, &y, &mut rng)?;
                        Ok(statistic.evaluate(&rx, &ry).scalar)
                    })
                    .collect()
            })
            .collect();

        let mut flat = Vec::with_capacity(self.n_trials * subsamples);
        for trial in trials {
            flat.extend(trial?);
        }
        Ok(Array1::from_vec(flat))
    }
}

/// Orient the corrected record for its statistic and chop it.
fn prep(measurement: &Measurement) -> (Array1<f64>, Array1<f64>) {
    let mut data = measurement.corrected().clone();
    match measurement.statistic() {
        Statistic::TransverseEnergy => data.rotate_to(measurement.pol()),
        Statistic::CrossCorrelation | Statistic::Pearson => data.rotate_to(measurement.fast()),
        Statistic::Eigenvalue => {}
    }
    data.chopped()
}

fn draw_correction(
    info: &CorrectionInfo,
    rng: &mut Xoshiro256PlusPlus,
) -> BootstrapResult<(f64, f64)> {
    let fast = Normal::new(info.fast, info.dfast)
        .map_err(|_| BootstrapError::InvalidSigma(info.dfast))?
        .sample(rng);
    let lag = Normal::new(info.lag, info.dlag)
        .map_err(|_| BootstrapError::InvalidSigma(info.dlag))?
        .sample(rng);
    Ok((fast, lag.max(0.0)))
}

/// Per-trial seed: the base seed mixed with the trial index through a
/// SplitMix64 finaliser, so neighbouring trials get unrelated streams.
fn trial_seed(base: u64, counter: u64) -> u64 {
    let mut z = base.wrapping_add(counter.wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// estimate_pdf — bootstrap values smoothed into a surface density.
///
/// Fits a Gaussian kernel density to the bootstrap values, evaluates
/// it at every node of the searched surface, and normalises to unit
/// total mass.
pub fn estimate_pdf(vals: &Array1<f64>, surface: &ErrorSurface) -> BootstrapResult<Array2<f64>> {
    let kde = GaussianKde::new(vals)?;
    let mut pdf = surface.vals().mapv(|v| kde.pdf(v));
    let total = pdf.sum();
    if total > 0.0 {
        pdf.mapv_inplace(|v| v / total);
    }
    Ok(pdf)
}

/// conf_level_from_pdf — density value bounding the 1−α mass region.
///
/// Sorts the node masses ascending and accumulates until `alpha` mass
/// is reached; nodes at or above the returned value jointly carry at
/// least 1−α of the total mass.
pub fn conf_level_from_pdf(pdf: &Array2<f64>, alpha: f64) -> BootstrapResult<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(BootstrapError::InvalidAlpha(alpha));
    }
    if pdf.is_empty() {
        return Err(BootstrapError::InsufficientData { nsamps: 0 });
    }
    let mut masses: Vec<f64> = pdf.iter().copied().collect();
    masses.sort_by(f64::total_cmp);
    let mut acc = 0.0;
    for &m in &masses {
        acc += m;
        if acc >= alpha {
            return Ok(m);
        }
    }
    // total mass below alpha only through rounding; the largest node bounds it
    Ok(*masses.last().unwrap_or(&0.0))
}

/// trim_to_tail — keep the one-sided half of a bootstrap distribution.
///
/// Sorts the values and keeps the upper or lower half, per the
/// statistic's confidence tail.
pub fn trim_to_tail(vals: &Array1<f64>, tail: Tail) -> Array1<f64> {
    let mut sorted: Vec<f64> = vals.iter().copied().collect();
    sorted.sort_by(f64::total_cmp);
    let half = sorted.len() / 2;
    let kept = match tail {
        Tail::Upper => &sorted[half..],
        Tail::Lower => &sorted[..half.max(1)],
    };
    Array1::from_iter(kept.iter().copied())
}
