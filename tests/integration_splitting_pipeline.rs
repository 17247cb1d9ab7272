//! Integration tests for the shear-wave splitting pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: from synthetic split records,
//!   through the grid search and F-test confidence analysis, to
//!   bootstrap densities over the searched surface.
//! - Exercise realistic regimes (noisy records, layered corrections,
//!   alternative statistics) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `wave::synth`:
//!   - Seeded synthetics with known polarisation, fast direction, and
//!     delay.
//! - `measure`:
//!   - The eigenvalue pipeline with and without a receiver correction;
//!   - the transverse-energy statistic with a supplied polarisation;
//!   - agreement between minimising and maximising statistics.
//! - `confidence`:
//!   - ndf, F-test level, and one-sigma bounds as consumed by the
//!     driver.
//! - `bootstrap`:
//!   - Trial determinism and the surface density summaries.
//! - Coverage:
//!   - The F-test region contains the true operator across many noise
//!     seeds at close to its nominal rate.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (rotation,
//!   lag bookkeeping, window arithmetic) — these are covered by unit
//!   tests.
use ndarray::Array1;
use swsplit::bootstrap::{conf_level_from_pdf, estimate_pdf, BootstrapEngine};
use swsplit::measure::{
    measure, Correction, CorrectionSet, MeasurementConfig, SearchGrid, Statistic,
};
use swsplit::wave::{synth, SynthConfig, WaveformPair};

/// Purpose
/// -------
/// Build a seeded noisy synthetic split at known parameters, with the
/// crate's default record geometry.
///
/// Parameters
/// ----------
/// - `fast` / `lag`: the splitting operator to bury in the record.
/// - `noise`: noise standard deviation relative to a unit-normalised
///   Ricker pulse; 0.03 is a comfortably measurable level.
/// - `seed`: RNG seed, so every test pins its own record.
///
/// Returns
/// -------
/// - A validated `WaveformPair` carrying the operator's signature.
fn noisy_synth(fast: f64, lag: f64, noise: f64, seed: u64) -> WaveformPair {
    synth(&SynthConfig { fast, lag, noise, seed, ..SynthConfig::default() })
        .expect("synthetic config is valid")
}

/// Purpose
/// -------
/// A deliberately coarse grid for the bootstrap tests, keeping trial
/// counts meaningful without searching 3600 nodes per trial.
///
/// Returns
/// -------
/// - An 18-angle × 10-lag grid covering the full angle period and lags
///   up to 2 s.
fn coarse_grid(pair: &WaveformPair) -> SearchGrid {
    let degs = Array1::from_iter((0..18).map(|i| -90.0 + i as f64 * 10.0));
    let lags = Array1::from_iter((1..=10).map(|i| i as f64 * 0.2));
    SearchGrid::new(degs, &lags, pair.delta(), pair.nsamps()).expect("coarse grid is valid")
}

#[test]
// Purpose
// -------
// Verify the default eigenvalue pipeline on a noisy record: parameter
// recovery, positive finite errors, and a confidence region that
// contains its own optimum.
//
// Given
// -----
// - A seeded synthetic split at (30°, 1.2 s) with 3% noise, measured
//   on the default grid with the default configuration.
//
// Expect
// ------
// - fast within 6° of 30 and lag within 0.3 s of 1.2.
// - dfast and dlag strictly positive and finite.
// - ndf well above the two fitted parameters; snr above 1.5.
// - The optimum node flagged inside the confidence region.
fn eigenvalue_pipeline_recovers_noisy_record() {
    // Arrange
    let pair = noisy_synth(30.0, 1.2, 0.03, 42);
    let grid = SearchGrid::default_for(&pair).expect("default grid");

    // Act
    let m = measure(&pair, &grid, &MeasurementConfig::default()).expect("pipeline succeeds");

    // Assert
    assert!((m.fast() - 30.0).abs() <= 6.0, "fast = {}", m.fast());
    assert!((m.lag() - 1.2).abs() <= 0.3, "lag = {}", m.lag());
    assert!(m.dfast() > 0.0 && m.dfast().is_finite(), "dfast = {}", m.dfast());
    assert!(m.dlag() > 0.0 && m.dlag().is_finite(), "dlag = {}", m.dlag());
    assert!(m.ndf() > 10.0, "ndf = {}", m.ndf());
    assert!(m.snr() > 1.5, "snr = {}", m.snr());

    let opt = m.surface().optimum();
    assert!(m.mask()[[opt.lag_index, opt.deg_index]], "optimum outside its own region");
}

#[test]
// Purpose
// -------
// Verify a receiver correction recovers an operator buried beneath a
// second, receiver-side split.
//
// Given
// -----
// - A low-noise synthetic split at (40°, 1.0 s), then split again by a
//   receiver-side operator (-20°, 0.6 s); measured with the receiver
//   correction supplied.
//
// Expect
// ------
// - The corrected measurement lands within two grid steps of
//   (40°, 1.0 s).
fn receiver_correction_recovers_buried_operator() {
    // Arrange
    let mut pair = noisy_synth(40.0, 1.0, 0.01, 7);
    pair.split(-20.0, 0.6).expect("receiver-side split applies");
    let grid = SearchGrid::default_for(&pair).expect("default grid");

    let config = MeasurementConfig {
        corrections: CorrectionSet {
            rcv: Some(Correction::from_time(-20.0, 0.6, pair.delta())),
            ..CorrectionSet::none()
        },
        ..MeasurementConfig::default()
    };

    // Act
    let m = measure(&pair, &grid, &config).expect("pipeline succeeds");

    // Assert
    assert!((m.fast() - 40.0).abs() <= 2.0 * grid.deg_step(), "fast = {}", m.fast());
    assert!((m.lag() - 1.0).abs() <= 2.0 * grid.lag_step(), "lag = {}", m.lag());
}

#[test]
// Purpose
// -------
// Verify the transverse-energy statistic with a supplied polarisation
// agrees with the truth on a low-noise record.
//
// Given
// -----
// - A synthetic polarised at 20°, split at (60°, 0.8 s), 1% noise,
//   measured with TransverseEnergy and pol = 20°.
//
// Expect
// ------
// - fast within one grid step of 60 and lag within one step of 0.8.
fn transverse_energy_with_known_polarisation() {
    // Arrange
    let pair = synth(&SynthConfig {
        pol: 20.0,
        fast: 60.0,
        lag: 0.8,
        noise: 0.01,
        seed: 11,
        ..SynthConfig::default()
    })
    .expect("synthetic config is valid");
    let grid = SearchGrid::default_for(&pair).expect("default grid");

    let config = MeasurementConfig {
        statistic: Statistic::TransverseEnergy,
        corrections: CorrectionSet { pol: Some(20.0), ..CorrectionSet::none() },
        ..MeasurementConfig::default()
    };

    // Act
    let m = measure(&pair, &grid, &config).expect("pipeline succeeds");

    // Assert
    assert!((m.fast() - 60.0).abs() <= grid.deg_step(), "fast = {}", m.fast());
    assert!((m.lag() - 0.8).abs() <= grid.lag_step(), "lag = {}", m.lag());
}

#[test]
// Purpose
// -------
// Verify minimising and maximising statistics locate the same optimum
// on a well-constrained record.
//
// Given
// -----
// - One low-noise synthetic at (-50°, 1.6 s) measured with the
//   eigenvalue, cross-correlation, and Pearson statistics.
//
// Expect
// ------
// - All three optima within two grid steps of each other on both axes.
fn statistics_agree_on_well_constrained_record() {
    // Arrange
    let pair = noisy_synth(-50.0, 1.6, 0.01, 23);
    let grid = SearchGrid::default_for(&pair).expect("default grid");

    // Act
    let fasts_and_lags: Vec<(f64, f64)> =
        [Statistic::Eigenvalue, Statistic::CrossCorrelation, Statistic::Pearson]
            .iter()
            .map(|&statistic| {
                let config = MeasurementConfig { statistic, ..MeasurementConfig::default() };
                let m = measure(&pair, &grid, &config).expect("pipeline succeeds");
                (m.fast(), m.lag())
            })
            .collect();

    // Assert
    let (f0, l0) = fasts_and_lags[0];
    for &(f, l) in &fasts_and_lags[1..] {
        assert!((f - f0).abs() <= 2.0 * grid.deg_step(), "fast {f} vs {f0}");
        assert!((l - l0).abs() <= 2.0 * grid.lag_step(), "lag {l} vs {l0}");
    }
}

#[test]
// Purpose
// -------
// Verify the bootstrap layer end to end: deterministic trials, a unit
// mass density over the surface, and a density confidence region that
// contains the measured optimum.
//
// Given
// -----
// - A measurement on the coarse grid, bootstrapped with 256 seeded
//   trials, smoothed onto the surface, thresholded at alpha = 0.05.
//
// Expect
// ------
// - Two runs of the same engine are identical.
// - The density sums to 1 and the optimum node sits at or above the
//   5% mass cutoff.
fn bootstrap_density_covers_measurement() {
    // Arrange
    let pair = noisy_synth(30.0, 1.2, 0.03, 42);
    let grid = coarse_grid(&pair);
    let m = measure(&pair, &grid, &MeasurementConfig::default()).expect("pipeline succeeds");
    let engine = BootstrapEngine::new(256, 17);

    // Act
    let vals_a = engine.run(&m).expect("bootstrap succeeds");
    let vals_b = engine.run(&m).expect("bootstrap succeeds");
    let pdf = estimate_pdf(&vals_a, m.surface()).expect("density fits");
    let level = conf_level_from_pdf(&pdf, 0.05).expect("valid alpha");

    // Assert
    assert_eq!(vals_a, vals_b, "seeded engine must reproduce its draws");
    assert!((pdf.sum() - 1.0).abs() < 1e-9, "mass = {}", pdf.sum());
    let opt = m.surface().optimum();
    assert!(
        pdf[[opt.lag_index, opt.deg_index]] >= level,
        "optimum node below the density cutoff"
    );
}

#[test]
// Purpose
// -------
// Verify the analytic confidence region covers the true operator at
// close to its nominal 95% rate over many independent noise
// realisations.
//
// Given
// -----
// - 200 seeded synthetics split at (30°, 1.2 s) with 3% noise on
//   short records, each measured on a coarse grid whose nodes include
//   the true operator exactly (angle index 12, lag index 5).
//
// Expect
// ------
// - The true node sits inside the alpha = 0.05 region in at least 180
//   of 200 trials: the nominal rate of 190 minus three binomial
//   standard deviations (~3.1 trials per sigma).
fn confidence_region_covers_truth_across_seeds() {
    // Arrange
    const TRIALS: u64 = 200;
    let mut hits = 0usize;

    for seed in 0..TRIALS {
        let pair = synth(&SynthConfig {
            fast: 30.0,
            lag: 1.2,
            noise: 0.03,
            nsamps: 301,
            seed,
            ..SynthConfig::default()
        })
        .expect("synthetic config is valid");
        let grid = coarse_grid(&pair);

        // Act
        let m = measure(&pair, &grid, &MeasurementConfig::default()).expect("pipeline succeeds");

        // The coarse grid holds 30° at angle index 12 and 1.2 s at lag
        // index 5.
        if m.mask()[[5, 12]] {
            hits += 1;
        }
    }

    // Assert
    assert!(hits >= 180, "true operator covered in only {hits} of {TRIALS} trials");
}
