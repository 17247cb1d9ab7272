//! swsplit — shear-wave splitting estimation for two-component waveforms.
//!
//! Purpose
//! -------
//! Estimate the shear-wave splitting parameters (fast polarization direction
//! and relative time lag) that best explain the anisotropic distortion of a
//! two-component seismic waveform, and quantify the statistical confidence
//! of that estimate. The crate covers the exhaustive (angle × lag) grid
//! search, the misfit statistics computed at each grid node, the F-test
//! confidence-region analysis with its spectral degrees-of-freedom
//! estimator, and a bootstrap-based alternative uncertainty estimator.
//!
//! Key behaviors
//! -------------
//! - Expose the waveform primitives (rotate, lag, chop, split/unsplit) and
//!   window geometry through the [`wave`] module.
//! - Run the full grid search over candidate splitting parameters via
//!   [`measure::grid_search`] and the high-level [`measure::Measurement`]
//!   driver, which also wires up the confidence analysis.
//! - Compute the Silver & Chan (1991) F-test confidence threshold and the
//!   marginal (Δfast, Δlag) bounds — with mandatory cyclic handling on the
//!   angle axis — through the [`confidence`] module, using the Walsh et al.
//!   (2013) degrees-of-freedom estimator.
//! - Build empirical parameter distributions by seeded, order-insensitive
//!   bootstrap resampling through the [`bootstrap`] module.
//!
//! Invariants & assumptions
//! ------------------------
//! - Waveform pairs carry an odd number of samples so that a unique centre
//!   sample exists; relative time shifts are even sample counts split
//!   symmetrically between the two components. These parity rules are
//!   enforced at construction and never silently coerced.
//! - Fast directions are angular quantities modulo 180°; every marginal
//!   computed over the angle axis treats it as periodic.
//! - All computations are pure, synchronous, and deterministic given their
//!   inputs (bootstrap routines are deterministic given a base seed);
//!   parallel execution never changes a numerical result.
//!
//! Conventions
//! -----------
//! - Angles are degrees, lags are seconds in public APIs; sample-domain
//!   routines say so in their names (`slags`, `lag_samples`).
//! - Error surfaces are `ndarray::Array2<f64>` indexed `[lag, angle]`.
//! - Each subtree owns a dedicated error enum and result alias; failures
//!   are reported through those types, never through panics, for all
//!   user-reachable invalid inputs.
//! - No logging, no global state, no I/O: results are plain numeric arrays
//!   and tuples handed to the caller's reporting layer.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a [`wave::WaveformPair`], choose a
//!   [`measure::SearchGrid`] and [`measure::Statistic`], then either call
//!   [`measure::grid_search`] directly or let [`measure::Measurement`]
//!   produce `(fast, dfast, lag, dlag)` in one step.
//! - [`bootstrap::BootstrapEngine`] cross-validates or replaces the
//!   analytic confidence level with an empirical-density one.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its own invariants; the end-to-end
//!   recovery of known splitting parameters from synthetic data is covered
//!   by `tests/integration_splitting_pipeline.rs`.

pub mod bootstrap;
pub mod confidence;
pub mod measure;
pub mod wave;
