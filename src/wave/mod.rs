//! wave — waveform pair, window geometry, and elementary operations.
//!
//! Purpose
//! -------
//! Provide the validated data model and low-level array operations every
//! splitting measurement is built on: the two-component [`WaveformPair`],
//! the odd-width analysis [`Window`], the rotate/lag/chop/split
//! primitives, time ↔ sample conversion with parity control, and
//! synthetic record generation for tests and examples.
//!
//! Key behaviors
//! -------------
//! - Enforce the parity contract once at the boundary: odd trace lengths,
//!   even relative shifts, odd window widths. Everything above this
//!   subtree may assume those invariants hold.
//! - Keep the primitives pure: inputs are never mutated; pair-level
//!   mutators (`rotate_to`, `split`, …) operate on owned state and
//!   preserve the invariants.
//!
//! Conventions
//! -----------
//! - Public APIs speak degrees and seconds; sample-domain arguments are
//!   named `nsamps`, `slag`, or `lag_samples`.
//! - Failures surface as [`WaveError`] via [`WaveResult`]; no panics for
//!   user-reachable invalid input.
//!
//! Downstream usage
//! ----------------
//! - `measure` consumes the pair and primitives for the grid search;
//!   `confidence` chops noise traces through [`Window`]; `bootstrap`
//!   resamples pair copies produced here.
//!
//! Testing notes
//! -------------
//! - Unit tests per module cover the parity rules, the rotation
//!   round-trip law, lag/chop index bookkeeping, and synthetic record
//!   determinism.

pub mod errors;
pub mod ops;
pub mod synth;
pub mod waveform;
pub mod window;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{WaveError, WaveResult};
pub use self::ops::{chop, chop_one, detrend, lag, rotate, samps2time, snr_rh, split, time2samps, unsplit, Parity};
pub use self::synth::{ricker, synth, SynthConfig};
pub use self::waveform::WaveformPair;
pub use self::window::Window;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{WaveError, WaveResult};
    pub use super::synth::{synth, SynthConfig};
    pub use super::waveform::WaveformPair;
    pub use super::window::Window;
}
