//! forecast - Bayesian estimation of an end-of-month running total.
//!
//! Purpose
//! -------
//! Collect the forecasting pipeline and its shared infrastructure: given a
//! series of completed monthly totals and the amount accumulated so far in
//! the in-progress month, produce a point forecast, a credible interval,
//! and qualitative diagnostics for the end-of-month total.
//!
//! Key behaviors
//! -------------
//! - Expose the estimator via [`ForecastOutcome`] and its constructor
//!   [`ForecastOutcome::bayesian_forecast`](bayes::ForecastOutcome::bayesian_forecast).
//! - Centralize input guards in [`validation`], ensuring the history and
//!   time context are checked once, in a consistent way, before any
//!   estimation work.
//! - Provide a dedicated error type [`ForecastError`] and result alias
//!   [`ForecastResult`] for the pipeline.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pipeline runs in five ordered stages with strictly forward data
//!   flow: validation, grid construction, prior construction, Bayesian
//!   update, summary. Each stage's output is the next stage's sole input.
//! - The whole computation is a pure function of its inputs and the fixed
//!   configuration; there is no I/O, no clock access, and no state shared
//!   across invocations.
//! - Failures are reported via [`ForecastResult`]; panics indicate
//!   programming errors, never user-facing invalid inputs.
//!
//! Conventions
//! -----------
//! - Historical series are chronological, oldest first.
//! - Degenerate numeric situations (zero-variance history, vanished
//!   posterior mass) are substituted and surfaced through the outcome's
//!   warning list rather than raised as errors.
//!
//! Downstream usage
//! ----------------
//! - Typical callers import the main surface as:
//!
//!   ```rust
//!   use monthly_forecast::forecast::{ForecastConfig, ForecastOutcome, TimeContext};
//!
//!   let history = [1000.0, 1200.0, 1500.0, 1600.0, 1700.0, 1800.0];
//!   let outcome = ForecastOutcome::bayesian_forecast(
//!       &history,
//!       900.0,
//!       TimeContext::new(15, 30),
//!       &ForecastConfig::default(),
//!   )?;
//!   # Ok::<(), monthly_forecast::forecast::ForecastError>(())
//!   ```
//!
//!   and only reach into the stage modules ([`grid`], [`prior`],
//!   [`posterior`]) when inspecting intermediate distributions.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests for its own stage; the end-to-end
//!   properties (normalization, truncation, fallback equalities, error
//!   paths) are exercised by the integration suite in `tests/`.

pub mod bayes;
pub mod config;
pub mod data;
pub mod errors;
pub mod grid;
pub mod posterior;
pub mod prior;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bayes::{CredibleInterval, ForecastOutcome};
pub use self::config::ForecastConfig;
pub use self::data::{MonthlyHistory, TimeContext};
pub use self::errors::{ForecastError, ForecastResult};
pub use self::grid::TotalGrid;
pub use self::posterior::{Posterior, bayesian_update};
pub use self::prior::{empirical_prior, recency_weights};
pub use self::validation::{MIN_HISTORY, filter_history, validate_time_context};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use monthly_forecast::forecast::prelude::*;
//
// to import the main forecasting surface in a single line.

pub mod prelude {
    pub use super::bayes::{CredibleInterval, ForecastOutcome};
    pub use super::config::ForecastConfig;
    pub use super::data::TimeContext;
    pub use super::errors::{ForecastError, ForecastResult};
}
