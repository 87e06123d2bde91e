//! monthly_forecast - Bayesian end-of-month forecasting for running totals.
//!
//! Purpose
//! -------
//! Serve as the crate root for a self-contained statistical estimator: from
//! a series of completed monthly totals and the amount accumulated so far
//! in the current month, forecast the end-of-month total with a credible
//! interval and qualitative diagnostics.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`forecast`] module as the public crate surface.
//! - Keep the estimator a pure, deterministic function of its inputs: the
//!   position within the month is an explicit [`forecast::TimeContext`]
//!   argument, never a wall-clock read.
//!
//! Invariants & assumptions
//! ------------------------
//! - No persistence, no network, no state shared across invocations; each
//!   call is independent and may run concurrently with others without
//!   coordination.
//! - All heavy numerical work lives in the [`forecast`] stage modules; the
//!   `fcast` binary shipped with the crate is a thin presentation layer
//!   that sources data, derives the calendar context, and prints the
//!   outcome.
//!
//! Downstream usage
//! ----------------
//! - Library callers depend on [`forecast`] directly:
//!
//!   ```rust
//!   use monthly_forecast::forecast::{ForecastConfig, ForecastOutcome, TimeContext};
//!
//!   let history = [5121.11, 7519.06, 7781.19, 8492.45, 8372.08, 9314.49];
//!   let outcome = ForecastOutcome::bayesian_forecast(
//!       &history,
//!       4199.0,
//!       TimeContext::new(12, 31),
//!       &ForecastConfig::default(),
//!   )?;
//!   println!("expected end-of-month total: {}", outcome.expected_total());
//!   # Ok::<(), monthly_forecast::forecast::ForecastError>(())
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each stage module; the integration suite under
//!   `tests/` exercises the public API end to end.

pub mod forecast;
