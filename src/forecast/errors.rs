//! forecast::errors - shared error types for the forecasting pipeline.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the monthly-total
//! forecaster and its validation helpers. This keeps input-validation
//! failures localized and exposes a small, stable error surface to callers.
//!
//! Key behaviors
//! -------------
//! - Define [`ForecastResult`] and [`ForecastError`] as the canonical result
//!   and error types for the forecasting pipeline.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//!
//! Invariants & assumptions
//! ------------------------
//! - The pipeline has exactly two checked failure kinds, both detected
//!   before any estimation work happens: a history that is too short after
//!   filtering, and a time context with a non-positive component.
//! - Numerically degenerate situations (zero-variance history, vanished
//!   posterior mass) are handled by substitution and surfaced through the
//!   outcome's warning list, never through this enum.
//! - `ForecastError` values are small, cheap to clone, and suitable for use
//!   in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g. "need
//!   at least 6 positive monthly totals") rather than low-level details.
//! - Each variant carries just enough payload to allow downstream logging
//!   and debugging without retaining large data structures.
//!
//! Downstream usage
//! ----------------
//! - The validation helpers and the forecast entry point return
//!   [`ForecastResult<T>`] to propagate failures cleanly to callers.
//! - Binary frontends may rely on the `std::error::Error` impl to wrap
//!   these values in their own reporting layers.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (counts or offending time-context values).

pub type ForecastResult<T> = Result<T, ForecastError>;

/// ForecastError - error conditions for the monthly-total forecaster.
///
/// Purpose
/// -------
/// Represent all checked validation failures that can occur before the
/// forecasting pipeline runs. Degenerate numeric conditions inside the
/// pipeline are not errors; they are substituted and flagged in the
/// outcome's warnings.
///
/// Variants
/// --------
/// - `InsufficientHistory { required, actual }`
///   Fewer than `required` strictly positive monthly totals remain after
///   filtering the raw history; `actual` is the post-filter count.
/// - `InvalidTimeContext { elapsed, total }`
///   The supplied time context has a zero `elapsed` or `total` component,
///   so progress through the period cannot be formed.
///
/// Invariants
/// ----------
/// - `InsufficientHistory` always satisfies `actual < required`.
/// - `InvalidTimeContext` is only produced when at least one of the two
///   payload fields is zero.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    //------ Input validation errors ------
    InsufficientHistory { required: usize, actual: usize },
    InvalidTimeContext { elapsed: u32, total: u32 },
}

impl std::error::Error for ForecastError {}

impl std::fmt::Display for ForecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForecastError::InsufficientHistory { required, actual } => {
                write!(
                    f,
                    "Not enough valid historical data: need at least {required} positive \
                     monthly totals, got {actual}."
                )
            }
            ForecastError::InvalidTimeContext { elapsed, total } => {
                write!(
                    f,
                    "Invalid time context: elapsed = {elapsed}, total = {total}. \
                     Both must be positive."
                )
            }
        }
    }
}
