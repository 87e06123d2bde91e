//! forecast::data - validated inputs for the forecasting pipeline.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the two inputs the estimator
//! consumes besides the current partial: the series of completed monthly
//! totals and the time context locating the observation within the current
//! period. Centralizing validation here lets the pipeline stages assume
//! clean data.
//!
//! Key behaviors
//! -------------
//! - [`MonthlyHistory`] filters the raw series down to usable entries,
//!   enforces the minimum length, and precomputes the historical mean and
//!   population standard deviation in a single pass.
//! - [`TimeContext`] is a plain carrier for (elapsed, total) period units;
//!   the pipeline entry point validates it before use.
//!
//! Invariants & assumptions
//! ------------------------
//! - `MonthlyHistory` holds at least [`MIN_HISTORY`] strictly positive,
//!   finite totals in chronological order, oldest first.
//! - The stored standard deviation is the population form (divisor `n`);
//!   it may legitimately be zero for a constant history, and the grid
//!   builder substitutes a positive spread in that case.
//! - `TimeContext` does not constrain `elapsed <= total`; contexts drawn
//!   from a real calendar satisfy it by construction.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based and chronological; index `len() - 1` is the most
//!   recent completed month.
//! - This module performs no I/O and no logging.
//!
//! Downstream usage
//! ----------------
//! - Construct [`MonthlyHistory`] at the boundary where raw totals enter
//!   the estimator; pass it to the grid and prior builders.
//! - Build [`TimeContext`] from the caller's calendar (the core never
//!   reads a wall clock) and pass it by value.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, the short-history error (including
//!   filter-then-recount), the moment computations, and the progress
//!   fraction.

use crate::forecast::errors::{ForecastError, ForecastResult};
use crate::forecast::validation::{MIN_HISTORY, filter_history};
use ndarray::Array1;

/// MonthlyHistory - validated series of completed monthly totals.
///
/// Purpose
/// -------
/// Represent the cleaned historical record the estimator builds its prior
/// from, together with the first two moments every later stage needs.
///
/// Key behaviors
/// -------------
/// - Filters out non-positive and non-finite raw entries at construction.
/// - Fails with [`ForecastError::InsufficientHistory`] when fewer than
///   [`MIN_HISTORY`] entries survive the filter.
/// - Precomputes the mean and population standard deviation once.
///
/// Invariants
/// ----------
/// - `totals.len() >= MIN_HISTORY`; every entry is finite and > 0.
/// - `mean > 0`; `std_dev >= 0` (zero for a constant history).
///
/// Performance
/// -----------
/// - Construction is O(n): one filtering pass and one moment pass.
///   Accessors are O(1).
///
/// Notes
/// -----
/// - The container is immutable once built; the pipeline never mutates
///   history.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHistory {
    totals: Array1<f64>,
    mean: f64,
    std_dev: f64,
}

impl MonthlyHistory {
    /// Build a validated history from raw monthly totals.
    ///
    /// Parameters
    /// ----------
    /// - `raw`: `&[f64]`
    ///   Completed monthly totals in chronological order, oldest first.
    ///   Non-positive and non-finite entries are dropped, not reported.
    ///
    /// Returns
    /// -------
    /// `ForecastResult<MonthlyHistory>`
    ///   - `Ok(history)` when at least [`MIN_HISTORY`] entries survive
    ///     filtering.
    ///   - `Err(ForecastError::InsufficientHistory)` otherwise, with the
    ///     post-filter count as payload.
    ///
    /// Errors
    /// ------
    /// - `ForecastError::InsufficientHistory`
    ///   The length requirement is checked against the filtered series,
    ///   so a raw input of 6 entries containing one negative value fails.
    ///
    /// Panics
    /// ------
    /// - Never panics.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use monthly_forecast::forecast::data::MonthlyHistory;
    ///
    /// let history =
    ///     MonthlyHistory::from_raw(&[1000.0, 1200.0, 1500.0, 1600.0, 1700.0, 1800.0]).unwrap();
    /// assert_eq!(history.len(), 6);
    /// assert!(history.mean() > 0.0);
    /// ```
    pub fn from_raw(raw: &[f64]) -> ForecastResult<Self> {
        let cleaned = filter_history(raw);
        if cleaned.len() < MIN_HISTORY {
            return Err(ForecastError::InsufficientHistory {
                required: MIN_HISTORY,
                actual: cleaned.len(),
            });
        }

        let totals = Array1::from(cleaned);
        let mean = totals.sum() / totals.len() as f64;
        let variance =
            totals.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / totals.len() as f64;

        Ok(MonthlyHistory { totals, mean, std_dev: variance.sqrt() })
    }

    /// The cleaned totals, oldest first.
    pub fn totals(&self) -> &Array1<f64> {
        &self.totals
    }

    /// Number of usable completed months.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Always false; construction requires at least [`MIN_HISTORY`] entries.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Arithmetic mean of the cleaned totals.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation (divisor `n`) of the cleaned totals.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// TimeContext - position of the observation within the current period.
///
/// Purpose
/// -------
/// Carry how far into the in-progress period the current partial was
/// observed, as `elapsed` units out of `total` (e.g. day of month out of
/// days in the month). Supplied explicitly by the caller so the estimator
/// stays a deterministic function of its inputs.
///
/// Fields
/// ------
/// - `elapsed`: `u32`
///   Units of the period already elapsed. Must be positive for a Bayesian
///   update to run.
/// - `total`: `u32`
///   Total units in the period. Must be positive.
///
/// Invariants
/// ----------
/// - This type is a plain carrier; the forecast entry point rejects zero
///   components via the shared validation helper.
///
/// Notes
/// -----
/// - `Copy`, two machine words; pass by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeContext {
    /// Units of the period already elapsed (e.g. day of month).
    pub elapsed: u32,
    /// Total units in the period (e.g. days in the month).
    pub total: u32,
}

impl TimeContext {
    /// Construct a time context from elapsed and total period units.
    pub fn new(elapsed: u32, total: u32) -> TimeContext {
        TimeContext { elapsed, total }
    }

    /// Fraction of the period elapsed, `elapsed / total`.
    ///
    /// Returns
    /// -------
    /// `f64`
    ///   The progress fraction. Only meaningful once the context has
    ///   passed validation (`total > 0`).
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed) / f64::from(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `MonthlyHistory::from_raw` happy path and moment computations.
    // - The InsufficientHistory error, including the filter-then-recount
    //   ordering (raw length >= 6 but filtered length < 6 must fail).
    // - The zero-variance case for a constant history.
    // - `TimeContext::progress`.
    //
    // They intentionally DO NOT cover:
    // - The filter predicate itself, tested in forecast::validation.
    // - Zero-variance substitution, which happens in the grid builder.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `from_raw` keeps a clean six-month history and computes
    // its mean and population standard deviation.
    //
    // Given
    // -----
    // - The series [1000, 1200, 1500, 1600, 1700, 1800].
    //
    // Expect
    // ------
    // - Construction succeeds with len = 6.
    // - mean = 1466.666..., population stddev = sqrt(Σ(v - mean)² / 6).
    fn from_raw_clean_series_computes_moments() {
        // Arrange
        let raw = [1000.0_f64, 1200.0, 1500.0, 1600.0, 1700.0, 1800.0];
        let expected_mean = raw.iter().sum::<f64>() / raw.len() as f64;
        let expected_var =
            raw.iter().map(|v| (v - expected_mean).powi(2)).sum::<f64>() / raw.len() as f64;

        // Act
        let history = MonthlyHistory::from_raw(&raw).expect("six positive entries should pass");

        // Assert
        assert_eq!(history.len(), 6);
        assert!((history.mean() - expected_mean).abs() < 1e-9);
        assert!((history.std_dev() - expected_var.sqrt()).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a short raw series is rejected with the post-filter
    // count as payload.
    //
    // Given
    // -----
    // - The two-entry series [1000, 1200].
    //
    // Expect
    // ------
    // - `Err(InsufficientHistory { required: 6, actual: 2 })`.
    fn from_raw_short_series_returns_insufficient_history() {
        // Arrange
        let raw = [1000.0_f64, 1200.0];

        // Act
        let result = MonthlyHistory::from_raw(&raw);

        // Assert
        match result {
            Err(ForecastError::InsufficientHistory { required, actual }) => {
                assert_eq!(required, MIN_HISTORY);
                assert_eq!(actual, 2);
            }
            other => panic!("expected InsufficientHistory, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the length requirement is applied after filtering: a
    // six-entry raw series with one negative value leaves five usable
    // entries and must fail.
    //
    // Given
    // -----
    // - The series [1000, -200, 1500, 1800, 1600, 1900].
    //
    // Expect
    // ------
    // - `Err(InsufficientHistory { required: 6, actual: 5 })`.
    fn from_raw_recounts_after_filtering() {
        // Arrange
        let raw = [1000.0_f64, -200.0, 1500.0, 1800.0, 1600.0, 1900.0];

        // Act
        let result = MonthlyHistory::from_raw(&raw);

        // Assert
        match result {
            Err(ForecastError::InsufficientHistory { required, actual }) => {
                assert_eq!(required, MIN_HISTORY);
                assert_eq!(actual, 5);
            }
            other => panic!("expected InsufficientHistory after filtering, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a constant history yields a zero population standard
    // deviation (the substitution happens downstream, not here).
    //
    // Given
    // -----
    // - Six identical totals.
    //
    // Expect
    // ------
    // - Construction succeeds, `std_dev() == 0.0`, `mean()` equals the
    //   constant.
    fn from_raw_constant_series_has_zero_std_dev() {
        // Arrange
        let raw = [1500.0_f64; 6];

        // Act
        let history = MonthlyHistory::from_raw(&raw).expect("constant positives should pass");

        // Assert
        assert_eq!(history.mean(), 1500.0);
        assert_eq!(history.std_dev(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the progress fraction of a mid-month context.
    //
    // Given
    // -----
    // - elapsed = 15, total = 30.
    //
    // Expect
    // ------
    // - `progress()` = 0.5.
    fn time_context_progress_is_elapsed_over_total() {
        // Arrange
        let time = TimeContext::new(15, 30);

        // Act + Assert
        assert_eq!(time.progress(), 0.5);
    }
}
