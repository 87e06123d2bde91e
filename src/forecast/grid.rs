//! forecast::grid - candidate-total lattice for the discretized posterior.
//!
//! Purpose
//! -------
//! Build the evenly spaced grid of candidate end-of-month totals over which
//! the prior and posterior are represented. The grid must be wide enough to
//! cover both normal historical variation and an unusually small or large
//! current partial, while staying fine-grained enough for a smooth
//! posterior.
//!
//! Key behaviors
//! -------------
//! - Derive the grid bounds from the historical mean and standard
//!   deviation (a `stddev_range`-wide envelope) joined with the plausible
//!   completions of the current partial.
//! - Clamp the lower bound so the grid never starts above 95% of the
//!   current partial.
//! - Substitute a positive spread when the history has zero variance, so
//!   downstream width computations never degenerate.
//! - Floor the histogram bandwidth at 1.0 to avoid degenerate bins when
//!   the range is very small.
//!
//! Invariants & assumptions
//! ------------------------
//! - The grid is strictly increasing with a constant step and carries
//!   `num_steps + 1` points spanning `[lower, upper]` inclusively.
//! - `upper > lower` always holds: the stored spread is strictly positive,
//!   so the stddev envelope alone guarantees a positive range.
//! - The moments stored on the grid are the values the bounds were built
//!   from, after the zero-variance substitution; later stages read them
//!   from here rather than recomputing.
//!
//! Conventions
//! -----------
//! - `config.num_steps >= 1` is a documented configuration invariant, not
//!   re-checked here.
//!
//! Downstream usage
//! ----------------
//! - The prior builder bins historical totals onto this grid using
//!   `bandwidth()`; the updater and summarizer iterate `totals()` in
//!   ascending order.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the bound formulas, the clamp, monotonicity and
//!   constant step, the zero-variance substitution, and the bandwidth
//!   floor.

use crate::forecast::config::ForecastConfig;
use crate::forecast::data::MonthlyHistory;
use ndarray::Array1;

/// TotalGrid - ordered candidate totals plus the moments they were built from.
///
/// Purpose
/// -------
/// Hold the discretized domain of possible end-of-month totals together
/// with the histogram bandwidth and the (possibly substituted) historical
/// moments, so every later stage works from one consistent geometry.
///
/// Fields
/// ------
/// - `totals`: strictly increasing candidate totals, constant step.
/// - `bandwidth`: histogram bin width used by the prior builder, floored
///   at 1.0.
/// - `mean`: historical mean the bounds were derived from.
/// - `std_dev`: historical population stddev after the zero-variance
///   substitution; strictly positive.
///
/// Invariants
/// ----------
/// - `totals.len() == num_steps + 1`; `totals[0] == lower`,
///   `totals[len - 1] == upper` up to floating-point rounding.
/// - `std_dev > 0`.
///
/// Performance
/// -----------
/// - Construction is O(num_steps); accessors are O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct TotalGrid {
    totals: Array1<f64>,
    bandwidth: f64,
    mean: f64,
    std_dev: f64,
}

impl TotalGrid {
    /// Build the candidate-total grid for one forecast invocation.
    ///
    /// Parameters
    /// ----------
    /// - `history`: `&MonthlyHistory`
    ///   Validated historical totals supplying the mean and stddev.
    /// - `current_partial`: `f64`
    ///   Amount accumulated so far in the current period; widens the grid
    ///   so its plausible completions are always covered.
    /// - `config`: `&ForecastConfig`
    ///   Supplies `stddev_range`, `num_steps`, and the `obs_noise_min`
    ///   fraction used in the zero-variance substitution.
    ///
    /// Returns
    /// -------
    /// `TotalGrid`
    ///   The lattice described in the module docs. Bounds:
    ///   - `lower = min(mean - stddev_range·std, 0.95·partial,
    ///     partial - 0.25·mean)`, clamped to at most `0.95·partial`;
    ///   - `upper = max(mean + stddev_range·std, 1.25·partial,
    ///     partial + 0.5·mean)`.
    ///
    /// Errors
    /// ------
    /// - Never returns an error; degenerate history variance is handled by
    ///   substituting `max(mean · obs_noise_min, 1.0)` for the spread.
    ///
    /// Panics
    /// ------
    /// - Never panics for `config.num_steps >= 1`.
    ///
    /// Notes
    /// -----
    /// - The bandwidth divides the range by the number of grid points
    ///   (`num_steps + 1`), matching the histogram geometry the prior
    ///   builder expects, and is floored at 1.0.
    pub fn build(
        history: &MonthlyHistory, current_partial: f64, config: &ForecastConfig,
    ) -> TotalGrid {
        let mean = history.mean();
        let mut std_dev = history.std_dev();
        if std_dev == 0.0 {
            std_dev = (mean * config.obs_noise_min).max(1.0);
        }

        let mut lower = (mean - config.stddev_range * std_dev)
            .min(0.95 * current_partial)
            .min(current_partial - 0.25 * mean);
        let upper = (mean + config.stddev_range * std_dev)
            .max(1.25 * current_partial)
            .max(current_partial + 0.5 * mean);
        if lower > 0.95 * current_partial {
            lower = 0.95 * current_partial;
        }

        let step = (upper - lower) / config.num_steps as f64;
        let totals = Array1::from_iter((0..=config.num_steps).map(|i| lower + step * i as f64));
        let bandwidth = ((upper - lower) / totals.len() as f64).max(1.0);

        TotalGrid { totals, bandwidth, mean, std_dev }
    }

    /// Candidate totals in ascending order.
    pub fn totals(&self) -> &Array1<f64> {
        &self.totals
    }

    /// Number of grid points (`num_steps + 1`).
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Always false; the grid carries at least two points.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Histogram bin width used when binning historical totals.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Historical mean the bounds were derived from.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Historical spread after the zero-variance substitution; always > 0.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}
