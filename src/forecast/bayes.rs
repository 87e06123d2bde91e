//! forecast::bayes - pipeline orchestration and posterior summary.
//!
//! Purpose
//! -------
//! Wire the pipeline stages together behind a single entry point and reduce
//! the posterior to the reported outcome: point estimate, credible interval,
//! dispersion, the diagnostic mode, and qualitative warnings.
//!
//! Key behaviors
//! -------------
//! - [`ForecastOutcome::bayesian_forecast`] validates the inputs, builds the
//!   grid, and either runs the full prior/update/summarize chain or takes
//!   the mean-based fallback path.
//! - The fallback path fires in two observable situations: too little
//!   current-period signal (`elapsed <= 1` or a non-positive partial), and
//!   a degenerate posterior whose likelihood mass vanished. Each case is
//!   named in the warnings so callers can tell a fallback from a full
//!   update.
//! - The summarizer scans the posterior in ascending grid order for the
//!   credible band, collects all applicable diagnostics (not just the
//!   first), and rounds every reported value to 2 decimals (3 for the
//!   interval position).
//!
//! Invariants & assumptions
//! ------------------------
//! - Whenever the interval position is defined it lies in [0, 1] and the
//!   expected total lies within the credible interval.
//! - The posterior mode is computed on every full update and surfaced as a
//!   diagnostic accessor rather than dropped.
//! - Each invocation is independent: no shared or mutable state, so
//!   concurrent calls need no coordination.
//!
//! Conventions
//! -----------
//! - Warning strings are complete sentences aimed at a human reading the
//!   forecast, not machine-parsed codes.
//!
//! Downstream usage
//! ----------------
//! - Library callers use [`ForecastOutcome::bayesian_forecast`] and the
//!   accessors; presentation layers may serialize the outcome directly
//!   (warnings are omitted from the serialized form when absent).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the fallback equalities, each diagnostic branch, the
//!   rounding rules, and warning serialization. The integration suite
//!   exercises the full pipeline against the documented properties.

use crate::forecast::config::ForecastConfig;
use crate::forecast::data::{MonthlyHistory, TimeContext};
use crate::forecast::errors::ForecastResult;
use crate::forecast::grid::TotalGrid;
use crate::forecast::posterior::bayesian_update;
use crate::forecast::prior::empirical_prior;
use crate::forecast::validation::validate_time_context;
use ndarray::Array1;
use serde::Serialize;

const SKIPPED_UPDATE_WARNING: &str =
    "Insufficient current-month data for a Bayesian update; using the historical mean only.";
const DEGENERATE_POSTERIOR_WARNING: &str =
    "Posterior mass vanished during the Bayesian update; using the historical mean only.";

/// CredibleInterval - central credible band of the posterior.
///
/// Fields
/// ------
/// - `lower`: grid point where the cumulative mass first reaches the
///   configured lower band.
/// - `upper`: grid point where it first reaches the upper band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CredibleInterval {
    /// Lower bound of the credible band.
    pub lower: f64,
    /// Upper bound of the credible band.
    pub upper: f64,
}

/// ForecastOutcome - summary of one end-of-month forecast.
///
/// Purpose
/// -------
/// Represent the outcome of a single forecast invocation: the posterior
/// mean as the point estimate, the central credible interval with its
/// width and the mean's position inside it, the posterior standard
/// deviation, the diagnostic posterior mode, and any warnings about how
/// the result was produced.
///
/// Key behaviors
/// -------------
/// - Constructed exclusively via [`ForecastOutcome::bayesian_forecast`],
///   which runs the whole pipeline.
/// - Every reported value is rounded: 2 decimal places throughout, 3 for
///   the interval position.
/// - Serializes with `serde`; the warning list is omitted when empty.
///
/// Fields
/// ------
/// - `expected_total`: posterior mean.
/// - `credible_interval`: central band, default 5th to 95th percentile.
/// - `interval_width`: `upper - lower`.
/// - `position_in_interval`: `(expected - lower) / width`, `None` when
///   the width is zero.
/// - `posterior_stddev`: dispersion of the posterior.
/// - `posterior_mode`: most probable candidate total (diagnostic).
/// - `warnings`: qualitative diagnostics; `None` when none apply.
///
/// Invariants
/// ----------
/// - On the fallback paths the fields satisfy the documented mean/stddev
///   equalities and exactly one warning names the fallback.
///
/// Performance
/// -----------
/// - A flat value object; cloning is dominated by the warning strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutcome {
    expected_total: f64,
    credible_interval: CredibleInterval,
    interval_width: f64,
    position_in_interval: Option<f64>,
    posterior_stddev: f64,
    posterior_mode: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
}

impl ForecastOutcome {
    /// Forecast the end-of-month total from history and the current partial.
    ///
    /// Parameters
    /// ----------
    /// - `historical`: `&[f64]`
    ///   Completed monthly totals, oldest first. Non-positive and
    ///   non-finite entries are filtered out; at least 6 must remain.
    /// - `current_partial`: `f64`
    ///   Amount accumulated so far in the current month. Non-negative.
    /// - `time`: [`TimeContext`]
    ///   Position within the current period, supplied by the caller (the
    ///   estimator never reads a clock).
    /// - `config`: `&ForecastConfig`
    ///   Fixed tuning knobs; `ForecastConfig::default()` reproduces the
    ///   shipped behavior.
    ///
    /// Returns
    /// -------
    /// `ForecastResult<ForecastOutcome>`
    ///   - `Ok(outcome)` with the summary described on the type.
    ///   - `Err(ForecastError)` when validation rejects the inputs.
    ///
    /// Errors
    /// ------
    /// - `ForecastError::InsufficientHistory`
    ///   Fewer than 6 positive totals remain after filtering.
    /// - `ForecastError::InvalidTimeContext`
    ///   `elapsed` or `total` is zero.
    ///
    /// Panics
    /// ------
    /// - Never panics; degenerate numeric situations fall back to the
    ///   historical mean and are flagged in the warnings.
    ///
    /// Notes
    /// -----
    /// - With `elapsed <= 1` or `current_partial <= 0` the Bayesian update
    ///   is skipped entirely and the result is built from the historical
    ///   moments: expected = mean, interval = mean ± 2·std, width =
    ///   4·std, position = 0.5, stddev = std, plus the skip warning.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use monthly_forecast::forecast::{ForecastConfig, ForecastOutcome, TimeContext};
    ///
    /// let history = [1000.0, 1200.0, 1500.0, 1600.0, 1700.0, 1800.0];
    /// let outcome = ForecastOutcome::bayesian_forecast(
    ///     &history,
    ///     900.0,
    ///     TimeContext::new(15, 30),
    ///     &ForecastConfig::default(),
    /// )
    /// .unwrap();
    ///
    /// assert!(outcome.expected_total() >= 900.0);
    /// assert!(outcome.interval_width() > 0.0);
    /// ```
    pub fn bayesian_forecast(
        historical: &[f64], current_partial: f64, time: TimeContext, config: &ForecastConfig,
    ) -> ForecastResult<ForecastOutcome> {
        validate_time_context(time.elapsed, time.total)?;
        let history = MonthlyHistory::from_raw(historical)?;
        let grid = TotalGrid::build(&history, current_partial, config);

        // Too early in the period for the partial to carry signal.
        if time.elapsed <= 1 || current_partial <= 0.0 {
            return Ok(mean_fallback(&grid, SKIPPED_UPDATE_WARNING));
        }

        let prior = empirical_prior(&grid, &history, config);
        let posterior = bayesian_update(&prior, &grid, current_partial, time, config);
        if posterior.degenerate {
            return Ok(mean_fallback(&grid, DEGENERATE_POSTERIOR_WARNING));
        }

        Ok(summarize(&posterior.weights, &grid, config))
    }

    /// Posterior mean: the point forecast for the end-of-month total.
    pub fn expected_total(&self) -> f64 {
        self.expected_total
    }

    /// Central credible interval of the posterior.
    pub fn credible_interval(&self) -> CredibleInterval {
        self.credible_interval
    }

    /// Width of the credible interval.
    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    /// Normalized position of the mean within the interval (0 = lower,
    /// 1 = upper), or `None` when the interval has zero width.
    pub fn position_in_interval(&self) -> Option<f64> {
        self.position_in_interval
    }

    /// Standard deviation of the posterior.
    pub fn posterior_stddev(&self) -> f64 {
        self.posterior_stddev
    }

    /// Most probable candidate total (diagnostic).
    pub fn posterior_mode(&self) -> f64 {
        self.posterior_mode
    }

    /// Diagnostic warnings, or `None` when none apply.
    pub fn warnings(&self) -> Option<&[String]> {
        self.warnings.as_deref()
    }
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Round to 2 decimal places.
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 3 decimal places (interval position only).
#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Result built from the historical moments when no usable posterior
/// exists. Expected = mean, interval = mean ± 2·std, width = 4·std,
/// position = 0.5, stddev = std, mode = mean; `warning` names the reason.
fn mean_fallback(grid: &TotalGrid, warning: &str) -> ForecastOutcome {
    let mean = grid.mean();
    let std_dev = grid.std_dev();
    ForecastOutcome {
        expected_total: round2(mean),
        credible_interval: CredibleInterval {
            lower: round2(mean - 2.0 * std_dev),
            upper: round2(mean + 2.0 * std_dev),
        },
        interval_width: round2(4.0 * std_dev),
        position_in_interval: Some(0.5),
        posterior_stddev: round2(std_dev),
        posterior_mode: round2(mean),
        warnings: Some(vec![warning.to_string()]),
    }
}

/// Reduce a normalized posterior to the reported outcome.
///
/// Scans the grid in ascending order for the credible band (the scan stops
/// as soon as the upper bound is found; if cumulative rounding left the
/// upper band unreached, the last grid point stands in), then derives the
/// width, position, dispersion, mode, and diagnostics.
fn summarize(
    posterior: &Array1<f64>, grid: &TotalGrid, config: &ForecastConfig,
) -> ForecastOutcome {
    let totals = grid.totals();

    let expected: f64 = totals.iter().zip(posterior.iter()).map(|(&g, &p)| g * p).sum();

    let mut mode = totals[0];
    let mut mode_mass = posterior[0];
    for (k, &p) in posterior.iter().enumerate() {
        if p > mode_mass {
            mode_mass = p;
            mode = totals[k];
        }
    }

    let mut cumulative = 0.0;
    let mut lower = None;
    let mut upper = None;
    for (k, &p) in posterior.iter().enumerate() {
        cumulative += p;
        if lower.is_none() && cumulative >= config.credible_lower {
            lower = Some(totals[k]);
        }
        if cumulative >= config.credible_upper {
            upper = Some(totals[k]);
            break;
        }
    }
    let lower = lower.unwrap_or(totals[0]);
    let upper = upper.unwrap_or(totals[totals.len() - 1]);

    let width = upper - lower;
    let position = if width > 0.0 { Some((expected - lower) / width) } else { None };

    let variance: f64 =
        totals.iter().zip(posterior.iter()).map(|(&g, &p)| (g - expected).powi(2) * p).sum();

    let warnings = diagnostics(expected, width, position);

    ForecastOutcome {
        expected_total: round2(expected),
        credible_interval: CredibleInterval { lower: round2(lower), upper: round2(upper) },
        interval_width: round2(width),
        position_in_interval: position.map(round3),
        posterior_stddev: round2(variance.sqrt()),
        posterior_mode: round2(mode),
        warnings: if warnings.is_empty() { None } else { Some(warnings) },
    }
}

/// Collect all applicable qualitative diagnostics. Evaluated only when the
/// interval position is defined; multiple warnings may co-occur.
fn diagnostics(expected: f64, width: f64, position: Option<f64>) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(position) = position else {
        return warnings;
    };

    if position < 0.10 {
        warnings.push(
            "Forecast is near the lower end of the credible interval; possible regime change \
             or outlier."
                .to_string(),
        );
    }
    if position > 0.90 {
        warnings.push(
            "Forecast is near the upper end of the credible interval; possible regime change \
             or outlier."
                .to_string(),
        );
    }
    if width > 2.0 * expected {
        warnings.push(
            "Forecast uncertainty is very high; the interval is more than twice the mean. \
             Use with caution."
                .to_string(),
        );
    }
    if width <= 0.2 * expected {
        warnings.push(
            "Forecast is precise: the credible interval is narrow and can be used with high \
             confidence for planning."
                .to_string(),
        );
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The mean-fallback equalities for the skipped update and the
    //   degenerate posterior, including their warnings.
    // - The summarizer on small handcrafted posteriors: expected value,
    //   mode, credible-interval scan, position, and stddev.
    // - Each diagnostic branch and their co-occurrence.
    // - Rounding rules and warning serialization.
    //
    // They intentionally DO NOT cover:
    // - Full-pipeline behavior on realistic histories; see the
    //   integration suite.
    // -------------------------------------------------------------------------

    fn history() -> Vec<f64> {
        vec![1000.0, 1200.0, 1500.0, 1600.0, 1700.0, 1800.0]
    }

    #[test]
    // Purpose
    // -------
    // Verify the skipped-update fallback on day one: the result is built
    // from the historical moments and carries the skip warning.
    //
    // Given
    // -----
    // - The sample history, partial = 500, elapsed = 1 of 30.
    //
    // Expect
    // ------
    // - expected = round2(mean), interval = mean ± 2·std, width = 4·std,
    //   position = 0.5, stddev = round2(std), and one warning mentioning
    //   the historical mean.
    fn bayesian_forecast_day_one_uses_mean_fallback() {
        // Arrange
        let history = history();
        let config = ForecastConfig::default();
        let mean = history.iter().sum::<f64>() / history.len() as f64;
        let variance =
            history.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / history.len() as f64;
        let std_dev = variance.sqrt();

        // Act
        let outcome = ForecastOutcome::bayesian_forecast(
            &history,
            500.0,
            TimeContext::new(1, 30),
            &config,
        )
        .expect("valid inputs should not error");

        // Assert
        assert_eq!(outcome.expected_total(), round2(mean));
        assert_eq!(outcome.credible_interval().lower, round2(mean - 2.0 * std_dev));
        assert_eq!(outcome.credible_interval().upper, round2(mean + 2.0 * std_dev));
        assert_eq!(outcome.interval_width(), round2(4.0 * std_dev));
        assert_eq!(outcome.position_in_interval(), Some(0.5));
        assert_eq!(outcome.posterior_stddev(), round2(std_dev));
        let warnings = outcome.warnings().expect("fallback must carry a warning");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("historical mean"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a non-positive partial also takes the fallback path,
    // regardless of elapsed time.
    //
    // Given
    // -----
    // - The sample history, partial = 0.0, elapsed = 15 of 30.
    //
    // Expect
    // ------
    // - Position = 0.5 and the skip warning is present.
    fn bayesian_forecast_zero_partial_uses_mean_fallback() {
        // Arrange + Act
        let outcome = ForecastOutcome::bayesian_forecast(
            &history(),
            0.0,
            TimeContext::new(15, 30),
            &ForecastConfig::default(),
        )
        .expect("valid inputs should not error");

        // Assert
        assert_eq!(outcome.position_in_interval(), Some(0.5));
        assert!(
            outcome.warnings().expect("fallback must warn")[0].contains("Insufficient"),
            "the skip warning should name the missing current-month data"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the degenerate-posterior fallback through the public entry
    // point: a partial wildly inconsistent with the whole grid makes the
    // likelihood underflow to zero at every surviving candidate, and the
    // outcome names the vanished posterior.
    //
    // Given
    // -----
    // - A small-scale history (totals near 100) and a partial of 1e9
    //   mid-month. Candidates at or above the partial expect a partial
    //   near half their value, hundreds of millions away from the
    //   observation relative to a single-digit noise, so every normal
    //   density evaluates to exactly zero.
    //
    // Expect
    // ------
    // - The forecast still succeeds, equals the mean-based fallback, and
    //   carries the degenerate-posterior warning verbatim.
    fn bayesian_forecast_degenerate_posterior_falls_back_to_mean() {
        // Arrange
        let small_history = [95.0, 98.0, 100.0, 102.0, 104.0, 101.0];
        let mean = small_history.iter().sum::<f64>() / small_history.len() as f64;

        // Act
        let outcome = ForecastOutcome::bayesian_forecast(
            &small_history,
            1.0e9,
            TimeContext::new(15, 30),
            &ForecastConfig::default(),
        )
        .expect("degeneracy must not become an error");

        // Assert
        assert_eq!(outcome.expected_total(), round2(mean));
        assert_eq!(outcome.posterior_mode(), round2(mean));
        assert_eq!(
            outcome.warnings().expect("fallback must warn"),
            &[DEGENERATE_POSTERIOR_WARNING.to_string()]
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the summarizer on a handcrafted posterior: expected value,
    // mode, interval scan, position, and stddev all follow from the
    // weights directly.
    //
    // Given
    // -----
    // - A real grid over the sample history and a posterior that puts
    //   mass 0.2 on the first point, 0.5 on a middle point, and 0.3 on
    //   the last point.
    //
    // Expect
    // ------
    // - expected = Σ g·p (rounded), mode = the middle point, lower = the
    //   first point (cumulative 0.2 >= 0.05), upper = the last point
    //   (cumulative reaches 0.95 only there), and the stddev matches the
    //   explicit sum.
    fn summarize_reduces_a_handcrafted_posterior() {
        // Arrange
        let history = crate::forecast::data::MonthlyHistory::from_raw(&history()).unwrap();
        let config = ForecastConfig::default();
        let grid = TotalGrid::build(&history, 900.0, &config);
        let n = grid.len();
        let mid = n / 2;
        let mut weights = Array1::from_elem(n, 0.0);
        weights[0] = 0.2;
        weights[mid] = 0.5;
        weights[n - 1] = 0.3;

        let g0 = grid.totals()[0];
        let gm = grid.totals()[mid];
        let gn = grid.totals()[n - 1];
        let expected = 0.2 * g0 + 0.5 * gm + 0.3 * gn;
        let variance = 0.2 * (g0 - expected).powi(2)
            + 0.5 * (gm - expected).powi(2)
            + 0.3 * (gn - expected).powi(2);

        // Act
        let outcome = summarize(&weights, &grid, &config);

        // Assert
        assert_eq!(outcome.expected_total(), round2(expected));
        assert_eq!(outcome.posterior_mode(), round2(gm));
        assert_eq!(outcome.credible_interval().lower, round2(g0));
        assert_eq!(outcome.credible_interval().upper, round2(gn));
        assert_eq!(outcome.interval_width(), round2(gn - g0));
        assert_eq!(
            outcome.position_in_interval(),
            Some(round3((expected - g0) / (gn - g0)))
        );
        assert_eq!(outcome.posterior_stddev(), round2(variance.sqrt()));
    }

    #[test]
    // Purpose
    // -------
    // Verify each diagnostic branch and that applicable warnings
    // co-occur rather than short-circuiting.
    //
    // Given
    // -----
    // - Handcrafted (expected, width, position) triples hitting the
    //   near-lower, near-upper, high-uncertainty, and precise branches.
    //
    // Expect
    // ------
    // - Each branch fires on its own trigger; a low position combined
    //   with a wide interval yields both of those warnings at once.
    fn diagnostics_collects_all_applicable_warnings() {
        // Arrange + Act
        let near_lower = diagnostics(1000.0, 500.0, Some(0.05));
        let near_upper = diagnostics(1000.0, 500.0, Some(0.95));
        let very_wide = diagnostics(1000.0, 2500.0, Some(0.5));
        let precise = diagnostics(1000.0, 150.0, Some(0.5));
        let low_and_wide = diagnostics(1000.0, 2500.0, Some(0.05));
        let undefined = diagnostics(1000.0, 0.0, None);

        // Assert
        assert_eq!(near_lower.len(), 1);
        assert!(near_lower[0].contains("lower end"));
        assert_eq!(near_upper.len(), 1);
        assert!(near_upper[0].contains("upper end"));
        assert_eq!(very_wide.len(), 1);
        assert!(very_wide[0].contains("very high"));
        assert_eq!(precise.len(), 1);
        assert!(precise[0].contains("precise"));
        assert_eq!(low_and_wide.len(), 2);
        assert!(undefined.is_empty(), "no diagnostics without a defined position");
    }

    #[test]
    // Purpose
    // -------
    // Verify the rounding helpers used across the outcome.
    //
    // Given
    // -----
    // - Values with more precision than the reported form.
    //
    // Expect
    // ------
    // - `round2` keeps 2 decimals, `round3` keeps 3.
    fn rounding_helpers_match_reported_precision() {
        // Arrange + Act + Assert
        assert_eq!(round2(1466.66666), 1466.67);
        assert_eq!(round2(-12.345), -12.35);
        assert_eq!(round3(0.51249), 0.512);
        assert_eq!(round3(0.5), 0.5);
    }

    #[test]
    // Purpose
    // -------
    // Verify that serialization omits the warning list when no warnings
    // apply and includes it otherwise.
    //
    // Given
    // -----
    // - A mid-month outcome (may or may not warn) rebuilt with warnings
    //   stripped, and a fallback outcome that always warns.
    //
    // Expect
    // ------
    // - The stripped outcome's JSON has no "warnings" key; the fallback's
    //   does.
    fn outcome_serializes_warnings_only_when_present() {
        // Arrange
        let history = crate::forecast::data::MonthlyHistory::from_raw(&history()).unwrap();
        let grid = TotalGrid::build(&history, 900.0, &ForecastConfig::default());
        let with_warning = mean_fallback(&grid, SKIPPED_UPDATE_WARNING);
        let without_warning = ForecastOutcome { warnings: None, ..with_warning.clone() };

        // Act
        let json_with = serde_json::to_string(&with_warning).expect("serializable");
        let json_without = serde_json::to_string(&without_warning).expect("serializable");

        // Assert
        assert!(json_with.contains("warnings"));
        assert!(!json_without.contains("warnings"));
    }
}
