//! forecast::config - fixed configuration knobs for the estimator.
//!
//! Purpose
//! -------
//! Collect the configuration constants of the forecasting pipeline in one
//! place, making each run explicit and reproducible. Every knob is fixed
//! configuration, not a learned parameter; the defaults reproduce the
//! behavior of the estimator as shipped.
//!
//! Key behaviors
//! -------------
//! - Represent the full configuration surface via [`ForecastConfig`]: grid
//!   geometry, recency weighting, smoothing, credible-interval bands, and
//!   observation-noise scaling.
//! - Keep cross-cutting configuration out of the stage code, so call sites
//!   pass one explicit options value instead of ad-hoc constants.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`ForecastConfig`] is a plain data carrier; it performs no cross-field
//!   checks. Callers overriding fields are expected to keep them in their
//!   documented domains (e.g. `0 < credible_lower < credible_upper < 1`,
//!   `num_steps >= 1`).
//! - `range_min_multiplier` and `range_max_multiplier` are reserved: the
//!   grid derives its bounds from the stddev envelope and the current
//!   partial, not from these multipliers. They are kept so existing
//!   configuration surfaces stay stable.
//!
//! Downstream usage
//! ----------------
//! - Construct via `ForecastConfig::default()` and override fields as
//!   needed for a given run; pass by reference into the forecast entry
//!   point.
//!
//! Testing notes
//! -------------
//! - Unit tests assert that `Default` matches the documented values.

/// ForecastConfig - tuning knobs for the monthly-total forecaster.
///
/// Purpose
/// -------
/// Bundle the fixed constants that shape the estimation pipeline: how wide
/// and fine the candidate-total grid is, how quickly older months lose
/// influence, how much smoothing the empirical prior receives, which
/// credible band is reported, and how observation noise is scaled.
///
/// Fields
/// ------
/// - `range_min_multiplier`: `f64`
///   Reserved lower range scaling factor. Not consulted by the grid-bound
///   formulas; see the module notes.
/// - `range_max_multiplier`: `f64`
///   Reserved upper range scaling factor. Not consulted by the grid-bound
///   formulas; see the module notes.
/// - `stddev_range`: `f64`
///   Number of historical standard deviations the grid extends around the
///   historical mean.
/// - `num_steps`: `usize`
///   Number of equal-width bins the candidate-total range is partitioned
///   into. The grid carries `num_steps + 1` points.
/// - `alpha_decay`: `f64`
///   Geometric decay applied per step back in time when weighting
///   historical totals; the most recent month always has weight 1.
/// - `pseudocount`: `f64`
///   Laplace-style smoothing mass added to every grid point of the
///   empirical prior, so no candidate total has exactly zero prior mass.
/// - `credible_lower`: `f64`
///   Cumulative posterior mass at which the credible interval's lower
///   bound is read off.
/// - `credible_upper`: `f64`
///   Cumulative posterior mass at which the credible interval's upper
///   bound is read off.
/// - `obs_noise_min`: `f64`
///   Floor of the observation noise, as a fraction of the historical mean.
/// - `obs_noise_std_mult`: `f64`
///   Multiplier on the progress-scaled historical standard deviation in
///   the observation-noise formula.
///
/// Invariants
/// ----------
/// - All fields are assumed to lie in their documented domains; this type
///   does not enforce them.
///
/// Performance
/// -----------
/// - Small `Copy`-free carrier; cheap to clone and pass by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Reserved lower range scaling factor (not used by the grid bounds).
    pub range_min_multiplier: f64,
    /// Reserved upper range scaling factor (not used by the grid bounds).
    pub range_max_multiplier: f64,
    /// Number of stddevs the grid extends around the historical mean.
    pub stddev_range: f64,
    /// Number of bins the candidate-total range is partitioned into.
    pub num_steps: usize,
    /// Geometric recency decay per step back in time.
    pub alpha_decay: f64,
    /// Smoothing mass added to every grid point of the prior.
    pub pseudocount: f64,
    /// Cumulative mass at the credible interval's lower bound.
    pub credible_lower: f64,
    /// Cumulative mass at the credible interval's upper bound.
    pub credible_upper: f64,
    /// Observation-noise floor as a fraction of the historical mean.
    pub obs_noise_min: f64,
    /// Multiplier on the progress-scaled stddev in the noise formula.
    pub obs_noise_std_mult: f64,
}

impl Default for ForecastConfig {
    /// Construct the shipped configuration.
    ///
    /// Returns
    /// -------
    /// `ForecastConfig`
    ///   The default knobs:
    ///   - `range_min_multiplier = 0.8`
    ///   - `range_max_multiplier = 1.2`
    ///   - `stddev_range = 3.0`
    ///   - `num_steps = 1000`
    ///   - `alpha_decay = 0.5`
    ///   - `pseudocount = 0.1`
    ///   - `credible_lower = 0.05`
    ///   - `credible_upper = 0.95`
    ///   - `obs_noise_min = 0.03`
    ///   - `obs_noise_std_mult = 1.0`
    fn default() -> Self {
        ForecastConfig {
            range_min_multiplier: 0.8,
            range_max_multiplier: 1.2,
            stddev_range: 3.0,
            num_steps: 1000,
            alpha_decay: 0.5,
            pseudocount: 0.1,
            credible_lower: 0.05,
            credible_upper: 0.95,
            obs_noise_min: 0.03,
            obs_noise_std_mult: 1.0,
        }
    }
}
