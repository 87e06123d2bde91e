//! forecast::posterior - truncated-normal Bayesian update of the prior.
//!
//! Purpose
//! -------
//! Combine the empirical prior with the likelihood of the observed partial
//! under each candidate total, producing a normalized posterior over the
//! grid. A candidate total below what has already accumulated is impossible
//! and receives exactly zero mass (hard truncation, not a soft penalty).
//!
//! Key behaviors
//! -------------
//! - Model the observed partial as normally distributed around
//!   `candidate · progress` with a progress-scaled noise floored at a
//!   fraction of the historical mean.
//! - Zero out every candidate below the current partial before weighing
//!   likelihoods.
//! - Normalize the surviving mass to 1; when it vanishes entirely (a
//!   pathological-input case), report the update as degenerate instead of
//!   failing.
//!
//! Invariants & assumptions
//! ------------------------
//! - The prior has the grid's length and unit mass; the grid's stored
//!   spread is strictly positive, so the observation noise is too.
//! - On a non-degenerate update, the returned weights sum to 1 and are
//!   exactly 0 wherever `candidate < current_partial`.
//! - On a degenerate update, every weight is exactly 0 and `degenerate`
//!   is set; the orchestrator substitutes a fallback result and flags it.
//!
//! Conventions
//! -----------
//! - The likelihood normal is constructed once, centered at zero, and
//!   evaluated at `partial - candidate · progress`; the noise does not
//!   vary across the grid.
//!
//! Downstream usage
//! ----------------
//! - The summarizer reduces the returned weights to the point estimate,
//!   credible interval, and dispersion diagnostics.
//!
//! Testing notes
//! -------------
//! - Unit tests cover normalization, the truncation invariant, the noise
//!   formula's floor, and the all-truncated degenerate case.

use crate::forecast::config::ForecastConfig;
use crate::forecast::data::TimeContext;
use crate::forecast::grid::TotalGrid;
use ndarray::Array1;
use statrs::distribution::{Continuous, Normal};

/// Posterior - normalized posterior weights plus the degeneracy flag.
///
/// Purpose
/// -------
/// Carry the result of one Bayesian update: a distribution over the grid
/// when any likelihood mass survived, or an all-zero vector with
/// `degenerate = true` when none did.
///
/// Fields
/// ------
/// - `weights`: `Array1<f64>`
///   One weight per grid point. Sums to 1 when `degenerate` is false;
///   all zero otherwise.
/// - `degenerate`: `bool`
///   True when the total unnormalized mass was zero and no posterior
///   exists.
///
/// Invariants
/// ----------
/// - `weights[k] == 0.0` for every grid point below the current partial,
///   regardless of `degenerate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    /// Normalized posterior weights (all zero when degenerate).
    pub weights: Array1<f64>,
    /// Whether the total likelihood mass vanished.
    pub degenerate: bool,
}

/// Observation noise for a partial observed at the given progress.
///
/// Parameters
/// ----------
/// - `mean`: historical mean (floor anchor).
/// - `std_dev`: historical spread, strictly positive.
/// - `progress`: fraction of the period elapsed.
/// - `config`: supplies `obs_noise_std_mult` and `obs_noise_min`.
///
/// Returns
/// -------
/// `f64`
///   `max(std_dev · progress · obs_noise_std_mult, mean · obs_noise_min)`:
///   the assumed stddev of the partial around its expected value. It
///   shrinks with progress but never below the mean-proportional floor.
#[inline]
fn observation_noise(mean: f64, std_dev: f64, progress: f64, config: &ForecastConfig) -> f64 {
    (std_dev * progress * config.obs_noise_std_mult).max(mean * config.obs_noise_min)
}

/// Run the truncated-normal Bayesian update over the grid.
///
/// Parameters
/// ----------
/// - `prior`: `&Array1<f64>`
///   Normalized prior weights, one per grid point.
/// - `grid`: `&TotalGrid`
///   Candidate totals plus the moments the noise is derived from.
/// - `current_partial`: `f64`
///   Amount accumulated so far; candidates below it are impossible.
/// - `time`: `TimeContext`
///   Validated position within the period; supplies the progress
///   fraction.
/// - `config`: `&ForecastConfig`
///   Observation-noise scaling knobs.
///
/// Returns
/// -------
/// [`Posterior`]
///   Normalized posterior weights, or the degenerate all-zero vector when
///   no candidate carried likelihood mass.
///
/// Errors
/// ------
/// - Never returns an error; degeneracy is reported through the flag.
///
/// Panics
/// ------
/// - Never panics: the observation noise is strictly positive because the
///   grid's spread and mean are, so the likelihood normal always
///   constructs.
///
/// Notes
/// -----
/// - The early-period short-circuit (`elapsed <= 1` or
///   `current_partial <= 0`) is the orchestrator's concern; by the time
///   this function runs, a genuine update is wanted.
pub fn bayesian_update(
    prior: &Array1<f64>, grid: &TotalGrid, current_partial: f64, time: TimeContext,
    config: &ForecastConfig,
) -> Posterior {
    let progress = time.progress();
    let noise = observation_noise(grid.mean(), grid.std_dev(), progress, config);
    let likelihood = Normal::new(0.0, noise).expect("observation noise is strictly positive");

    let mut weights = Array1::from_elem(grid.len(), 0.0);
    let mut total_mass = 0.0;
    for (k, &candidate) in grid.totals().iter().enumerate() {
        // A total can never be below what has already accumulated.
        if candidate < current_partial {
            continue;
        }
        let expected_partial = candidate * progress;
        let mass = prior[k] * likelihood.pdf(current_partial - expected_partial);
        weights[k] = mass;
        total_mass += mass;
    }

    if total_mass > 0.0 {
        weights /= total_mass;
        Posterior { weights, degenerate: false }
    } else {
        Posterior { weights, degenerate: true }
    }
}
