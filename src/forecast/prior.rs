//! forecast::prior - recency-weighted empirical prior over the grid.
//!
//! Purpose
//! -------
//! Turn the historical totals into a probability distribution over the
//! candidate-total grid: a kernel-density-style histogram estimate of what
//! totals the process has historically produced, weighted to favor recent
//! behavior without discarding older data entirely.
//!
//! Key behaviors
//! -------------
//! - Assign each historical month a geometric recency weight: the most
//!   recent month gets weight 1, each older month decays by `alpha_decay`
//!   per step back in time.
//! - Count a historical total as supporting a grid point when it falls
//!   within half a bandwidth of it.
//! - Add a pseudocount to every grid point so no candidate total carries
//!   exactly zero prior mass, then normalize to unit mass.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned prior has the grid's length, strictly positive entries,
//!   and sums to 1 up to floating-point rounding.
//! - `alpha_decay` is expected in `(0, 1]`; `pseudocount > 0`.
//!
//! Conventions
//! -----------
//! - Historical index 0 is the oldest month; index `n - 1` the most
//!   recent, mirroring the history container.
//!
//! Downstream usage
//! ----------------
//! - The Bayesian updater multiplies this prior pointwise with the
//!   truncated-normal likelihood of the observed partial.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the weight sequence, normalization, strict
//!   positivity, and the concentration of mass near recent totals as
//!   `alpha_decay` shrinks.

use crate::forecast::config::ForecastConfig;
use crate::forecast::data::MonthlyHistory;
use crate::forecast::grid::TotalGrid;
use ndarray::Array1;

/// Geometric recency weights for a history of length `n`.
///
/// Parameters
/// ----------
/// - `n`: `usize`
///   Number of historical months.
/// - `alpha_decay`: `f64`
///   Decay factor per step back in time, expected in `(0, 1]`.
///
/// Returns
/// -------
/// `Array1<f64>`
///   Weights `w_i = alpha_decay^(n - i - 1)` for `i = 0..n`, so the most
///   recent month (index `n - 1`) has weight 1.
///
/// Panics
/// ------
/// - Never panics; `n = 0` yields an empty vector.
#[inline]
pub fn recency_weights(n: usize, alpha_decay: f64) -> Array1<f64> {
    Array1::from_iter((0..n).map(|i| alpha_decay.powi((n - i - 1) as i32)))
}

/// Build the normalized recency-weighted empirical prior over the grid.
///
/// Parameters
/// ----------
/// - `grid`: `&TotalGrid`
///   Candidate-total lattice supplying the points and the bandwidth.
/// - `history`: `&MonthlyHistory`
///   Validated historical totals, oldest first.
/// - `config`: `&ForecastConfig`
///   Supplies `alpha_decay` and `pseudocount`.
///
/// Returns
/// -------
/// `Array1<f64>`
///   One weight per grid point: the recency-weighted count of historical
///   totals within half a bandwidth, plus the pseudocount, normalized so
///   the whole vector sums to 1.
///
/// Errors
/// ------
/// - Never returns an error.
///
/// Panics
/// ------
/// - Never panics; the pseudocount keeps the normalizer strictly
///   positive.
///
/// Notes
/// -----
/// - O(grid.len() × history.len()); with the default geometry this is at
///   most ~1000 × n indicator checks.
pub fn empirical_prior(
    grid: &TotalGrid, history: &MonthlyHistory, config: &ForecastConfig,
) -> Array1<f64> {
    let weights = recency_weights(history.len(), config.alpha_decay);
    let half_band = grid.bandwidth() / 2.0;

    let mut prior = Array1::from_elem(grid.len(), 0.0);
    for (k, &candidate) in grid.totals().iter().enumerate() {
        let mut mass = config.pseudocount;
        for (i, &month_total) in history.totals().iter().enumerate() {
            if (month_total - candidate).abs() <= half_band {
                mass += weights[i];
            }
        }
        prior[k] = mass;
    }

    let normalizer = prior.sum();
    prior /= normalizer;
    prior
}
