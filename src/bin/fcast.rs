//! fcast - thin CLI driver for the monthly-total forecaster.
//!
//! Sources the history and current partial (fixed sample data by default,
//! overridable on the command line), derives the time context from today's
//! calendar, runs the estimator, and prints the outcome as JSON. All
//! statistical work happens in the library; this binary only supplies
//! inputs and presents the result.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use monthly_forecast::forecast::{ForecastConfig, ForecastOutcome, TimeContext};

/// Sample monthly totals used when no history is supplied.
const SAMPLE_HISTORY: &[f64] = &[
    5121.11, 7519.06, 7781.19, 8492.45, 8372.08, 9314.49, 11273.61, 8003.63, 8177.52, 8688.28,
    9644.96,
];

/// Sample current-month partial used when none is supplied.
const SAMPLE_CURRENT: f64 = 4199.0;

#[derive(Parser)]
#[command(version, about = "Bayesian end-of-month forecast for a monthly running total")]
struct Cli {
    /// Completed monthly totals, oldest first, comma separated.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    history: Option<Vec<f64>>,

    /// Amount accumulated so far in the current month.
    #[arg(long)]
    current: Option<f64>,

    /// Days elapsed in the current month (defaults to today's day of month).
    #[arg(long)]
    elapsed: Option<u32>,

    /// Days in the current month (defaults to this month's length).
    #[arg(long)]
    total: Option<u32>,
}

/// Number of days in the given calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last_of_this| last_of_this.day())
        .unwrap_or(30)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let history = cli.history.unwrap_or_else(|| SAMPLE_HISTORY.to_vec());
    let current = cli.current.unwrap_or(SAMPLE_CURRENT);

    let today = Local::now().date_naive();
    let elapsed = cli.elapsed.unwrap_or_else(|| today.day());
    let total = cli.total.unwrap_or_else(|| days_in_month(today.year(), today.month()));

    let outcome = ForecastOutcome::bayesian_forecast(
        &history,
        current,
        TimeContext::new(elapsed, total),
        &ForecastConfig::default(),
    )
    .context("forecast failed")?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
