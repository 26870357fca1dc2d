//! Ordinary least-squares trend over yearly totals.

use crate::error::{InputError, ModelError, Result};
use crate::types::{ForecastRow, YearTotalRow};
use std::collections::{BTreeSet, HashMap};

/// Fitted line `total = slope * year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Closed-form single-variable least squares, year as predictor.
    pub fn fit(history: &[YearTotalRow]) -> std::result::Result<Self, ModelError> {
        let distinct: BTreeSet<i32> = history.iter().map(|r| r.year).collect();
        if distinct.len() < 2 {
            return Err(ModelError::InsufficientData { found: distinct.len() });
        }

        // Center on the mean year so large year values don't cost precision.
        let n = history.len() as f64;
        let mean_x = history.iter().map(|r| r.year as f64).sum::<f64>() / n;
        let mean_y = history.iter().map(|r| r.total as f64).sum::<f64>() / n;
        let (mut sxy, mut sxx) = (0.0, 0.0);
        for r in history {
            let dx = r.year as f64 - mean_x;
            sxy += dx * (r.total as f64 - mean_y);
            sxx += dx * dx;
        }
        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        log::debug!("Fitted trend: slope={slope:.4}, intercept={intercept:.4}");
        Ok(Self { slope, intercept })
    }

    /// Unclamped; may go negative far outside the fitted range.
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Allowed target years: the year after the last observation through `max_year`.
/// `None` when no year can follow `last_year`.
pub fn target_year_range(last_year: i32, max_year: i32) -> Option<(i32, i32)> {
    Some((last_year.checked_add(1)?, max_year))
}

/// Last observed year plus five, clamped to the allowed range.
pub fn default_target_year(last_year: i32, max_year: i32) -> Option<i32> {
    let (min, max) = target_year_range(last_year, max_year)?;
    Some(last_year.checked_add(5).unwrap_or(max).min(max).max(min))
}

/// Fit on `history` and predict every year from the first observed one
/// through `target_year`, pairing each with its actual total where known.
pub fn project(
    history: &[YearTotalRow],
    target_year: i32,
    max_year: i32,
) -> Result<(LinearTrend, Vec<ForecastRow>)> {
    let trend = LinearTrend::fit(history)?;

    // `fit` guarantees at least two rows.
    let first_year = history.iter().map(|r| r.year).min().unwrap_or_default();
    let last_year = history.iter().map(|r| r.year).max().unwrap_or_default();
    let (min, max) = target_year_range(last_year, max_year)
        .ok_or(InputError::NoForecastYears { last_year })?;
    if !(min..=max).contains(&target_year) {
        return Err(InputError::TargetYearOutOfRange { year: target_year, min, max }.into());
    }

    let actuals: HashMap<i32, usize> = history.iter().map(|r| (r.year, r.total)).collect();
    let rows = (first_year..=target_year)
        .map(|year| ForecastRow {
            year,
            actual: actuals.get(&year).copied(),
            predicted: trend.predict(year),
        })
        .collect();
    Ok((trend, rows))
}
