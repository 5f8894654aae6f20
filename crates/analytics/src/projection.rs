//! Forward projection of a value series.
//!
//! The projection is a plain trend extrapolation: the trailing compound
//! growth rate is carried forward at a constant monthly rate. No variance
//! band or confidence interval is produced.

use crate::calendar::months_after;
use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::SeriesPoint;

/// Window and horizon of the projection, in monthly points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionParams {
    /// Trailing points the growth rate is measured over.
    pub window_months: usize,
    /// Points projected past `now`.
    pub horizon_months: usize,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            window_months: 60,
            horizon_months: 60,
        }
    }
}

/// Annualised growth over the trailing `window_months` points, treating the
/// window as `window_months / 12` years. `None` when the series is shorter
/// than the window.
pub fn trailing_cagr(
    values: &[SeriesPoint],
    window_months: usize,
) -> Result<Option<f64>, AnalyticsError> {
    if window_months == 0 || values.len() < window_months {
        return Ok(None);
    }

    let first = values[values.len() - window_months].value;
    let last = values[values.len() - 1].value;
    if !(first.is_finite() && first > 0.0 && last.is_finite() && last >= 0.0) {
        return Err(AnalyticsError::Calculation(format!(
            "cannot compute growth from {} to {}",
            first, last
        )));
    }

    let years = window_months as f64 / 12.0;
    Ok(Some((last / first).powf(1.0 / years) - 1.0))
}

/// Projects the default five years forward from a five-year trailing window.
pub fn project(values: &[SeriesPoint], now: NaiveDate) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    project_with(values, now, ProjectionParams::default())
}

/// Extends `values` by `horizon_months` points compounding at the monthly
/// equivalent of the trailing CAGR. Point `k` is dated `k` months after
/// `now`. Returns an empty series when there is not enough history.
pub fn project_with(
    values: &[SeriesPoint],
    now: NaiveDate,
    params: ProjectionParams,
) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    let (Some(cagr), Some(last)) = (trailing_cagr(values, params.window_months)?, values.last())
    else {
        return Ok(Vec::new());
    };

    let monthly_rate = (1.0 + cagr).powf(1.0 / 12.0) - 1.0;
    tracing::debug!(cagr, monthly_rate, "Projecting forward.");

    (1..=params.horizon_months)
        .map(|k| {
            let date = months_after(now, k)?;
            Ok(SeriesPoint::new(date, last.value * (1.0 + monthly_rate).powf(k as f64)))
        })
        .collect()
}
