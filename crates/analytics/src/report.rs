use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A summary of a backtest and its projection.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// presentation layer shows next to the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    // I. Growth
    pub start_value: f64,
    pub final_value: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: Option<f64>, // Option<> for a backtest under one month
    pub trailing_cagr_pct: Option<f64>,     // Option<> when the trailing window is not covered

    // II. Risk and Drawdown
    pub max_drawdown: f64,
    pub max_drawdown_pct: f64,

    // III. Coverage
    pub months: usize,
    pub projected_end_value: Option<f64>,

    // IV. Income
    pub estimated_annual_income: Decimal,
    pub total_weight: Decimal,
}

impl PerformanceReport {
    /// Creates a report for an empty backtest: nothing grew, nothing was lost.
    pub fn new(start_value: f64) -> Self {
        Self {
            start_value,
            final_value: start_value,
            total_return_pct: 0.0,
            annualized_return_pct: None,
            trailing_cagr_pct: None,
            max_drawdown: 0.0,
            max_drawdown_pct: 0.0,
            months: 0,
            projected_end_value: None,
            estimated_annual_income: Decimal::ZERO,
            total_weight: Decimal::ZERO,
        }
    }
}
