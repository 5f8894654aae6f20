use crate::error::AnalyticsError;
use crate::income::estimated_annual_income;
use crate::projection::trailing_cagr;
use crate::report::PerformanceReport;
use core_types::{Allocation, SeriesPoint};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// A stateless calculator for deriving summary metrics from a backtest.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    window_months: usize,
}

impl AnalyticsEngine {
    /// `window_months` is the trailing window the CAGR is measured over.
    pub fn new(window_months: usize) -> Self {
        Self { window_months }
    }

    /// The main entry point for calculating the summary.
    ///
    /// # Arguments
    ///
    /// * `backtest` - The reconstructed monthly value series.
    /// * `forecast` - The projected series; may be empty.
    /// * `start_value` - The capital the backtest compounded from.
    /// * `allocations` - The table the backtest was run with.
    pub fn calculate(
        &self,
        backtest: &[SeriesPoint],
        forecast: &[SeriesPoint],
        start_value: Decimal,
        allocations: &[Allocation],
    ) -> Result<PerformanceReport, AnalyticsError> {
        let start = start_value.to_f64().ok_or_else(|| {
            AnalyticsError::InvalidInput(format!("start value {} is not representable", start_value))
        })?;

        let mut report = PerformanceReport::new(start);
        report.estimated_annual_income = estimated_annual_income(allocations, start_value);
        report.total_weight = allocations.iter().map(|a| a.weight_fraction).sum();
        report.projected_end_value = forecast.last().map(|p| p.value);

        if backtest.is_empty() {
            return Ok(report);
        }

        self.calculate_growth(backtest, &mut report)?;
        self.calculate_drawdown(backtest, &mut report);

        Ok(report)
    }

    /// Calculates total, annualised and trailing growth.
    fn calculate_growth(
        &self,
        backtest: &[SeriesPoint],
        report: &mut PerformanceReport,
    ) -> Result<(), AnalyticsError> {
        report.months = backtest.len();
        report.final_value = backtest[backtest.len() - 1].value;

        if report.start_value > 0.0 {
            let growth = report.final_value / report.start_value;
            report.total_return_pct = (growth - 1.0) * 100.0;

            let years = report.months as f64 / 12.0;
            if growth >= 0.0 {
                report.annualized_return_pct = Some((growth.powf(1.0 / years) - 1.0) * 100.0);
            }
        }

        report.trailing_cagr_pct = trailing_cagr(backtest, self.window_months)?.map(|c| c * 100.0);
        Ok(())
    }

    /// Calculates maximum drawdown, measured from the running peak. The
    /// starting capital counts as the first peak.
    fn calculate_drawdown(&self, backtest: &[SeriesPoint], report: &mut PerformanceReport) {
        let mut peak = report.start_value;

        for point in backtest {
            if point.value > peak {
                peak = point.value;
            }
            let drawdown = peak - point.value;
            if drawdown > report.max_drawdown {
                report.max_drawdown = drawdown;
                if peak > 0.0 {
                    report.max_drawdown_pct = drawdown / peak * 100.0;
                }
            }
        }
    }
}
