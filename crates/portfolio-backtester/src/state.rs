use crate::data_handler::FetchOutcome;
use crate::error::PortfolioError;
use analytics::{
    AnalyticsEngine, PerformanceReport, ProjectionParams, aggregate, blend, project_with,
    reconstruct, to_returns,
};
use chrono::NaiveDate;
use configuration::{PortfolioConfig, ProjectionConfig};
use core_types::{ReturnSeries, SeriesPoint};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything derived from one allocation table and one set of downloads.
///
/// The state is rebuilt wholesale on every change; there is no partial
/// update path.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioState {
    pub as_of: NaiveDate,
    /// Raw download result per symbol, proxies included.
    pub raw: BTreeMap<String, FetchOutcome>,
    /// Per allocation: its own history with proxy history spliced in front.
    pub blended: BTreeMap<String, Vec<SeriesPoint>>,
    pub returns: BTreeMap<String, ReturnSeries>,
    pub portfolio_returns: ReturnSeries,
    /// The reconstructed monthly value of the portfolio, ending at `as_of`.
    pub backtest: Vec<SeriesPoint>,
    /// Trend extrapolation past `as_of`; empty when history is too short.
    pub forecast: Vec<SeriesPoint>,
    pub report: PerformanceReport,
}

/// Runs the pure part of the pipeline over already-fetched histories.
pub fn compute_state(
    portfolio: &PortfolioConfig,
    projection: &ProjectionConfig,
    raw: BTreeMap<String, FetchOutcome>,
    now: NaiveDate,
) -> Result<PortfolioState, PortfolioError> {
    let series_of = |symbol: &str| raw.get(symbol).map_or(&[][..], FetchOutcome::series);

    let mut blended = BTreeMap::new();
    let mut returns = BTreeMap::new();
    for allocation in &portfolio.allocations {
        let primary = series_of(&allocation.symbol);
        let proxy = allocation.proxy_symbol.as_deref().map_or(&[][..], series_of);

        let series = blend(primary, proxy);
        tracing::debug!(
            symbol = %allocation.symbol,
            primary = primary.len(),
            blended = series.len(),
            "Blended history."
        );

        returns.insert(allocation.symbol.clone(), to_returns(&series)?);
        blended.insert(allocation.symbol.clone(), series);
    }

    let portfolio_returns = aggregate(&returns, &portfolio.allocations);
    if portfolio_returns.is_empty() {
        tracing::warn!("No overlapping history across the allocation table; the backtest is empty.");
    }

    let start_value = portfolio.start_value.to_f64().ok_or_else(|| {
        PortfolioError::Data(format!("start value {} is not representable", portfolio.start_value))
    })?;
    let backtest = reconstruct(start_value, &portfolio_returns, now)?;

    let params = ProjectionParams {
        window_months: projection.window_months,
        horizon_months: projection.horizon_months,
    };
    let forecast = project_with(&backtest, now, params)?;

    let report = AnalyticsEngine::new(projection.window_months).calculate(
        &backtest,
        &forecast,
        portfolio.start_value,
        &portfolio.allocations,
    )?;

    tracing::info!(
        months = backtest.len(),
        forecast = forecast.len(),
        final_value = report.final_value,
        "Portfolio recomputed."
    );

    Ok(PortfolioState {
        as_of: now,
        raw,
        blended,
        returns,
        portfolio_returns,
        backtest,
        forecast,
        report,
    })
}
