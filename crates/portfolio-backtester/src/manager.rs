use crate::data_handler::fetch_all;
use crate::error::PortfolioError;
use crate::state::{PortfolioState, compute_state};
use analytics::estimated_annual_income;
use api_client::PriceSource;
use chrono::NaiveDate;
use configuration::Config;
use core_types::{Allocation, SeriesPoint};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Owns the current configuration and the state derived from it.
///
/// The configuration is only ever replaced as a whole; every replacement
/// triggers a full recomputation. A failed recomputation leaves the previous
/// state in place.
pub struct PortfolioManager {
    config: Config,
    source: Arc<dyn PriceSource>,
    state: Option<PortfolioState>,
}

impl PortfolioManager {
    pub fn new(config: Config, source: Arc<dyn PriceSource>) -> Self {
        Self {
            config,
            source,
            state: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.config.portfolio.allocations
    }

    /// The most recent successfully computed state, if any.
    pub fn state(&self) -> Option<&PortfolioState> {
        self.state.as_ref()
    }

    /// The reconstructed backtest; empty before the first recompute.
    pub fn backtest(&self) -> &[SeriesPoint] {
        self.state.as_ref().map_or(&[][..], |s| s.backtest.as_slice())
    }

    /// The projected series; empty when no projection is available.
    pub fn forecast(&self) -> &[SeriesPoint] {
        self.state.as_ref().map_or(&[][..], |s| s.forecast.as_slice())
    }

    /// `Σ(weight × yield) × start_value` for the current table. Needs no
    /// price data.
    pub fn estimated_annual_income(&self) -> Decimal {
        estimated_annual_income(
            &self.config.portfolio.allocations,
            self.config.portfolio.start_value,
        )
    }

    /// Replaces the whole allocation table and recomputes.
    ///
    /// The new table is validated and the state is rebuilt against it before
    /// anything is committed. On any failure both the configuration and the
    /// state stay as they were.
    pub async fn replace_allocations(
        &mut self,
        allocations: Vec<Allocation>,
        now: NaiveDate,
    ) -> Result<&PortfolioState, PortfolioError> {
        let mut config = self.config.clone();
        config.portfolio.allocations = allocations;
        config.validate()?;

        let state = self.build_state(&config, now).await?;
        self.config = config;
        Ok(&*self.state.insert(state))
    }

    /// Fetches every symbol and rebuilds the derived state from scratch.
    pub async fn recompute(&mut self, now: NaiveDate) -> Result<&PortfolioState, PortfolioError> {
        let state = self.build_state(&self.config, now).await?;
        Ok(&*self.state.insert(state))
    }

    async fn build_state(
        &self,
        config: &Config,
        now: NaiveDate,
    ) -> Result<PortfolioState, PortfolioError> {
        let raw = fetch_all(
            self.source.as_ref(),
            &config.portfolio.allocations,
            &config.data.range,
        )
        .await;

        compute_state(&config.portfolio, &config.projection, raw, now)
            .inspect_err(|e| tracing::error!(error = %e, "Portfolio recomputation failed."))
    }
}
