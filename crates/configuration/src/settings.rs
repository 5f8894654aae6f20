use core_types::Allocation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashSet;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its default, so an absent `config.toml`
/// yields the shipped portfolio.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub portfolio: PortfolioConfig,
    pub data: DataConfig,
    pub projection: ProjectionConfig,
    pub logging: LoggingConfig,
}

/// The portfolio being backtested.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// The starting capital the backtest compounds from.
    pub start_value: Decimal,
    pub allocations: Vec<Allocation>,
}

/// Contains parameters for the price history download.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Lookback passed to the provider (e.g., "10y").
    pub range: String,
    pub base_url: String,
    /// Per-request network timeout. A timeout counts as a failed fetch.
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Backoff before retry `n` is `retry_backoff_ms * n`.
    pub retry_backoff_ms: u64,
}

/// Contains parameters for the forward projection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Trailing months used to estimate the growth rate.
    pub window_months: usize,
    /// Months projected past the last backtest point.
    pub horizon_months: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            start_value: dec!(1_000_000),
            allocations: default_allocations(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            range: "10y".to_string(),
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 15,
            max_retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            window_months: 60,
            horizon_months: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

/// The shipped income portfolio. Weights sum to 90%, leaving a cash sleeve
/// the user is expected to assign.
pub fn default_allocations() -> Vec<Allocation> {
    vec![
        Allocation::new("SCHD", "Schwab US Dividend Equity ETF", dec!(0.15), dec!(0.036)),
        Allocation::new("JEPI", "JPMorgan Equity Premium Income ETF", dec!(0.15), dec!(0.075))
            .with_proxy("SPY"),
        Allocation::new("JEPQ", "JPMorgan Nasdaq Equity Premium Income ETF", dec!(0.10), dec!(0.095))
            .with_proxy("QQQ"),
        Allocation::new("VNQ", "Vanguard Real Estate ETF", dec!(0.10), dec!(0.040)),
        Allocation::new("PFF", "iShares Preferred & Income Securities ETF", dec!(0.10), dec!(0.060)),
        Allocation::new("HYG", "iShares iBoxx High Yield Corporate Bond ETF", dec!(0.10), dec!(0.058)),
        Allocation::new("BND", "Vanguard Total Bond Market ETF", dec!(0.10), dec!(0.035)),
        Allocation::new("DIVO", "Amplify CWP Enhanced Dividend Income ETF", dec!(0.05), dec!(0.047))
            .with_proxy("DVY"),
        Allocation::new("BIZD", "VanEck BDC Income ETF", dec!(0.05), dec!(0.105)),
    ]
}

impl Config {
    /// Rejects values the pipeline cannot work with. Weights are only checked
    /// for sign; their total is a diagnostic, not a constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.portfolio.start_value <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "portfolio.start_value must be positive, got {}",
                self.portfolio.start_value
            )));
        }

        let mut seen = HashSet::new();
        for allocation in &self.portfolio.allocations {
            if !seen.insert(allocation.symbol.to_ascii_uppercase()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate symbol '{}' in portfolio.allocations",
                    allocation.symbol
                )));
            }
            if allocation.weight_fraction.is_sign_negative() {
                return Err(ConfigError::ValidationError(format!(
                    "weight for '{}' is negative",
                    allocation.symbol
                )));
            }
            if allocation.estimated_yield_fraction.is_sign_negative() {
                return Err(ConfigError::ValidationError(format!(
                    "yield for '{}' is negative",
                    allocation.symbol
                )));
            }
        }

        if self.projection.window_months == 0 || self.projection.horizon_months == 0 {
            return Err(ConfigError::ValidationError(
                "projection window and horizon must be at least one month".to_string(),
            ));
        }

        Ok(())
    }

    /// Sum of all configured weights, shown to the user as a diagnostic.
    pub fn total_weight(&self) -> Decimal {
        self.portfolio
            .allocations
            .iter()
            .map(|a| a.weight_fraction)
            .sum()
    }
}
