use crate::error::ApiError;
use async_trait::async_trait;
use configuration::DataConfig;
use core_types::SeriesPoint;
use std::time::Duration;

pub mod error;
pub mod responses;
// --- Public API ---
pub use responses::{ChartErrorResponse, ChartResponse, parse_chart};

/// The sampling interval requested from the provider. The whole pipeline
/// works on monthly bars.
pub const MONTHLY_INTERVAL: &str = "1mo";

/// The generic, abstract interface for a historical price provider.
/// The portfolio pipeline only sees this trait, so the live client can be
/// swapped for an in-memory source in tests.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches the adjusted monthly close history of `symbol` over `range`
    /// (e.g. "10y"), ascending by date.
    async fn fetch_monthly_history(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<Vec<SeriesPoint>, ApiError>;
}

/// A concrete implementation of `PriceSource` for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl YahooClient {
    pub fn new(data_config: &DataConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(data_config.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; income-backtest)")
            .build()?;

        Ok(Self {
            client,
            base_url: data_config.base_url.trim_end_matches('/').to_string(),
            max_retries: data_config.max_retries,
            retry_backoff: Duration::from_millis(data_config.retry_backoff_ms),
        })
    }

    async fn _get_chart(&self, symbol: &str, range: &str) -> Result<Vec<SeriesPoint>, ApiError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", MONTHLY_INTERVAL)])
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            parse_chart(&text)
        } else {
            // Error bodies usually carry the same envelope; fall back to the raw text.
            let message = match parse_chart(&text) {
                Err(ApiError::Provider { description, .. }) => description,
                _ => text,
            };
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch_monthly_history(
        &self,
        symbol: &str,
        range: &str,
    ) -> Result<Vec<SeriesPoint>, ApiError> {
        let mut attempt = 0;
        loop {
            match self._get_chart(symbol, range).await {
                Ok(series) => {
                    tracing::debug!(symbol, points = series.len(), "Fetched monthly history.");
                    return Ok(series);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(symbol, attempt, error = %e, "Fetch failed, retrying.");
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
