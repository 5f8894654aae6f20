use api_client::PriceSource;
use api_client::error::ApiError;
use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use core_types::SeriesPoint;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Monthly points starting on the first of `year`-`month`.
pub fn monthly(year: i32, month: u32, values: &[f64]) -> Vec<SeriesPoint> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| SeriesPoint::new(start + Months::new(i as u32), v))
        .collect()
}

/// An in-memory price source. Unknown symbols come back empty.
#[derive(Default)]
pub struct StaticSource {
    histories: HashMap<String, Vec<SeriesPoint>>,
    failing: HashSet<String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, series: Vec<SeriesPoint>) -> Self {
        self.histories.insert(symbol.to_string(), series);
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    pub fn calls(&self, symbol: &str) -> usize {
        self.calls.lock().unwrap().get(symbol).copied().unwrap_or(0)
    }
}

#[async_trait]
impl PriceSource for StaticSource {
    async fn fetch_monthly_history(
        &self,
        symbol: &str,
        _range: &str,
    ) -> Result<Vec<SeriesPoint>, ApiError> {
        *self.calls.lock().unwrap().entry(symbol.to_string()).or_default() += 1;
        if self.failing.contains(symbol) {
            return Err(ApiError::Status {
                status: 404,
                message: format!("No data found for {}", symbol),
            });
        }
        Ok(self.histories.get(symbol).cloned().unwrap_or_default())
    }
}
