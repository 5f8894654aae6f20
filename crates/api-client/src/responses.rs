use crate::error::ApiError;
use chrono::{DateTime, Datelike, NaiveDate};
use core_types::SeriesPoint;
use serde::Deserialize;

/// The envelope returned by `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartErrorResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub meta: Option<ChartMeta>,
    /// Epoch seconds, one per bar. Absent when the range holds no data.
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    /// Seconds east of UTC for the listing exchange. Bars are stamped at the
    /// exchange's local midnight.
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

/// Represents an error object embedded in a chart response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartErrorResponse {
    pub code: String,
    pub description: String,
}

/// Parses a chart payload into an ascending monthly series.
///
/// Adjusted closes are used when the block is present; null prices are
/// dropped without interpolation. A price array whose length differs from the
/// timestamp array is rejected. Each point is dated, in exchange-local time,
/// to the first day of its month and a month observed twice (the provider appends an intra-month
/// quote for the current month) keeps its latest price.
pub fn parse_chart(body: &str) -> Result<Vec<SeriesPoint>, ApiError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(ApiError::Provider {
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ApiError::InvalidData("chart response has no result".to_string()))?;

    let Some(timestamps) = result.timestamp else {
        return Ok(Vec::new());
    };

    let prices = match result.indicators.adjclose.and_then(|a| a.into_iter().next()) {
        Some(adjusted) => adjusted.adjclose,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| ApiError::InvalidData("chart response has no prices".to_string()))?,
    };

    if prices.len() != timestamps.len() {
        return Err(ApiError::InvalidData(format!(
            "{} timestamps but {} prices",
            timestamps.len(),
            prices.len()
        )));
    }

    let gmtoffset = result.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let mut observations = Vec::with_capacity(timestamps.len());
    for (&timestamp, price) in timestamps.iter().zip(prices.iter()) {
        let Some(price) = *price else { continue };
        let date = DateTime::from_timestamp(timestamp + gmtoffset, 0)
            .ok_or_else(|| ApiError::InvalidData(format!("Invalid timestamp: {}", timestamp)))?
            .date_naive();
        observations.push((timestamp, month_start(date)?, price));
    }
    observations.sort_by_key(|&(timestamp, _, _)| timestamp);

    let mut series: Vec<SeriesPoint> = Vec::with_capacity(observations.len());
    for (_, date, price) in observations {
        let point =
            SeriesPoint::try_new(date, price).map_err(|e| ApiError::InvalidData(e.to_string()))?;
        match series.last_mut() {
            Some(last) if last.date == date => *last = point,
            _ => series.push(point),
        }
    }

    Ok(series)
}

fn month_start(date: NaiveDate) -> Result<NaiveDate, ApiError> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .ok_or_else(|| ApiError::InvalidData(format!("Invalid date: {}", date)))
}
