use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Periodic fractional returns, one per consecutive pair of points of the
/// series they were derived from.
pub type ReturnSeries = Vec<f64>;

/// A single dated observation in a monthly price or value series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Builds a point from provider data, rejecting values that cannot be a price.
    pub fn try_new(date: NaiveDate, value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::InvalidInput(
                format!("price on {}", date),
                value.to_string(),
            ));
        }
        Ok(Self { date, value })
    }
}

/// One row of the portfolio: an instrument, its weight and its income estimate.
///
/// Weights are fractions of the starting capital and are deliberately not
/// required to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub symbol: String,
    pub display_name: String,
    pub weight_fraction: Decimal,
    /// Longer-history instrument used to backfill before `symbol` existed.
    #[serde(default)]
    pub proxy_symbol: Option<String>,
    pub estimated_yield_fraction: Decimal,
}

impl Allocation {
    pub fn new(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        weight_fraction: Decimal,
        estimated_yield_fraction: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            weight_fraction,
            proxy_symbol: None,
            estimated_yield_fraction,
        }
    }

    pub fn with_proxy(mut self, proxy_symbol: impl Into<String>) -> Self {
        self.proxy_symbol = Some(proxy_symbol.into());
        self
    }

    /// The weight as a float for the return-blending math.
    pub fn weight(&self) -> f64 {
        self.weight_fraction.to_f64().unwrap_or(0.0)
    }
}

/// Returns a full replacement of `allocations` with `symbol`'s weight changed.
pub fn with_weight(
    allocations: &[Allocation],
    symbol: &str,
    weight_fraction: Decimal,
) -> Result<Vec<Allocation>, CoreError> {
    edit(allocations, symbol, |a| a.weight_fraction = weight_fraction)
}

/// Returns a full replacement of `allocations` with `symbol`'s yield changed.
pub fn with_yield(
    allocations: &[Allocation],
    symbol: &str,
    estimated_yield_fraction: Decimal,
) -> Result<Vec<Allocation>, CoreError> {
    edit(allocations, symbol, |a| {
        a.estimated_yield_fraction = estimated_yield_fraction
    })
}

fn edit(
    allocations: &[Allocation],
    symbol: &str,
    apply: impl FnOnce(&mut Allocation),
) -> Result<Vec<Allocation>, CoreError> {
    let mut updated = allocations.to_vec();
    let target = updated
        .iter_mut()
        .find(|a| a.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| CoreError::UnknownSymbol(symbol.to_string()))?;
    apply(target);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> Vec<Allocation> {
        vec![
            Allocation::new("SCHD", "Schwab US Dividend Equity", dec!(0.5), dec!(0.036)),
            Allocation::new("JEPI", "JPMorgan Equity Premium Income", dec!(0.5), dec!(0.075))
                .with_proxy("SPY"),
        ]
    }

    #[test]
    fn test_try_new_rejects_non_positive_and_nan() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(SeriesPoint::try_new(date, 0.0).is_err());
        assert!(SeriesPoint::try_new(date, -3.5).is_err());
        assert!(SeriesPoint::try_new(date, f64::NAN).is_err());
        assert_eq!(SeriesPoint::try_new(date, 12.5).unwrap().value, 12.5);
    }

    #[test]
    fn test_with_weight_replaces_only_the_target_row() {
        let original = table();
        let updated = with_weight(&original, "jepi", dec!(0.3)).unwrap();

        assert_eq!(updated[0], original[0]);
        assert_eq!(updated[1].weight_fraction, dec!(0.3));
        assert_eq!(updated[1].proxy_symbol.as_deref(), Some("SPY"));
        // the input list is untouched
        assert_eq!(original[1].weight_fraction, dec!(0.5));
    }

    #[test]
    fn test_with_yield_unknown_symbol() {
        let err = with_yield(&table(), "QQQ", dec!(0.01)).unwrap_err();
        assert_eq!(err, CoreError::UnknownSymbol("QQQ".to_string()));
    }

    #[test]
    fn test_allocation_deserializes_without_proxy() {
        let json = r#"{
            "symbol": "BND",
            "display_name": "Vanguard Total Bond Market",
            "weight_fraction": "0.1",
            "estimated_yield_fraction": "0.035"
        }"#;
        let allocation: Allocation = serde_json::from_str(json).unwrap();
        assert_eq!(allocation.proxy_symbol, None);
        assert_eq!(allocation.weight_fraction, dec!(0.1));
        assert!((allocation.weight() - 0.1).abs() < 1e-12);
    }
}
