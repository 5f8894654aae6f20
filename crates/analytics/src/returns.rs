use crate::error::AnalyticsError;
use core_types::{ReturnSeries, SeriesPoint};

/// Converts a price series into periodic fractional returns,
/// `series[i] / series[i - 1] - 1`, one per consecutive pair.
///
/// Prices are assumed strictly positive. A zero, negative or non-finite
/// price anywhere in the series is rejected rather than producing
/// infinities or returns below -100%.
pub fn to_returns(series: &[SeriesPoint]) -> Result<ReturnSeries, AnalyticsError> {
    if let Some((index, bad)) = series
        .iter()
        .enumerate()
        .find(|(_, p)| !p.value.is_finite() || p.value <= 0.0)
    {
        return Err(AnalyticsError::NonPositivePrice {
            index,
            date: bad.date,
            value: bad.value,
        });
    }

    Ok(series
        .windows(2)
        .map(|w| w[1].value / w[0].value - 1.0)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn points(values: &[f64]) -> Vec<SeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let date = start.checked_add_months(chrono::Months::new(i as u32)).unwrap();
                SeriesPoint::new(date, v)
            })
            .collect()
    }

    #[test]
    fn test_returns_one_per_pair() {
        let returns = to_returns(&points(&[100.0, 110.0, 99.0, 99.0])).unwrap();
        assert_eq!(returns.len(), 3);
        assert_relative_eq!(returns[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(returns[1], -0.10, epsilon = 1e-12);
        assert_relative_eq!(returns[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_short_series_have_no_returns() {
        assert!(to_returns(&[]).unwrap().is_empty());
        assert!(to_returns(&points(&[42.0])).unwrap().is_empty());
    }

    #[test]
    fn test_zero_price_fails_fast() {
        let err = to_returns(&points(&[10.0, 0.0, 12.0])).unwrap_err();
        match err {
            AnalyticsError::NonPositivePrice { index, value, .. } => {
                assert_eq!(index, 1);
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_negative_price_fails_fast() {
        assert!(matches!(
            to_returns(&points(&[-5.0, 10.0])),
            Err(AnalyticsError::NonPositivePrice { index: 0, .. })
        ));
    }
}
