use crate::calendar::months_before;
use crate::error::AnalyticsError;
use core_types::SeriesPoint;

/// Compounds `start_value` through `returns` into a monthly value series
/// whose last point is dated `now`.
///
/// Point `i` (1-based) holds `start_value * Π(1 + r_k)` for `k < i` and is
/// dated `len - i` months before `now`. The anchor at `start_value` itself is
/// not emitted, so the output has exactly `returns.len()` points.
pub fn reconstruct(
    start_value: f64,
    returns: &[f64],
    now: chrono::NaiveDate,
) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    if !start_value.is_finite() || start_value <= 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "start value must be positive, got {}",
            start_value
        )));
    }

    let n = returns.len();
    let mut value = start_value;
    let mut series = Vec::with_capacity(n);
    for (i, r) in returns.iter().enumerate() {
        value *= 1.0 + r;
        let date = months_before(now, n - 1 - i)?;
        series.push(SeriesPoint::new(date, value));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::to_returns;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
    }

    #[test]
    fn test_compounds_and_dates_up_to_now() {
        let series = reconstruct(1000.0, &[0.10, -0.10, 0.05], now()).unwrap();

        assert_eq!(series.len(), 3);
        assert_relative_eq!(series[0].value, 1100.0, epsilon = 1e-9);
        assert_relative_eq!(series[1].value, 990.0, epsilon = 1e-9);
        assert_relative_eq!(series[2].value, 1039.5, epsilon = 1e-9);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(series[2].date, now());
    }

    #[test]
    fn test_last_point_lands_on_month_end_now() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let series = reconstruct(1.0, &[0.0; 13], now).unwrap();
        assert_eq!(series.last().unwrap().date, now);
        assert_eq!(series[12 - 1].date, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2025, 3, 31).unwrap());
    }

    #[test]
    fn test_empty_returns() {
        assert!(reconstruct(1000.0, &[], now()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_positive_start() {
        assert!(reconstruct(0.0, &[0.01], now()).is_err());
        assert!(reconstruct(f64::INFINITY, &[0.01], now()).is_err());
    }

    proptest! {
        #[test]
        fn prop_reconstruct_inverts_to_returns(
            start in 1.0f64..1.0e7,
            growth in prop::collection::vec(0.5f64..1.5, 1..120),
        ) {
            let mut value = start;
            let mut values = vec![start];
            for g in &growth {
                value *= g;
                values.push(value);
            }
            let prices: Vec<SeriesPoint> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| SeriesPoint::new(months_before(now(), values.len() - 1 - i).unwrap(), v))
                .collect();

            let rebuilt = reconstruct(start, &to_returns(&prices).unwrap(), now()).unwrap();

            prop_assert_eq!(rebuilt.len(), prices.len() - 1);
            for (original, rebuilt) in prices[1..].iter().zip(&rebuilt) {
                prop_assert_eq!(original.date, rebuilt.date);
                prop_assert!((original.value - rebuilt.value).abs() <= original.value * 1e-9);
            }
        }
    }
}
