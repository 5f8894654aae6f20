use core_types::Allocation;
use rust_decimal::Decimal;

/// Estimated yearly income: `Σ(weight × yield) × start_value`.
pub fn estimated_annual_income(allocations: &[Allocation], start_value: Decimal) -> Decimal {
    let blended_yield: Decimal = allocations
        .iter()
        .map(|a| a.weight_fraction * a.estimated_yield_fraction)
        .sum();
    blended_yield * start_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_is_weighted_yield_on_capital() {
        let allocations = vec![
            Allocation::new("A", "A", dec!(0.5), dec!(0.04)),
            Allocation::new("B", "B", dec!(0.5), dec!(0.08)),
        ];
        assert_eq!(estimated_annual_income(&allocations, dec!(1_000_000)), dec!(60_000));
    }

    #[test]
    fn test_income_of_empty_table_is_zero() {
        assert_eq!(estimated_annual_income(&[], dec!(1_000_000)), Decimal::ZERO);
    }
}
