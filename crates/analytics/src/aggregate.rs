use core_types::{Allocation, ReturnSeries};
use std::collections::BTreeMap;

/// Blends per-instrument returns into one portfolio return series.
///
/// The result is as long as the shortest contributing series; a symbol with
/// no entry in `returns_by_symbol` counts as length zero. Weights are applied
/// as configured and never re-normalised, so a table summing to less than one
/// behaves as partly uninvested.
pub fn aggregate(
    returns_by_symbol: &BTreeMap<String, ReturnSeries>,
    allocations: &[Allocation],
) -> ReturnSeries {
    let length = allocations
        .iter()
        .map(|a| returns_by_symbol.get(&a.symbol).map_or(0, Vec::len))
        .min()
        .unwrap_or(0);

    let weighted: Vec<(f64, &[f64])> = allocations
        .iter()
        .map(|a| {
            let returns = returns_by_symbol
                .get(&a.symbol)
                .map_or(&[][..], Vec::as_slice);
            (a.weight(), returns)
        })
        .collect();

    (0..length)
        .map(|i| {
            weighted
                .iter()
                .map(|(weight, returns)| returns.get(i).copied().unwrap_or(0.0) * weight)
                .sum::<f64>()
        })
        .collect()
}
