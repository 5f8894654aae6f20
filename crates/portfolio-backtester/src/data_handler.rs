use api_client::PriceSource;
use core_types::{Allocation, FetchStatus, SeriesPoint};
use futures::future::join_all;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The result of downloading one symbol's history.
///
/// A failure is kept alongside its reason instead of aborting the batch; the
/// pipeline then treats that symbol as having no history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    Fetched { series: Vec<SeriesPoint> },
    Failed { reason: String },
}

impl FetchOutcome {
    /// The downloaded series, or an empty one when the fetch failed.
    pub fn series(&self) -> &[SeriesPoint] {
        match self {
            FetchOutcome::Fetched { series } => series,
            FetchOutcome::Failed { .. } => &[],
        }
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            FetchOutcome::Fetched { .. } => FetchStatus::Fetched,
            FetchOutcome::Failed { .. } => FetchStatus::Failed,
        }
    }
}

/// Every symbol the allocation table needs, primaries and proxies, once each.
pub fn distinct_symbols(allocations: &[Allocation]) -> BTreeSet<String> {
    allocations
        .iter()
        .flat_map(|a| std::iter::once(&a.symbol).chain(a.proxy_symbol.as_ref()))
        .cloned()
        .collect()
}

/// Concurrently fetches the monthly history of every symbol in `allocations`
/// and waits for all of them to settle.
pub async fn fetch_all(
    source: &dyn PriceSource,
    allocations: &[Allocation],
    range: &str,
) -> BTreeMap<String, FetchOutcome> {
    let symbols = distinct_symbols(allocations);
    tracing::info!(count = symbols.len(), range, "Fetching price history.");

    let fetch_futures = symbols.iter().map(|symbol| async move {
        let outcome = match source.fetch_monthly_history(symbol, range).await {
            Ok(series) => FetchOutcome::Fetched { series },
            Err(e) => {
                tracing::warn!(symbol = %symbol, error = %e, "Fetch failed; continuing without this symbol.");
                FetchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        (symbol.clone(), outcome)
    });

    join_all(fetch_futures).await.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticSource, monthly};
    use rust_decimal_macros::dec;

    fn table() -> Vec<Allocation> {
        vec![
            Allocation::new("JEPI", "JEPI", dec!(0.3), dec!(0.07)).with_proxy("SPY"),
            Allocation::new("JEPQ", "JEPQ", dec!(0.3), dec!(0.09)).with_proxy("QQQ"),
            Allocation::new("SPY", "SPY", dec!(0.3), dec!(0.013)),
        ]
    }

    #[test]
    fn test_distinct_symbols_includes_proxies_once() {
        let symbols: Vec<String> = distinct_symbols(&table()).into_iter().collect();
        assert_eq!(symbols, vec!["JEPI", "JEPQ", "QQQ", "SPY"]);
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let source = StaticSource::new()
            .with("JEPI", monthly(2020, 6, &[50.0, 51.0]))
            .with("SPY", monthly(2015, 1, &[200.0, 201.0, 202.0]))
            .with("QQQ", monthly(2015, 1, &[100.0]))
            .failing("JEPQ");

        let outcomes = fetch_all(&source, &table(), "10y").await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes["JEPI"].series().len(), 2);
        assert_eq!(outcomes["SPY"].status(), FetchStatus::Fetched);
        assert_eq!(outcomes["JEPQ"].status(), FetchStatus::Failed);
        assert!(outcomes["JEPQ"].series().is_empty());
        match &outcomes["JEPQ"] {
            FetchOutcome::Failed { reason } => assert!(reason.contains("404")),
            other => panic!("expected failure, got {:?}", other),
        }
        // the shared SPY history is requested once
        assert_eq!(source.calls("SPY"), 1);
    }
}
