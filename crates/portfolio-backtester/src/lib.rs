//! # Portfolio Backtester
//!
//! Orchestrates a full recomputation of the income portfolio: a concurrent
//! fan-out fetch of every symbol's history, followed by the pure analytics
//! pipeline that turns those histories into a backtest and a forecast.

pub mod data_handler;
pub mod error;
pub mod manager;
pub mod state;

pub use data_handler::{FetchOutcome, distinct_symbols, fetch_all};
pub use error::PortfolioError;
pub use manager::PortfolioManager;
pub use state::{PortfolioState, compute_state};

#[cfg(test)]
mod test_support;
