//! # Income Backtest Analytics
//!
//! The time-series pipeline behind the portfolio backtest: splicing proxy
//! history, converting prices to returns, blending returns by weight,
//! compounding them back into values, and projecting the trend forward.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** nothing here performs I/O or reads the clock. "Now" is
//!   always a parameter, which keeps every stage deterministic and testable.
//! - **Prices are positive:** any stage that divides by a price or value
//!   rejects non-positive input instead of producing infinities.
//!
//! ## Public API
//!
//! - `blend`, `to_returns`, `aggregate`, `reconstruct`, `project`: the stages.
//! - `estimated_annual_income`: the income figure shown next to the table.
//! - `AnalyticsEngine` / `PerformanceReport`: the summary of a run.

// Declare the modules that constitute this crate.
pub mod aggregate;
pub mod blend;
pub mod calendar;
pub mod engine;
pub mod error;
pub mod income;
pub mod projection;
pub mod reconstruct;
pub mod report;
pub mod returns;

// Re-export the key components to create a clean, public-facing API.
pub use aggregate::aggregate;
pub use blend::blend;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use income::estimated_annual_income;
pub use projection::{ProjectionParams, project, project_with, trailing_cagr};
pub use reconstruct::reconstruct;
pub use report::PerformanceReport;
pub use returns::to_returns;
