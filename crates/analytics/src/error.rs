use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Cannot compute a return from non-positive price {value} on {date} (index {index})")]
    NonPositivePrice {
        index: usize,
        date: NaiveDate,
        value: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
