pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::FetchStatus;
pub use error::CoreError;
pub use structs::{with_weight, with_yield, Allocation, ReturnSeries, SeriesPoint};
