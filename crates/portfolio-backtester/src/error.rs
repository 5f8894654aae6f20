use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] configuration::error::ConfigError),

    #[error("Allocation edit error: {0}")]
    Allocation(#[from] core_types::CoreError),

    #[error("Data handler error: {0}")]
    Data(String),
}
