use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DataConfig, LoggingConfig, PortfolioConfig, ProjectionConfig, default_allocations,
};

/// Loads the application configuration.
///
/// The file at `path` is optional. Values from it are overridden by
/// `INCOME__`-prefixed environment variables (e.g. `INCOME__DATA__RANGE=5y`),
/// and anything left unset falls back to the shipped defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("INCOME")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_default_table_is_under_allocated() {
        let config = Config::default();
        assert_eq!(config.portfolio.allocations.len(), 9);
        assert_eq!(config.total_weight(), dec!(0.90));
        assert_eq!(config.portfolio.start_value, dec!(1000000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.data.range, "10y");
        assert_eq!(config.projection.window_months, 60);
        assert_eq!(config.portfolio.allocations.len(), 9);
    }

    #[test]
    fn test_file_overrides_allocations() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[portfolio]
start_value = 250000

[[portfolio.allocations]]
symbol = "JEPI"
display_name = "JPMorgan Equity Premium Income ETF"
weight_fraction = 0.6
proxy_symbol = "SPY"
estimated_yield_fraction = 0.07

[[portfolio.allocations]]
symbol = "BND"
display_name = "Vanguard Total Bond Market ETF"
weight_fraction = 0.4
estimated_yield_fraction = 0.035

[data]
timeout_secs = 5
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.portfolio.start_value, dec!(250000));
        assert_eq!(config.portfolio.allocations.len(), 2);
        assert_eq!(config.portfolio.allocations[0].proxy_symbol.as_deref(), Some("SPY"));
        assert_eq!(config.portfolio.allocations[1].proxy_symbol, None);
        assert_eq!(config.total_weight(), dec!(1.0));
        assert_eq!(config.data.timeout_secs, 5);
        // untouched fields keep their defaults
        assert_eq!(config.data.max_retries, 2);
    }

    #[test]
    fn test_example_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.example.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.portfolio.allocations.len(), 4);
        assert_eq!(config.total_weight(), dec!(1.00));
        assert_eq!(config.logging.directory, None);
    }

    #[test]
    fn test_validate_rejects_duplicate_symbols() {
        let mut config = Config::default();
        let first = config.portfolio.allocations[0].clone();
        config.portfolio.allocations.push(first);
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_rejects_non_positive_start_value() {
        let mut config = Config::default();
        config.portfolio.start_value = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_weight() {
        let mut config = Config::default();
        config.portfolio.allocations[3].weight_fraction = dec!(-0.1);
        assert!(config.validate().is_err());
    }
}
