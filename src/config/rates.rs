//! Disbursement rate table loading from config.toml.
//!
//! The per-vehicle amounts and per-area rates the calculators use are
//! configuration, not code. They are read once at startup and passed into
//! the disbursement engine by value.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Rate table used by the disbursement calculators
    pub rates: FeeRates,
}

/// Amounts and rates used to compute per-household charges.
///
/// All values are whole currency units.
#[derive(Debug, Deserialize, Clone)]
pub struct FeeRates {
    /// Monthly charge per motorcycle
    pub motorcycle_fee: i64,
    /// Monthly charge per car
    pub car_fee: i64,
    /// Management charge per square meter of floor area
    pub management_rate_per_sqm: i64,
    /// Service charge per square meter of floor area
    pub service_rate_per_sqm: i64,
}

impl Default for FeeRates {
    fn default() -> Self {
        Self {
            motorcycle_fee: 70_000,
            car_fee: 1_200_000,
            management_rate_per_sqm: 7_000,
            service_rate_per_sqm: 10_000,
        }
    }
}

/// Loads the rate table from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_rates<P: AsRef<Path>>(path: P) -> Result<FeeRates> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read rates config: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse rates config: {e}"),
    })?;

    Ok(config.rates)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_rates_config() {
        let toml_str = r#"
            [rates]
            motorcycle_fee = 70000
            car_fee = 1200000
            management_rate_per_sqm = 7000
            service_rate_per_sqm = 10000
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rates.motorcycle_fee, 70_000);
        assert_eq!(config.rates.car_fee, 1_200_000);
        assert_eq!(config.rates.management_rate_per_sqm, 7_000);
        assert_eq!(config.rates.service_rate_per_sqm, 10_000);
    }

    #[test]
    fn test_parse_rates_config_missing_field() {
        let toml_str = r#"
            [rates]
            motorcycle_fee = 70000
        "#;

        let config: std::result::Result<Config, _> = toml::from_str(toml_str);
        assert!(config.is_err());
    }

    #[test]
    fn test_default_rates_match_config_file() {
        let rates = FeeRates::default();
        assert_eq!(rates.motorcycle_fee, 70_000);
        assert_eq!(rates.car_fee, 1_200_000);
    }
}
