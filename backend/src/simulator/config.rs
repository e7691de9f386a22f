//! Simulator configuration
//!
//! Loaded from JSON; every field has a default so `{}` is a valid config.
//!
//! ```json
//! {
//!   "rng_seed": 12345,
//!   "income_data_path": "data/occupation_income.csv",
//!   "bootstrap_income_data": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::income::{CsvIncomeDataSource, DEFAULT_INCOME_DATA_PATH};

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// RNG seed for deterministic simulation
    pub rng_seed: u64,

    /// CSV file with external income figures (None disables loading)
    pub income_data_path: Option<PathBuf>,

    /// Write the bundled dataset when the income file is missing
    pub bootstrap_income_data: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            rng_seed: 0,
            income_data_path: Some(PathBuf::from(DEFAULT_INCOME_DATA_PATH)),
            bootstrap_income_data: true,
        }
    }
}

impl SimulatorConfig {
    pub fn with_seed(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured income source, if loading is enabled
    pub fn income_source(&self) -> Option<CsvIncomeDataSource> {
        self.income_data_path.clone().map(CsvIncomeDataSource::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = SimulatorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimulatorConfig::default());
    }

    #[test]
    fn test_null_path_disables_income_data() {
        let config =
            SimulatorConfig::from_json_str(r#"{"rng_seed": 7, "income_data_path": null}"#).unwrap();
        assert_eq!(config.rng_seed, 7);
        assert!(config.income_source().is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(SimulatorConfig::from_json_str(r#"{"rng_seed": "seven"}"#).is_err());
    }
}
