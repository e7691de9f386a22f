//! External income data
//!
//! Loads per-career income figures (median and employment level) from a
//! small CSV file of occupations. On first use the file is created from a
//! bundled dataset if it is missing.
//!
//! Loading never fails from the simulator's point of view:
//! [`load_overrides_or_default`] logs the problem and falls back to an empty
//! override set, which leaves the built-in income ranges in charge.
//!
//! # File format
//!
//! ```text
//! occupation,median_income,employment_level
//! retail_salesperson,28500,high
//! ...
//! ```
//!
//! Columns are matched by header name and may appear in any order. Fields
//! may be wrapped in double quotes but must not contain commas.
//! `employment_level` must be `high`, `medium` or `low`; any other value
//! fails the whole load, which then falls back to the built-in estimates.

mod csv_source;

pub use csv_source::{bundled_csv, CsvIncomeDataSource, DEFAULT_INCOME_DATA_PATH};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::Career;

/// Relative size of an occupation's workforce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentLevel {
    High,
    Medium,
    Low,
}

impl EmploymentLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentLevel::High => "high",
            EmploymentLevel::Medium => "medium",
            EmploymentLevel::Low => "low",
        }
    }
}

impl fmt::Display for EmploymentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(EmploymentLevel::High),
            "medium" => Ok(EmploymentLevel::Medium),
            "low" => Ok(EmploymentLevel::Low),
            other => Err(format!("unknown employment level '{}'", other)),
        }
    }
}

/// Externally sourced income figures for one career
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeOverride {
    pub median: i64,
    pub employment: EmploymentLevel,
}

/// Errors from an income data source
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("Income data I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Income data is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Invalid income data at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Provider of per-career income overrides
pub trait IncomeDataSource {
    /// Load overrides keyed by career
    fn load_overrides(&self) -> Result<HashMap<Career, IncomeOverride>, DataSourceError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// A source with no data; the simulator uses built-in ranges only
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncomeData;

impl IncomeDataSource for NoIncomeData {
    fn load_overrides(&self) -> Result<HashMap<Career, IncomeOverride>, DataSourceError> {
        Ok(HashMap::new())
    }

    fn describe(&self) -> String {
        "built-in income estimates".to_string()
    }
}

/// Load overrides, recovering from any failure with an empty set
pub fn load_overrides_or_default(
    source: &dyn IncomeDataSource,
) -> HashMap<Career, IncomeOverride> {
    match source.load_overrides() {
        Ok(overrides) if overrides.is_empty() => {
            info!(source = %source.describe(), "Using built-in income estimates");
            overrides
        }
        Ok(overrides) => {
            info!(
                source = %source.describe(),
                careers = overrides.len(),
                "Using real-world income data"
            );
            overrides
        }
        Err(err) => {
            warn!(
                source = %source.describe(),
                error = %err,
                "Could not load income data; using built-in income estimates"
            );
            HashMap::new()
        }
    }
}

/// Occupation name in the data file for each career
pub fn occupation_for(career: Career) -> Option<&'static str> {
    let occupation = match career {
        Career::Student => return None,
        Career::Retail => "retail_salesperson",
        Career::Manufacturing => "manufacturing_worker",
        Career::Service => "food_service",
        Career::Trades => "construction_worker",
        Career::Military => "military_enlisted",
        Career::OfficeWorker => "office_clerk",
        Career::Teacher => "teacher",
        Career::Nurse => "registered_nurse",
        Career::Manager => "manager",
        Career::Engineer => "software_engineer",
        Career::Doctor => "physician",
        Career::Lawyer => "lawyer",
        Career::Professor => "professor",
        Career::Executive => "executive",
        Career::Researcher => "researcher",
    };
    Some(occupation)
}

/// Reverse of [`occupation_for`]
pub fn career_for_occupation(occupation: &str) -> Option<Career> {
    Career::WORKING
        .into_iter()
        .find(|career| occupation_for(*career) == Some(occupation))
}
