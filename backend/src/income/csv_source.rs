//! CSV-backed income data source

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{career_for_occupation, DataSourceError, IncomeDataSource, IncomeOverride};
use crate::models::Career;

/// Where the data file lives unless configured otherwise
pub const DEFAULT_INCOME_DATA_PATH: &str = "data/occupation_income.csv";

const OCCUPATION: &str = "occupation";
const MEDIAN_INCOME: &str = "median_income";
const EMPLOYMENT_LEVEL: &str = "employment_level";

/// Simplified BLS-style occupation dataset written on first run
const BUNDLED_DATASET: &[(&str, i64, &str)] = &[
    ("retail_salesperson", 28_500, "high"),
    ("manufacturing_worker", 42_000, "medium"),
    ("food_service", 24_000, "high"),
    ("construction_worker", 48_000, "medium"),
    ("military_enlisted", 45_000, "medium"),
    ("office_clerk", 38_000, "high"),
    ("teacher", 47_000, "high"),
    ("registered_nurse", 65_000, "high"),
    ("manager", 75_000, "medium"),
    ("software_engineer", 95_000, "high"),
    ("physician", 220_000, "low"),
    ("lawyer", 125_000, "low"),
    ("professor", 58_000, "low"),
    ("executive", 180_000, "low"),
    ("researcher", 72_000, "low"),
];

/// Income data read from an `occupation,median_income,employment_level` file
#[derive(Debug, Clone)]
pub struct CsvIncomeDataSource {
    path: PathBuf,
}

impl CsvIncomeDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the bundled dataset if the file does not exist yet
    ///
    /// Returns `Ok(true)` when the file was created.
    pub fn ensure_exists(&self) -> Result<bool, DataSourceError> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bundled_csv())?;
        info!(path = %self.path.display(), rows = BUNDLED_DATASET.len(), "Created income data file");
        Ok(true)
    }

    /// Parse CSV text into overrides. Unknown occupations are skipped.
    pub fn parse(text: &str) -> Result<HashMap<Career, IncomeOverride>, DataSourceError> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let header: Vec<&str> = match lines.next() {
            Some((_, line)) => split_row(line),
            None => return Err(DataSourceError::MissingColumn(OCCUPATION)),
        };
        let column = |name: &'static str| {
            header
                .iter()
                .position(|h| *h == name)
                .ok_or(DataSourceError::MissingColumn(name))
        };
        let occupation_col = column(OCCUPATION)?;
        let median_col = column(MEDIAN_INCOME)?;
        let employment_col = column(EMPLOYMENT_LEVEL)?;

        let mut overrides = HashMap::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            let fields = split_row(line);
            let field = |col: usize| {
                fields.get(col).copied().ok_or_else(|| DataSourceError::InvalidRow {
                    line: line_no,
                    reason: format!("expected {} fields, found {}", header.len(), fields.len()),
                })
            };

            let Some(career) = career_for_occupation(field(occupation_col)?) else {
                continue;
            };
            let median = field(median_col)?
                .parse::<i64>()
                .map_err(|e| DataSourceError::InvalidRow {
                    line: line_no,
                    reason: format!("median_income: {}", e),
                })?;
            let employment = field(employment_col)?
                .parse()
                .map_err(|reason| DataSourceError::InvalidRow {
                    line: line_no,
                    reason,
                })?;

            overrides.insert(career, IncomeOverride { median, employment });
        }

        Ok(overrides)
    }
}

impl Default for CsvIncomeDataSource {
    fn default() -> Self {
        Self::new(DEFAULT_INCOME_DATA_PATH)
    }
}

impl IncomeDataSource for CsvIncomeDataSource {
    fn load_overrides(&self) -> Result<HashMap<Career, IncomeOverride>, DataSourceError> {
        let text = fs::read_to_string(&self.path)?;
        Self::parse(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Split a row on commas, trimming whitespace and one pair of surrounding
/// double quotes from each field. Commas inside quotes are not supported.
fn split_row(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| {
            let field = field.trim();
            field
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(field)
        })
        .collect()
}

/// The bundled dataset as CSV text
pub fn bundled_csv() -> String {
    let mut out = format!("{},{},{}\n", OCCUPATION, MEDIAN_INCOME, EMPLOYMENT_LEVEL);
    for (occupation, median, employment) in BUNDLED_DATASET {
        out.push_str(&format!("{},{},{}\n", occupation, median, employment));
    }
    out
}
