//! Human-readable life reports
//!
//! [`format_summary`] renders a finished life as the text report shown to
//! users and written to session files. [`parse_summary`] reads one back,
//! recovering the headline fields and the event lines.

mod session;

pub use session::{session_separator, Session, SessionError, SEPARATOR_WIDTH};

use std::fmt::Write as _;
use thiserror::Error;

use crate::models::{Career, EducationLevel, Location, Person};
use crate::tables::TableError;

const TITLE: &str = "=== LIFE SIMULATION COMPLETE ===";
const EVENTS_HEADER: &str = "=== MAJOR LIFE EVENTS ===";
const BULLET: &str = "  • ";

/// Render a person's life as a report
///
/// # Example
/// ```
/// use life_simulator_core_rs::models::{Location, Person};
/// use life_simulator_core_rs::report::format_summary;
///
/// let person = Person::new("Maya Rivera".to_string(), Location::Urban, 68);
/// let text = format_summary(&person);
/// assert!(text.contains("Name: Maya Rivera"));
/// assert!(text.contains("  • Born in urban area with health 68"));
/// ```
pub fn format_summary(person: &Person) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write!(
        out,
        "\n{TITLE}\n\
         Name: {}\n\
         Died at age: {}\n\
         Final education: {}\n\
         Final career: {}\n\
         Final income: ${}\n\
         Final health: {}\n\
         Location type: {}\n\
         \n\
         {EVENTS_HEADER}\n",
        person.name(),
        person.age(),
        person.education_level(),
        person.career(),
        format_thousands(person.income()),
        person.health(),
        person.location(),
    );
    for event in person.life_events() {
        let _ = writeln!(out, "{BULLET}{}", event);
    }
    out
}

/// Format an integer with comma thousands separators
///
/// # Example
/// ```
/// use life_simulator_core_rs::report::format_thousands;
///
/// assert_eq!(format_thousands(0), "0");
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// assert_eq!(format_thousands(-45_000), "-45,000");
/// ```
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Errors reading a report back
#[derive(Debug, Error, PartialEq)]
pub enum SummaryParseError {
    #[error("Summary is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    InvalidValue(#[from] TableError),
}

/// Fields recovered from a report
#[derive(Debug, Clone, PartialEq)]
pub struct LifeSummary {
    pub name: String,
    pub age: u32,
    pub education_level: EducationLevel,
    pub career: Career,
    pub income: i64,
    pub health: i32,
    pub location: Location,
    pub events: Vec<String>,
}

impl LifeSummary {
    /// Whether this summary describes the given person
    pub fn matches(&self, person: &Person) -> bool {
        self.name == person.name()
            && self.age == person.age()
            && self.education_level == person.education_level()
            && self.career == person.career()
            && self.income == person.income()
            && self.health == person.health()
            && self.location == person.location()
            && self.events == person.life_events().lines()
    }
}

/// Parse a report produced by [`format_summary`]
pub fn parse_summary(text: &str) -> Result<LifeSummary, SummaryParseError> {
    let field = |label: &'static str| -> Result<&str, SummaryParseError> {
        let prefix = format!("{}: ", label);
        text.lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .map(str::trim_end)
            .ok_or(SummaryParseError::MissingField(label))
    };
    let number = |label: &'static str, raw: &str| -> Result<i64, SummaryParseError> {
        raw.trim_start_matches('$')
            .replace(',', "")
            .parse::<i64>()
            .map_err(|_| SummaryParseError::InvalidNumber {
                field: label,
                value: raw.to_string(),
            })
    };

    let age = number("Died at age", field("Died at age")?)?;
    let health = number("Final health", field("Final health")?)?;

    let events = text
        .lines()
        .skip_while(|line| *line != EVENTS_HEADER)
        .skip(1)
        .filter_map(|line| line.strip_prefix(BULLET))
        .map(str::to_string)
        .collect();

    Ok(LifeSummary {
        name: field("Name")?.to_string(),
        age: u32::try_from(age).map_err(|_| SummaryParseError::InvalidNumber {
            field: "Died at age",
            value: age.to_string(),
        })?,
        education_level: field("Final education")?.parse()?,
        career: field("Final career")?.parse()?,
        income: number("Final income", field("Final income")?)?,
        health: i32::try_from(health).map_err(|_| SummaryParseError::InvalidNumber {
            field: "Final health",
            value: health.to_string(),
        })?,
        location: field("Location type")?.parse()?,
        events,
    })
}
