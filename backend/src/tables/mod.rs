//! Parameter tables
//!
//! Immutable demographic and economic lookup data: name pools and education
//! odds per location, career pools per education level, and income ranges
//! per career. Built once and shared (`Arc<ParameterTables>`) by every
//! simulator; nothing here is mutated after construction.
//!
//! # Income overrides
//!
//! Tables may carry per-career overrides loaded from an
//! [`IncomeDataSource`](crate::income::IncomeDataSource). They are stored and
//! queryable through [`ParameterTables::income_override`] but are NOT used by
//! the income draw, which always uses the built-in ranges.

mod weighted;

pub use weighted::{choose_cumulative, cumulative_bounds};

use std::collections::HashMap;
use thiserror::Error;

use crate::income::IncomeOverride;
use crate::models::{Career, EducationLevel, Location};

/// Errors from table lookups
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Invalid {kind}: '{value}'")]
    InvalidArgument { kind: &'static str, value: String },
}

impl TableError {
    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        TableError::InvalidArgument {
            kind,
            value: value.into(),
        }
    }
}

/// Education odds for one location
///
/// Graduate and college shares are explicit; high school is the remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EducationProbabilities {
    pub graduate: f64,
    pub college: f64,
}

impl EducationProbabilities {
    pub fn high_school(&self) -> f64 {
        1.0 - self.graduate - self.college
    }

    /// Probability of one resolved level
    pub fn probability(&self, level: EducationLevel) -> f64 {
        match level {
            EducationLevel::Graduate => self.graduate,
            EducationLevel::College => self.college,
            EducationLevel::HighSchool => self.high_school(),
            EducationLevel::None => 0.0,
        }
    }

    /// Cumulative bounds in draw priority order: graduate, college, high school
    pub fn cumulative(&self) -> Vec<(EducationLevel, f64)> {
        cumulative_bounds(&[
            (EducationLevel::Graduate, self.graduate),
            (EducationLevel::College, self.college),
            (EducationLevel::HighSchool, self.high_school()),
        ])
    }

    /// As a level → probability mapping
    pub fn as_map(&self) -> HashMap<EducationLevel, f64> {
        [
            EducationLevel::HighSchool,
            EducationLevel::College,
            EducationLevel::Graduate,
        ]
        .into_iter()
        .map(|level| (level, self.probability(level)))
        .collect()
    }
}

/// Name pools for one location
#[derive(Debug, Clone)]
struct NamePools {
    first: Vec<&'static str>,
    last: Vec<&'static str>,
}

/// Read-only simulation parameters
#[derive(Debug, Clone)]
pub struct ParameterTables {
    names: HashMap<Location, NamePools>,
    education: HashMap<Location, EducationProbabilities>,
    careers: HashMap<EducationLevel, Vec<Career>>,
    income_ranges: HashMap<Career, (i64, i64)>,
    income_overrides: HashMap<Career, IncomeOverride>,
}

impl ParameterTables {
    /// The built-in tables with no income overrides
    pub fn builtin() -> Self {
        Self {
            names: builtin_names(),
            education: builtin_education(),
            careers: builtin_careers(),
            income_ranges: builtin_income_ranges(),
            income_overrides: HashMap::new(),
        }
    }

    /// Built-in tables carrying externally loaded income overrides
    pub fn with_overrides(overrides: HashMap<Career, IncomeOverride>) -> Self {
        Self {
            income_overrides: overrides,
            ..Self::builtin()
        }
    }

    /// First and last name pools for a location (both non-empty)
    pub fn names_for(&self, location: Location) -> (&[&'static str], &[&'static str]) {
        let pools = &self.names[&location];
        (&pools.first, &pools.last)
    }

    /// Name pools for a location given by its wire name
    pub fn names_for_str(
        &self,
        location: &str,
    ) -> Result<(&[&'static str], &[&'static str]), TableError> {
        Ok(self.names_for(location.parse()?))
    }

    /// Starting health before the random offset
    pub fn baseline_health(&self, location: Location) -> i32 {
        match location {
            Location::Rural => 75,
            Location::Suburban => 80,
            Location::Urban => 70,
        }
    }

    pub fn education_probabilities(&self, location: Location) -> EducationProbabilities {
        self.education[&location]
    }

    /// Career pool for a resolved education level
    ///
    /// # Errors
    /// `InvalidArgument` for `EducationLevel::None`, which has no careers.
    pub fn careers_for(&self, level: EducationLevel) -> Result<&[Career], TableError> {
        self.careers
            .get(&level)
            .map(Vec::as_slice)
            .ok_or_else(|| TableError::invalid("education level", level.as_str()))
    }

    /// Built-in (min, max) annual income for a working career
    ///
    /// # Errors
    /// `InvalidArgument` for `Career::Student`.
    pub fn income_range(&self, career: Career) -> Result<(i64, i64), TableError> {
        self.income_ranges
            .get(&career)
            .copied()
            .ok_or_else(|| TableError::invalid("career", career.as_str()))
    }

    /// Loaded override for a career, if any. Informational only.
    pub fn income_override(&self, career: Career) -> Option<&IncomeOverride> {
        self.income_overrides.get(&career)
    }

    pub fn income_overrides(&self) -> &HashMap<Career, IncomeOverride> {
        &self.income_overrides
    }
}

impl Default for ParameterTables {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// Built-in data (loosely based on US demographic patterns)
// ============================================================================

fn builtin_names() -> HashMap<Location, NamePools> {
    let mut names = HashMap::new();
    names.insert(
        Location::Rural,
        NamePools {
            first: vec![
                "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda",
                "William", "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph",
                "Jessica", "Thomas", "Sarah", "Christopher", "Karen", "Daniel", "Nancy",
                "Matthew", "Lisa", "Anthony", "Betty", "Mark", "Helen", "Donald", "Sandra",
                "Steven", "Donna",
            ],
            last: vec![
                "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
                "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
                "Thomas", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
            ],
        },
    );
    names.insert(
        Location::Suburban,
        NamePools {
            first: vec![
                "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella",
                "William", "Mia", "James", "Charlotte", "Benjamin", "Amelia", "Lucas", "Evelyn",
                "Henry", "Abigail", "Alexander", "Harper", "Sebastian", "Emily", "Jack",
                "Elizabeth", "Owen", "Avery", "Theodore", "Sofia", "Aiden", "Ella", "Samuel",
            ],
            last: vec![
                "Anderson", "Taylor", "Thomas", "Jackson", "White", "Harris", "Martin",
                "Thompson", "Garcia", "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis",
                "Lee", "Walker", "Hall", "Allen", "Young", "Hernandez", "King", "Wright",
                "Lopez", "Hill",
            ],
        },
    );
    names.insert(
        Location::Urban,
        NamePools {
            first: vec![
                "Aiden", "Zoe", "Xavier", "Maya", "Kai", "Aria", "Diego", "Luna", "Mateo", "Zara",
                "Jamal", "Aaliyah", "Hassan", "Fatima", "Chen", "Priya", "Andre", "Jasmine",
                "Carlos", "Gabriela", "Malik", "Nia", "Oscar", "Camila", "Isaiah", "Keya",
                "Vincent", "Amara", "Dante", "Sage", "Phoenix", "River",
            ],
            last: vec![
                "Johnson", "Brown", "Davis", "Miller", "Wilson", "Garcia", "Martinez",
                "Hernandez", "Lopez", "Gonzalez", "Perez", "Sanchez", "Ramirez", "Rivera",
                "Torres", "Flores", "Washington", "Jefferson", "Adams", "Jackson", "White",
                "Harris", "Clark", "Lewis",
            ],
        },
    );
    names
}

fn builtin_education() -> HashMap<Location, EducationProbabilities> {
    HashMap::from([
        (
            Location::Rural,
            EducationProbabilities {
                graduate: 0.05,
                college: 0.20,
            },
        ),
        (
            Location::Suburban,
            EducationProbabilities {
                graduate: 0.05,
                college: 0.35,
            },
        ),
        (
            Location::Urban,
            EducationProbabilities {
                graduate: 0.10,
                college: 0.40,
            },
        ),
    ])
}

fn builtin_careers() -> HashMap<EducationLevel, Vec<Career>> {
    HashMap::from([
        (
            EducationLevel::HighSchool,
            vec![
                Career::Retail,
                Career::Manufacturing,
                Career::Service,
                Career::Trades,
                Career::Military,
            ],
        ),
        (
            EducationLevel::College,
            vec![
                Career::OfficeWorker,
                Career::Teacher,
                Career::Nurse,
                Career::Manager,
                Career::Engineer,
            ],
        ),
        (
            EducationLevel::Graduate,
            vec![
                Career::Doctor,
                Career::Lawyer,
                Career::Professor,
                Career::Executive,
                Career::Researcher,
            ],
        ),
    ])
}

fn builtin_income_ranges() -> HashMap<Career, (i64, i64)> {
    HashMap::from([
        (Career::Retail, (25_000, 35_000)),
        (Career::Manufacturing, (35_000, 55_000)),
        (Career::Service, (20_000, 30_000)),
        (Career::Trades, (40_000, 70_000)),
        (Career::Military, (35_000, 80_000)),
        (Career::OfficeWorker, (35_000, 65_000)),
        (Career::Teacher, (35_000, 55_000)),
        (Career::Nurse, (50_000, 75_000)),
        (Career::Manager, (55_000, 95_000)),
        (Career::Engineer, (65_000, 120_000)),
        (Career::Doctor, (150_000, 400_000)),
        (Career::Lawyer, (60_000, 250_000)),
        (Career::Professor, (45_000, 85_000)),
        (Career::Executive, (100_000, 500_000)),
        (Career::Researcher, (55_000, 95_000)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_working_career_has_a_range() {
        let tables = ParameterTables::builtin();
        for career in Career::WORKING {
            let (min, max) = tables.income_range(career).unwrap();
            assert!(min <= max, "{career}: {min} > {max}");
        }
    }

    #[test]
    fn test_student_has_no_income_range() {
        let tables = ParameterTables::builtin();
        assert_eq!(
            tables.income_range(Career::Student),
            Err(TableError::invalid("career", "student"))
        );
    }

    #[test]
    fn test_none_has_no_career_pool() {
        let tables = ParameterTables::builtin();
        assert!(tables.careers_for(EducationLevel::None).is_err());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let tables = ParameterTables::builtin();
        for loc in Location::ALL {
            let total: f64 = tables.education_probabilities(loc).as_map().values().sum();
            assert!((total - 1.0).abs() < 1e-9, "{loc}: {total}");
        }
    }
}
