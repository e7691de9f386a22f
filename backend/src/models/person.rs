//! Person model
//!
//! The single mutable record a simulation owns. A person is born at 18,
//! mutated in place once per simulated year, and finalized by a terminal
//! death event.
//!
//! Fields are private: all mutation goes through the simulator so the life
//! invariants (monotonic age, one-shot education, never-increasing health,
//! append-only events) cannot be broken from outside the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::event::{EventLog, LifeEvent};
use crate::tables::TableError;

/// Age at which every person enters the simulation
pub const START_AGE: u32 = 18;

/// Hard upper bound on age; no life is stepped past it
pub const MAX_AGE: u32 = 95;

/// Age at which education resolves and work begins
pub const EDUCATION_AGE: u32 = 22;

/// Health bounds
pub const MIN_HEALTH: i32 = 0;
pub const MAX_HEALTH: i32 = 100;

/// Settlement type of a person's home, fixed at birth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Rural,
    Suburban,
    Urban,
}

impl Location {
    /// All locations, in the order used for uniform selection
    pub const ALL: [Location; 3] = [Location::Rural, Location::Suburban, Location::Urban];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::Rural => "rural",
            Location::Suburban => "suburban",
            Location::Urban => "urban",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| TableError::invalid("location", s))
    }
}

/// Highest education completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    None,
    HighSchool,
    College,
    Graduate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::None,
        EducationLevel::HighSchool,
        EducationLevel::College,
        EducationLevel::Graduate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::None => "none",
            EducationLevel::HighSchool => "high_school",
            EducationLevel::College => "college",
            EducationLevel::Graduate => "graduate",
        }
    }

    /// Whether education has been decided
    pub fn is_resolved(self) -> bool {
        self != EducationLevel::None
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EducationLevel {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EducationLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| TableError::invalid("education level", s))
    }
}

/// Occupation, or the `Student` sentinel before education resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Career {
    Student,
    // high school
    Retail,
    Manufacturing,
    Service,
    Trades,
    Military,
    // college
    OfficeWorker,
    Teacher,
    Nurse,
    Manager,
    Engineer,
    // graduate
    Doctor,
    Lawyer,
    Professor,
    Executive,
    Researcher,
}

impl Career {
    /// Every working career (excludes `Student`)
    pub const WORKING: [Career; 15] = [
        Career::Retail,
        Career::Manufacturing,
        Career::Service,
        Career::Trades,
        Career::Military,
        Career::OfficeWorker,
        Career::Teacher,
        Career::Nurse,
        Career::Manager,
        Career::Engineer,
        Career::Doctor,
        Career::Lawyer,
        Career::Professor,
        Career::Executive,
        Career::Researcher,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Career::Student => "student",
            Career::Retail => "retail",
            Career::Manufacturing => "manufacturing",
            Career::Service => "service",
            Career::Trades => "trades",
            Career::Military => "military",
            Career::OfficeWorker => "office_worker",
            Career::Teacher => "teacher",
            Career::Nurse => "nurse",
            Career::Manager => "manager",
            Career::Engineer => "engineer",
            Career::Doctor => "doctor",
            Career::Lawyer => "lawyer",
            Career::Professor => "professor",
            Career::Executive => "executive",
            Career::Researcher => "researcher",
        }
    }

    pub fn is_working(self) -> bool {
        self != Career::Student
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Career {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Career::Student.as_str() {
            return Ok(Career::Student);
        }
        Career::WORKING
            .into_iter()
            .find(|career| career.as_str() == s)
            .ok_or_else(|| TableError::invalid("career", s))
    }
}

/// A synthetic individual
///
/// # Example
/// ```
/// use life_simulator_core_rs::models::{Career, EducationLevel, Location, Person};
///
/// let person = Person::new("Ada Smith".to_string(), Location::Urban, 72);
/// assert_eq!(person.age(), 18);
/// assert_eq!(person.education_level(), EducationLevel::None);
/// assert_eq!(person.career(), Career::Student);
/// assert_eq!(person.life_events().len(), 1); // birth
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    name: String,
    age: u32,
    education_level: EducationLevel,
    career: Career,
    /// Annual income in whole dollars; 0 while a student
    income: i64,
    health: i32,
    location: Location,
    life_events: EventLog,
}

impl Person {
    /// Create a newborn record at [`START_AGE`] and log the birth
    ///
    /// `health` is clamped into [0, 100].
    pub fn new(name: String, location: Location, health: i32) -> Self {
        let health = health.clamp(MIN_HEALTH, MAX_HEALTH);
        let mut life_events = EventLog::new();
        life_events.log(LifeEvent::Born {
            age: START_AGE,
            location,
            health,
        });

        Self {
            name,
            age: START_AGE,
            education_level: EducationLevel::None,
            career: Career::Student,
            income: 0,
            health,
            location,
            life_events,
        }
    }

    /// Rebuild a person from a snapshot, checking the record invariants
    ///
    /// Used to resume a life at an arbitrary point (e.g. to test terminal
    /// boundaries) and to load JSON exports.
    pub fn from_snapshot(snapshot: PersonSnapshot) -> Result<Self, SnapshotError> {
        let PersonSnapshot {
            name,
            age,
            education_level,
            career,
            income,
            health,
            location,
            life_events,
        } = snapshot;

        if !(START_AGE..=MAX_AGE).contains(&age) {
            return Err(SnapshotError::AgeOutOfRange(age));
        }
        if !(MIN_HEALTH..=MAX_HEALTH).contains(&health) {
            return Err(SnapshotError::HealthOutOfRange(health));
        }
        if income < 0 {
            return Err(SnapshotError::NegativeIncome(income));
        }
        if education_level.is_resolved() != career.is_working() {
            return Err(SnapshotError::CareerMismatch {
                education: education_level,
                career,
            });
        }
        if education_level.is_resolved() != (age >= EDUCATION_AGE) {
            return Err(SnapshotError::EducationAgeMismatch {
                age,
                education: education_level,
            });
        }
        match life_events.events().first() {
            None => return Err(SnapshotError::MissingBirth),
            Some(LifeEvent::Born { age: born, .. }) if *born != START_AGE => {
                return Err(SnapshotError::BirthAge(*born));
            }
            _ => {}
        }
        if !life_events.is_chronological() {
            return Err(SnapshotError::EventsOutOfOrder);
        }
        if let Some(event) = life_events.last().filter(|event| event.age() > age) {
            return Err(SnapshotError::EventAfterAge {
                event_age: event.age(),
                age,
            });
        }

        Ok(Self {
            name,
            age,
            education_level,
            career,
            income,
            health,
            location,
            life_events,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn education_level(&self) -> EducationLevel {
        self.education_level
    }

    pub fn career(&self) -> Career {
        self.career
    }

    pub fn income(&self) -> i64 {
        self.income
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn life_events(&self) -> &EventLog {
        &self.life_events
    }

    /// Whether the life has ended (death event logged)
    pub fn is_finalized(&self) -> bool {
        matches!(self.life_events.last(), Some(LifeEvent::Died { .. }))
    }

    /// Whether the loop guard still allows another year
    pub fn can_advance(&self) -> bool {
        self.health > MIN_HEALTH && self.age < MAX_AGE && !self.is_finalized()
    }

    pub fn snapshot(&self) -> PersonSnapshot {
        PersonSnapshot::from(self)
    }

    // ------------------------------------------------------------------
    // Mutation (simulator only)
    // ------------------------------------------------------------------

    pub(crate) fn advance_age(&mut self) {
        self.age += 1;
    }

    /// Resolve education and the career it leads to. One-shot.
    pub(crate) fn resolve_education(&mut self, level: EducationLevel, career: Career) {
        debug_assert!(!self.education_level.is_resolved());
        debug_assert!(level.is_resolved() && career.is_working());

        self.education_level = level;
        self.life_events.log(LifeEvent::CompletedEducation {
            age: self.age,
            level,
        });
        self.career = career;
        self.life_events.log(LifeEvent::StartedCareer {
            age: self.age,
            career,
        });
    }

    pub(crate) fn set_income(&mut self, income: i64) {
        self.income = income.max(0);
    }

    /// Subtract from health, flooring at zero. Never increases health.
    pub(crate) fn decline_health(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(MIN_HEALTH);
    }

    pub(crate) fn record(&mut self, event: LifeEvent) {
        self.life_events.log(event);
    }

    pub(crate) fn finalize(&mut self) {
        self.life_events.log(LifeEvent::Died { age: self.age });
    }
}

/// Errors when restoring a person from a snapshot
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SnapshotError {
    #[error("Age {0} outside [18, 95]")]
    AgeOutOfRange(u32),

    #[error("Health {0} outside [0, 100]")]
    HealthOutOfRange(i32),

    #[error("Income must be non-negative, got {0}")]
    NegativeIncome(i64),

    #[error("Career {career} inconsistent with education {education}")]
    CareerMismatch {
        education: EducationLevel,
        career: Career,
    },

    #[error("Education {education} inconsistent with age {age}")]
    EducationAgeMismatch { age: u32, education: EducationLevel },

    #[error("Life events must start with a birth event")]
    MissingBirth,

    #[error("Birth recorded at age {0}, expected 18")]
    BirthAge(u32),

    #[error("Event at age {event_age} is later than current age {age}")]
    EventAfterAge { event_age: u32, age: u32 },

    #[error("Life events are not in chronological order")]
    EventsOutOfOrder,
}

/// Plain-data view of a person, for JSON export and resumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSnapshot {
    pub name: String,
    pub age: u32,
    pub education_level: EducationLevel,
    pub career: Career,
    pub income: i64,
    pub health: i32,
    pub location: Location,
    pub life_events: EventLog,
}

impl From<&Person> for PersonSnapshot {
    fn from(person: &Person) -> Self {
        PersonSnapshot {
            name: person.name.clone(),
            age: person.age,
            education_level: person.education_level,
            career: person.career,
            income: person.income,
            health: person.health,
            location: person.location,
            life_events: person.life_events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for loc in Location::ALL {
            assert_eq!(loc.as_str().parse::<Location>().unwrap(), loc);
        }
        for level in EducationLevel::ALL {
            assert_eq!(level.as_str().parse::<EducationLevel>().unwrap(), level);
        }
        for career in Career::WORKING {
            assert_eq!(career.as_str().parse::<Career>().unwrap(), career);
        }
        assert_eq!("student".parse::<Career>().unwrap(), Career::Student);
    }

    #[test]
    fn test_unknown_location_is_invalid_argument() {
        let err = "lunar".parse::<Location>().unwrap_err();
        assert_eq!(err, TableError::invalid("location", "lunar"));
    }

    #[test]
    fn test_new_clamps_health() {
        assert_eq!(Person::new("A B".into(), Location::Rural, 140).health(), 100);
        assert_eq!(Person::new("A B".into(), Location::Rural, -3).health(), 0);
    }

    #[test]
    fn test_decline_health_floors_at_zero() {
        let mut person = Person::new("A B".into(), Location::Rural, 1);
        person.decline_health(2);
        assert_eq!(person.health(), 0);
        person.decline_health(-5);
        assert_eq!(person.health(), 0, "negative decline must not heal");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Career::OfficeWorker).unwrap();
        assert_eq!(json, "\"office_worker\"");
        let json = serde_json::to_string(&EducationLevel::HighSchool).unwrap();
        assert_eq!(json, "\"high_school\"");
    }

    #[test]
    fn test_snapshot_rejects_student_with_degree() {
        let mut snapshot = Person::new("A B".into(), Location::Urban, 70).snapshot();
        snapshot.education_level = EducationLevel::College;
        assert!(matches!(
            Person::from_snapshot(snapshot),
            Err(SnapshotError::CareerMismatch { .. })
        ));
    }
}
