//! Domain models for the life simulator

pub mod event;
pub mod person;

// Re-exports
pub use event::{EventLog, LifeEvent, LifeIncident};
pub use person::{
    Career, EducationLevel, Location, Person, PersonSnapshot, SnapshotError, EDUCATION_AGE,
    MAX_AGE, MAX_HEALTH, MIN_HEALTH, START_AGE,
};
