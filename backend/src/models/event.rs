//! Life event logging.
//!
//! Every state transition and every fired random event of a life is appended
//! to an [`EventLog`]. The log is append-only: there is no API to remove,
//! reorder or edit an entry once logged.
//!
//! Events carry the age at which they happened, so chronology can be checked
//! mechanically. Their `Display` output is the human-readable line used in
//! summaries.
//!
//! # Example
//!
//! ```rust
//! use life_simulator_core_rs::models::{LifeEvent, LifeIncident};
//!
//! let event = LifeEvent::Incident {
//!     age: 31,
//!     incident: LifeIncident::BoughtHouse,
//! };
//! assert_eq!(event.to_string(), "Age 31: Bought a house");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::person::{Career, EducationLevel, Location};

/// Generic year events drawn from a fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeIncident {
    Promotion,
    Relocation,
    HealthIssue,
    NewRelationship,
    BoughtHouse,
    FinancialDifficulty,
}

impl LifeIncident {
    /// The catalog, in selection order
    pub const CATALOG: [LifeIncident; 6] = [
        LifeIncident::Promotion,
        LifeIncident::Relocation,
        LifeIncident::HealthIssue,
        LifeIncident::NewRelationship,
        LifeIncident::BoughtHouse,
        LifeIncident::FinancialDifficulty,
    ];

    pub fn description(self) -> &'static str {
        match self {
            LifeIncident::Promotion => "Got promoted at work",
            LifeIncident::Relocation => "Moved to a new city",
            LifeIncident::HealthIssue => "Had a major health issue",
            LifeIncident::NewRelationship => "Started a new relationship",
            LifeIncident::BoughtHouse => "Bought a house",
            LifeIncident::FinancialDifficulty => "Had financial difficulties",
        }
    }
}

/// Something that happened in a life.
///
/// All events include the age at which they occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifeEvent {
    /// Person created
    Born {
        age: u32,
        location: Location,
        health: i32,
    },

    /// Education resolved
    CompletedEducation { age: u32, level: EducationLevel },

    /// First working career chosen
    StartedCareer { age: u32, career: Career },

    /// Random catalog event fired this year
    Incident { age: u32, incident: LifeIncident },

    /// Terminal event
    Died { age: u32 },
}

impl LifeEvent {
    /// Age at which this event occurred
    pub fn age(&self) -> u32 {
        match self {
            LifeEvent::Born { age, .. } => *age,
            LifeEvent::CompletedEducation { age, .. } => *age,
            LifeEvent::StartedCareer { age, .. } => *age,
            LifeEvent::Incident { age, .. } => *age,
            LifeEvent::Died { age } => *age,
        }
    }

    /// Short name of the event kind
    pub fn event_type(&self) -> &'static str {
        match self {
            LifeEvent::Born { .. } => "Born",
            LifeEvent::CompletedEducation { .. } => "CompletedEducation",
            LifeEvent::StartedCareer { .. } => "StartedCareer",
            LifeEvent::Incident { .. } => "Incident",
            LifeEvent::Died { .. } => "Died",
        }
    }
}

impl fmt::Display for LifeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifeEvent::Born {
                location, health, ..
            } => write!(f, "Born in {} area with health {}", location, health),
            LifeEvent::CompletedEducation { age, level } => {
                write!(f, "Age {}: Completed {}", age, level)
            }
            LifeEvent::StartedCareer { age, career } => {
                write!(f, "Age {}: Started career as {}", age, career)
            }
            LifeEvent::Incident { age, incident } => {
                write!(f, "Age {}: {}", age, incident.description())
            }
            LifeEvent::Died { age } => write!(f, "Died at age {}", age),
        }
    }
}

/// Append-only, chronological event log.
///
/// A thin wrapper around `Vec<LifeEvent>` with read-only queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<LifeEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub(crate) fn log(&mut self, event: LifeEvent) {
        debug_assert!(
            self.last().map_or(true, |prev| prev.age() <= event.age()),
            "event logged out of order"
        );
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[LifeEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LifeEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&LifeEvent> {
        self.events.last()
    }

    /// Events that happened at a specific age
    pub fn events_at_age(&self, age: u32) -> Vec<&LifeEvent> {
        self.events.iter().filter(|e| e.age() == age).collect()
    }

    /// Events of a specific kind (see [`LifeEvent::event_type`])
    pub fn events_of_type(&self, event_type: &str) -> Vec<&LifeEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Rendered event lines, in order
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    /// True when embedded ages never decrease and the log starts with birth
    pub fn is_chronological(&self) -> bool {
        matches!(self.events.first(), Some(LifeEvent::Born { .. }))
            && self.events.windows(2).all(|w| w[0].age() <= w[1].age())
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a LifeEvent;
    type IntoIter = std::slice::Iter<'a, LifeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
