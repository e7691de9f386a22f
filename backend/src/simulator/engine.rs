//! Life simulation engine
//!
//! Steps one person through life a year at a time:
//!
//! ```text
//! create_person (age 18, Alive)
//! while health > 0 and age < 95:
//!     1. age += 1
//!     2. at 22: draw education (graduate, college, high school), then career
//!     3. if working: redraw income from the experience-scaled range
//!     4. after 40: health -= uniform{0, 1, 2}
//!     5. 10% chance of one catalog event
//!     6. death roll: p = max(0.001, (age-60)*0.002 + (100-health)*0.001)
//! append "Died at age N" (Dead)
//! ```
//!
//! The stop conditions on age and health are checked at loop entry, so a
//! person whose health reaches 0 still takes that year's death roll before
//! the loop exits. Both paths record the same final age.
//!
//! # Example
//!
//! ```rust
//! use life_simulator_core_rs::simulator::LifeSimulator;
//!
//! let mut sim = LifeSimulator::new(12345);
//! let person = sim.simulate_life().unwrap();
//!
//! assert!(person.is_finalized());
//! assert!((18..=95).contains(&person.age()));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::income::{load_overrides_or_default, IncomeDataSource};
use crate::models::{
    Career, EducationLevel, LifeEvent, LifeIncident, Location, Person, MAX_AGE, MAX_HEALTH,
    MIN_HEALTH,
};
use crate::rng::{RandomSource, RngManager};
use crate::simulator::config::SimulatorConfig;
use crate::tables::{choose_cumulative, ParameterTables, TableError};

pub use crate::models::EDUCATION_AGE;

/// Health starts declining after this age
pub const HEALTH_DECLINE_AGE: u32 = 40;

/// Largest yearly health decline (inclusive)
pub const MAX_HEALTH_DECLINE: i64 = 2;

/// Chance per year of one catalog event
pub const INCIDENT_PROBABILITY: f64 = 0.1;

/// Starting health is clamped into [MIN_START_HEALTH, 100]
pub const MIN_START_HEALTH: i32 = 20;

/// Uniform offset applied to baseline starting health
pub const START_HEALTH_SPREAD: i64 = 15;

// ============================================================================
// State & Errors
// ============================================================================

/// Life state machine: `Alive` → `Dead` (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}

/// Person state recorded at the end of each simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub age: u32,
    pub education_level: EducationLevel,
    pub career: Career,
    pub income: i64,
    pub health: i32,
}

impl From<&Person> for YearSnapshot {
    fn from(person: &Person) -> Self {
        YearSnapshot {
            age: person.age(),
            education_level: person.education_level(),
            career: person.career(),
            income: person.income(),
            health: person.health(),
        }
    }
}

/// Simulation errors
///
/// None of these occur when stepping a person created by the simulator;
/// they guard against misuse (stepping a finished life) and against tables
/// that lack an entry the simulator needs.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Life of {name} already ended at age {age}")]
    AlreadyFinalized { name: String, age: u32 },

    #[error("Age cap of 95 reached")]
    AgeCapReached,

    #[error("Table lookup failed: {0}")]
    Table(#[from] TableError),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Simulator
// ============================================================================

/// Year-by-year life simulator
///
/// Generic over its random source so tests can script every draw. Tables are
/// shared (`Arc`) so many simulators can run side by side from one set of
/// tables, each with its own independently seeded RNG.
#[derive(Debug, Clone)]
pub struct LifeSimulator<R = RngManager> {
    tables: Arc<ParameterTables>,
    rng: R,
}

impl LifeSimulator<RngManager> {
    /// Simulator over the built-in tables with a seeded xorshift RNG
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Arc::new(ParameterTables::builtin()), RngManager::new(seed))
    }

    /// Build from configuration, loading income data on the way
    ///
    /// Data source problems never fail construction: bootstrap and load
    /// errors are logged and the built-in tables are used.
    pub fn from_config(config: &SimulatorConfig) -> Self {
        let tables = Arc::new(load_tables(config));
        Self::with_rng(tables, RngManager::new(config.rng_seed))
    }
}

impl<R: RandomSource> LifeSimulator<R> {
    pub fn with_rng(tables: Arc<ParameterTables>, rng: R) -> Self {
        Self { tables, rng }
    }

    pub fn tables(&self) -> &Arc<ParameterTables> {
        &self.tables
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    // ------------------------------------------------------------------
    // Birth
    // ------------------------------------------------------------------

    /// Create a person at age 18 with random location, health and name
    pub fn create_person(&mut self) -> Person {
        let location = *self.rng.choose(&Location::ALL);

        let offset = self
            .rng
            .range_inclusive(-START_HEALTH_SPREAD, START_HEALTH_SPREAD);
        let health = (self.tables.baseline_health(location) + offset as i32)
            .clamp(MIN_START_HEALTH, MAX_HEALTH);

        let name = self.generate_name(location);
        Person::new(name, location, health)
    }

    /// "First Last" drawn independently from the location's pools
    pub fn generate_name(&mut self, location: Location) -> String {
        let (first_names, last_names) = self.tables.names_for(location);
        let first = *self.rng.choose(first_names);
        let last = *self.rng.choose(last_names);
        format!("{} {}", first, last)
    }

    // ------------------------------------------------------------------
    // Decision points
    // ------------------------------------------------------------------

    /// Cumulative weighted draw over graduate, college, high school
    pub fn choose_education(&mut self, location: Location) -> EducationLevel {
        let bounds = self.tables.education_probabilities(location).cumulative();
        choose_cumulative(&bounds, self.rng.next_f64())
    }

    /// Uniform draw from the education level's career pool
    pub fn choose_career(&mut self, level: EducationLevel) -> Result<Career, TableError> {
        let pool = self.tables.careers_for(level)?;
        Ok(*self.rng.choose(pool))
    }

    /// Income for a career at an age, scaled by experience
    pub fn calculate_income(&mut self, career: Career, age: u32) -> Result<i64, TableError> {
        let (base_min, base_max) = self.tables.income_range(career)?;
        let multiplier = experience_multiplier(age);

        let min_income = (base_min as f64 * multiplier) as i64;
        let max_income = (base_max as f64 * multiplier) as i64;

        Ok(self.rng.range_inclusive(min_income, max_income))
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Simulate one year of life, mutating the person in place
    ///
    /// # Errors
    /// - `AlreadyFinalized` if the person has died
    /// - `AgeCapReached` if the person is already at the age cap
    pub fn advance_one_year(&mut self, person: &mut Person) -> Result<(), SimulationError> {
        if person.is_finalized() {
            return Err(SimulationError::AlreadyFinalized {
                name: person.name().to_string(),
                age: person.age(),
            });
        }
        if person.age() >= MAX_AGE {
            return Err(SimulationError::AgeCapReached);
        }

        // 1. Age
        person.advance_age();
        let age = person.age();

        // 2. Education and first career
        if age == EDUCATION_AGE && !person.education_level().is_resolved() {
            let level = self.choose_education(person.location());
            let career = self.choose_career(level)?;
            person.resolve_education(level, career);
        }

        // 3. Income
        if person.career().is_working() && age >= EDUCATION_AGE {
            let income = self.calculate_income(person.career(), age)?;
            person.set_income(income);
        }

        // 4. Health decline
        if age > HEALTH_DECLINE_AGE {
            let decline = self.rng.range_inclusive(0, MAX_HEALTH_DECLINE);
            person.decline_health(decline as i32);
        }

        // 5. Random catalog event
        if self.rng.next_f64() < INCIDENT_PROBABILITY {
            let incident = *self.rng.choose(&LifeIncident::CATALOG);
            person.record(LifeEvent::Incident { age, incident });
        }

        Ok(())
    }

    /// One iteration of the life loop: advance a year, then roll for death
    ///
    /// Returns `Dead` when the death roll fires or the person can no longer
    /// advance (health 0 or age cap). Does not append the death event.
    pub fn step(&mut self, person: &mut Person) -> Result<LifeState, SimulationError> {
        self.advance_one_year(person)?;

        if self.rng.next_f64() < death_probability(person.age(), person.health()) {
            return Ok(LifeState::Dead);
        }
        if person.can_advance() {
            Ok(LifeState::Alive)
        } else {
            Ok(LifeState::Dead)
        }
    }

    /// Run a person's remaining life and finalize it
    pub fn live_out(&mut self, person: Person) -> Result<Person, SimulationError> {
        self.live_out_observed(person, |_| {})
    }

    /// Create a person and simulate their entire life
    pub fn simulate_life(&mut self) -> Result<Person, SimulationError> {
        let person = self.create_person();
        self.live_out(person)
    }

    /// Simulate a life, recording the person's state after every year
    pub fn simulate_life_with_history(
        &mut self,
    ) -> Result<(Person, Vec<YearSnapshot>), SimulationError> {
        let person = self.create_person();
        let mut history = vec![YearSnapshot::from(&person)];
        let person = self.live_out_observed(person, |p| history.push(YearSnapshot::from(p)))?;
        Ok((person, history))
    }

    fn live_out_observed(
        &mut self,
        mut person: Person,
        mut observe: impl FnMut(&Person),
    ) -> Result<Person, SimulationError> {
        if person.is_finalized() {
            return Err(SimulationError::AlreadyFinalized {
                name: person.name().to_string(),
                age: person.age(),
            });
        }

        let mut state = if person.can_advance() {
            LifeState::Alive
        } else {
            LifeState::Dead
        };
        while state == LifeState::Alive {
            state = self.step(&mut person)?;
            observe(&person);
        }

        person.finalize();
        debug!(
            name = person.name(),
            age = person.age(),
            health = person.health(),
            events = person.life_events().len(),
            "Life simulated"
        );
        Ok(person)
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Income multiplier: +2% per year past 22, capped at 1.5
pub fn experience_multiplier(age: u32) -> f64 {
    (1.0 + (age as f64 - EDUCATION_AGE as f64) * 0.02).clamp(1.0, 1.5)
}

/// Yearly probability of death after the year's changes
pub fn death_probability(age: u32, health: i32) -> f64 {
    let age_risk = (age as f64 - 60.0) * 0.002;
    let health_risk = (MAX_HEALTH - health.clamp(MIN_HEALTH, MAX_HEALTH)) as f64 * 0.001;
    (age_risk + health_risk).max(0.001)
}

fn load_tables(config: &SimulatorConfig) -> ParameterTables {
    let Some(source) = config.income_source() else {
        return ParameterTables::builtin();
    };
    if config.bootstrap_income_data {
        if let Err(err) = source.ensure_exists() {
            warn!(
                path = %source.path().display(),
                error = %err,
                "Failed to create income data; using built-in data instead"
            );
        }
    }
    ParameterTables::with_overrides(load_overrides_or_default(&source as &dyn IncomeDataSource))
}
