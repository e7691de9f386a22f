//! Simulator - the year-by-year life loop
//!
//! See `engine.rs` for the full implementation.

pub mod config;
pub mod engine;
pub mod fingerprint;

// Re-export main types for convenience
pub use config::{ConfigError, SimulatorConfig};
pub use engine::{
    death_probability, experience_multiplier, LifeSimulator, LifeState, SimulationError,
    YearSnapshot, EDUCATION_AGE, HEALTH_DECLINE_AGE, INCIDENT_PROBABILITY,
};
pub use fingerprint::fingerprint;
