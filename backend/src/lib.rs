//! Life Simulator Core - Rust Engine
//!
//! Stochastic, table-driven life trajectories with deterministic execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Person, LifeEvent, EventLog)
//! - **tables**: Immutable demographic and economic parameters
//! - **income**: External income data (CSV bootstrap and loading)
//! - **simulator**: Year-by-year life loop
//! - **report**: Text summaries and batch sessions
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, injectable source)
//! 2. Life events are append-only and chronological
//! 3. Health never increases; age never exceeds 95

// Module declarations
pub mod income;
pub mod models;
pub mod report;
pub mod rng;
pub mod simulator;
pub mod tables;

// Re-exports for convenience
pub use income::{
    CsvIncomeDataSource, DataSourceError, EmploymentLevel, IncomeDataSource, IncomeOverride,
    NoIncomeData,
};
pub use models::{
    event::{EventLog, LifeEvent, LifeIncident},
    person::{Career, EducationLevel, Location, Person, PersonSnapshot},
};
pub use report::{format_summary, parse_summary, LifeSummary, Session};
pub use rng::{RandomSource, RngManager, ScriptedRng};
pub use simulator::{LifeSimulator, LifeState, SimulationError, SimulatorConfig};
pub use tables::{ParameterTables, TableError};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn life_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    Ok(())
}
