//! PyO3 wrapper for the life simulator
//!
//! Lets a Python front-end drive batch sessions.
//!
//! # Example (from Python)
//!
//! ```python
//! from life_simulator_core_rs import Simulator
//!
//! sim = Simulator({"rng_seed": 42, "income_data_path": None})
//! person = sim.simulate_life()
//! print(person["name"], person["age"])
//! print(sim.format_summary())
//!
//! text = sim.run_batch(5)
//! sim.save("session.txt")
//! ```

use pyo3::exceptions::{PyIOError, PyRuntimeError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulator_config, person_to_py};
use crate::models::Person;
use crate::report::{format_summary, Session};
use crate::simulator::LifeSimulator;

/// Python wrapper around a seeded simulator plus its session history
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    simulator: LifeSimulator,
    session: Session,
    last_person: Option<Person>,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from an optional config dict
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => parse_simulator_config(dict)?,
            None => Default::default(),
        };
        let simulator = LifeSimulator::from_config(&config);
        let session = Session::new(simulator.tables().clone(), config.rng_seed);

        Ok(PySimulator {
            simulator,
            session,
            last_person: None,
        })
    }

    /// Simulate one life and return it as a dict
    fn simulate_life(&mut self, py: Python) -> PyResult<Py<PyDict>> {
        let person = self
            .simulator
            .simulate_life()
            .map_err(|e| PyRuntimeError::new_err(format!("Simulation failed: {}", e)))?;
        let dict = person_to_py(py, &person)?;
        self.last_person = Some(person);
        Ok(dict)
    }

    /// Summary text of the last life from `simulate_life`, if any
    fn format_summary(&self) -> Option<String> {
        self.last_person.as_ref().map(format_summary)
    }

    /// Run a batch in the session and return the batch text
    fn run_batch(&mut self, count: usize) -> PyResult<String> {
        self.session
            .run_batch(count)
            .map_err(|e| PyRuntimeError::new_err(format!("Batch failed: {}", e)))?;
        Ok(self.session.latest_batch_text())
    }

    /// Number of lives in the session
    fn session_size(&self) -> usize {
        self.session.len()
    }

    /// Save every session life to a text file; returns lives written
    fn save(&self, path: &str) -> PyResult<usize> {
        self.session
            .save(path)
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }
}
