//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::Person;
use crate::simulator::SimulatorConfig;

/// Extract an optional field from a Python dict.
///
/// Returns `None` when the key is missing; errors only if type conversion fails.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?.map(|value| value.extract()).transpose()
}

/// Build a `SimulatorConfig` from a Python dict
///
/// Recognised keys: `rng_seed`, `income_data_path`, `bootstrap_income_data`.
/// Missing keys keep their defaults.
pub fn parse_simulator_config(dict: &Bound<'_, PyDict>) -> PyResult<SimulatorConfig> {
    let mut config = SimulatorConfig::default();

    if let Some(seed) = extract_optional::<u64>(dict, "rng_seed")? {
        config.rng_seed = seed;
    }
    if dict.contains("income_data_path")? {
        config.income_data_path = extract_optional::<Option<String>>(dict, "income_data_path")?
            .flatten()
            .map(Into::into);
    }
    if let Some(bootstrap) = extract_optional::<bool>(dict, "bootstrap_income_data")? {
        config.bootstrap_income_data = bootstrap;
    }

    Ok(config)
}

/// Convert a Person to a Python dict
///
/// Enum fields use their wire names (`"high_school"`, `"office_worker"`);
/// `life_events` is the list of rendered event lines.
pub fn person_to_py(py: Python<'_>, person: &Person) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("name", person.name())?;
    dict.set_item("age", person.age())?;
    dict.set_item("education_level", person.education_level().as_str())?;
    dict.set_item("career", person.career().as_str())?;
    dict.set_item("income", person.income())?;
    dict.set_item("health", person.health())?;
    dict.set_item("location_type", person.location().as_str())?;

    let events = PyList::new(py, person.life_events().lines())?;
    dict.set_item("life_events", events)?;

    Ok(dict.unbind())
}
