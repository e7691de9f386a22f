//! Python bindings (PyO3)
//!
//! Compiled only with the `pyo3` feature.

pub mod simulator;
pub mod types;
