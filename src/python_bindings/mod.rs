//! Python bindings for the secmap layout model.
//!
//! Exposes the structural types and a `SectionMap` object bundling an
//! address-space model with its selection. Absent unit positions come back
//! as `-1.0`, the flat sentinel Python callers expect.

pub mod core_types;
pub mod model;

use pyo3::prelude::*;

/// Register all Python bindings with the module.
pub fn register_python_bindings(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    core_types::register_core_types(py, m)?;
    model::register_model_bindings(py, m)?;
    m.add_function(wrap_pyfunction!(crate::logging::init_logging, m)?)?;
    Ok(())
}

#[pymodule]
fn secmap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_python_bindings(m.py(), m)
}
