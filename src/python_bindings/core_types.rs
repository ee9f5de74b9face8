//! Python bindings for the structural description types.

use pyo3::prelude::*;

/// Register core data types with the Python module.
pub fn register_core_types(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<crate::core::view::ViewMode>()?;
    m.add_class::<crate::core::section::SectionDescriptor>()?;
    m.add("UNIT_NOT_VISIBLE", crate::model::UNIT_NOT_VISIBLE)?;
    Ok(())
}
