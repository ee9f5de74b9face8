//! Address-space view selector.

#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which address space a query is answered in.
///
/// `Raw` uses on-disk offsets, sizes and file alignment; `Virtual` uses
/// RVAs, in-memory sizes and section alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass(eq, eq_int))]
pub enum ViewMode {
    /// On-disk (file offset) view
    Raw,
    /// In-memory (RVA) view
    Virtual,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Raw, ViewMode::Virtual];

    pub fn is_raw(self) -> bool {
        self == ViewMode::Raw
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl ViewMode {
    fn __str__(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Raw => write!(f, "raw"),
            ViewMode::Virtual => write!(f, "virtual"),
        }
    }
}
