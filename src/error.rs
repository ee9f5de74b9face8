//! Error types for the secmap layout model.
//!
//! Queries against the model never fail: out-of-range lookups and failed
//! address translations come back as absent values. The types here cover
//! the fallible edges of the crate, namely loading configuration and
//! structural descriptions, and the RVA to RAW translation capability that
//! a layout provider exposes.

use thiserror::Error;

/// Failure of an RVA to RAW (file offset) translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressTranslationError {
    /// The RVA lies in no section and outside the header region.
    #[error("RVA {rva:#x} is not mapped by any section")]
    Unmapped { rva: u64 },

    /// The RVA lies in a section's memory footprint but past its raw content.
    #[error("RVA {rva:#x} points past the raw content of section {section}")]
    PastMappedContent { rva: u64, section: usize },

    /// The translated offset lies beyond the end of the file.
    #[error("RVA {rva:#x} translates to {raw:#x}, beyond the end of the file")]
    OutsideFile { rva: u64, raw: u64 },
}

/// Main error type for secmap operations.
#[derive(Debug, Error)]
pub enum SecmapError {
    /// Configuration values that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Structural description rejected during loading
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Address translation errors surfaced by a provider
    #[error("Address error: {0}")]
    AddressTranslation(#[from] AddressTranslationError),
}

impl From<serde_json::Error> for SecmapError {
    fn from(err: serde_json::Error) -> Self {
        SecmapError::Serialization(err.to_string())
    }
}

/// Result type alias for secmap operations
pub type Result<T> = std::result::Result<T, SecmapError>;

/// Convert secmap errors to PyO3 exceptions
#[cfg(feature = "python-ext")]
impl From<SecmapError> for pyo3::PyErr {
    fn from(err: SecmapError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyException, PyIOError, PyValueError};

        match err {
            SecmapError::Io(e) => PyIOError::new_err(e.to_string()),
            SecmapError::InvalidConfig(msg) | SecmapError::InvalidLayout(msg) => {
                PyValueError::new_err(msg)
            }
            _ => PyException::new_err(err.to_string()),
        }
    }
}
