//! Section descriptor as supplied by the structural-description provider.
//!
//! A descriptor carries both the on-disk and the in-memory placement of one
//! section table entry. Sizes are the bytes actually occupied, which may be
//! smaller than the unit-rounded footprint the model draws for them.

#[cfg(feature = "python-ext")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::view::ViewMode;

/// One entry of the section table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "python-ext", pyclass)]
pub struct SectionDescriptor {
    /// Position in the section table
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub index: usize,
    /// Section name as displayed (e.g. ".text")
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub display_name: String,
    /// File offset where section content begins
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub raw_offset: u64,
    /// Bytes of content present in the file
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub raw_content_size: u64,
    /// RVA where the section is mapped
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub virtual_offset: u64,
    /// Bytes of content present in memory
    #[cfg_attr(feature = "python-ext", pyo3(get))]
    pub virtual_content_size: u64,
}

impl SectionDescriptor {
    /// Create a new descriptor.
    pub fn new(
        index: usize,
        display_name: impl Into<String>,
        raw_offset: u64,
        raw_content_size: u64,
        virtual_offset: u64,
        virtual_content_size: u64,
    ) -> Self {
        Self {
            index,
            display_name: display_name.into(),
            raw_offset,
            raw_content_size,
            virtual_offset,
            virtual_content_size,
        }
    }

    /// Offset of the content in the given view.
    pub fn content_offset(&self, view: ViewMode) -> u64 {
        match view {
            ViewMode::Raw => self.raw_offset,
            ViewMode::Virtual => self.virtual_offset,
        }
    }

    /// Size of the content in the given view.
    pub fn content_size(&self, view: ViewMode) -> u64 {
        match view {
            ViewMode::Raw => self.raw_content_size,
            ViewMode::Virtual => self.virtual_content_size,
        }
    }

    /// Bytes the section spans once mapped: the larger of its two sizes.
    pub fn virtual_footprint(&self) -> u64 {
        self.virtual_content_size.max(self.raw_content_size)
    }

    /// Check whether an RVA falls inside the mapped footprint.
    pub fn contains_rva(&self, rva: u64) -> bool {
        rva >= self.virtual_offset
            && rva - self.virtual_offset < self.virtual_footprint()
    }

    /// Bracketed name used on the diagram, e.g. `[.text]`.
    pub fn label(&self) -> String {
        format!("[{}]", self.display_name)
    }
}

#[cfg(feature = "python-ext")]
#[pymethods]
impl SectionDescriptor {
    fn __str__(&self) -> String {
        format!("{}", self)
    }

    #[pyo3(name = "label")]
    fn label_py(&self) -> String {
        self.label()
    }
}

impl fmt::Display for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Section #{} '{}' (raw {:#x}+{:#x}, rva {:#x}+{:#x})",
            self.index,
            self.display_name,
            self.raw_offset,
            self.raw_content_size,
            self.virtual_offset,
            self.virtual_content_size
        )
    }
}
