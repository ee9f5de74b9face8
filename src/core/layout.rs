//! Structural description of an executable image.
//!
//! `LayoutProvider` is the seam to whatever parsed the executable: it hands
//! out the section table, sizes, alignments and the RVA to RAW translation.
//! `ExecutableLayout` is the plain-data implementation that hosts build from
//! their parser output (or load from JSON) and publish to the model.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::section::SectionDescriptor;
use crate::core::view::ViewMode;
use crate::error::{AddressTranslationError, Result, SecmapError};

/// Read-only structural description consumed by the address-space model.
pub trait LayoutProvider {
    /// Section table in table order.
    fn section_table(&self) -> &[SectionDescriptor];

    /// Total on-disk size in bytes.
    fn raw_size(&self) -> u64;

    /// Total in-memory image size in bytes.
    fn virtual_size(&self) -> u64;

    /// Alignment of the given view; may be 0 for malformed input.
    fn alignment(&self, view: ViewMode) -> u64;

    /// Translate an RVA into a file offset.
    fn translate_rva_to_raw(&self, rva: u64) -> std::result::Result<u64, AddressTranslationError>;

    fn entry_point_rva(&self) -> u64;

    fn section_header_table_end_rva(&self) -> u64;

    /// Size of the address space for the given view.
    fn size_for(&self, view: ViewMode) -> u64 {
        match view {
            ViewMode::Raw => self.raw_size(),
            ViewMode::Virtual => self.virtual_size(),
        }
    }
}

/// Immutable description of one loaded executable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableLayout {
    /// Total on-disk size in bytes
    pub raw_size: u64,
    /// Total in-memory image size in bytes
    pub virtual_size: u64,
    /// File alignment
    pub raw_alignment: u64,
    /// Section alignment
    pub virtual_alignment: u64,
    /// RVA of the entry point
    pub entry_point_rva: u64,
    /// RVA just past the last section header
    pub section_header_table_end_rva: u64,
    /// Section table, in table order
    #[serde(default)]
    pub sections: Vec<SectionDescriptor>,
}

impl ExecutableLayout {
    /// Create a layout without sections.
    pub fn new(raw_size: u64, virtual_size: u64, raw_alignment: u64, virtual_alignment: u64) -> Self {
        Self {
            raw_size,
            virtual_size,
            raw_alignment,
            virtual_alignment,
            ..Self::default()
        }
    }

    pub fn with_entry_point(mut self, rva: u64) -> Self {
        self.entry_point_rva = rva;
        self
    }

    pub fn with_header_table_end(mut self, rva: u64) -> Self {
        self.section_header_table_end_rva = rva;
        self
    }

    /// Append a section; its index is its table position.
    pub fn with_section(
        mut self,
        display_name: impl Into<String>,
        raw_offset: u64,
        raw_content_size: u64,
        virtual_offset: u64,
        virtual_content_size: u64,
    ) -> Self {
        let index = self.sections.len();
        self.sections.push(SectionDescriptor::new(
            index,
            display_name,
            raw_offset,
            raw_content_size,
            virtual_offset,
            virtual_content_size,
        ));
        self
    }

    /// Replace the section table, renumbering entries by position.
    pub fn with_sections(mut self, sections: Vec<SectionDescriptor>) -> Self {
        self.sections = sections;
        for (i, sec) in self.sections.iter_mut().enumerate() {
            sec.index = i;
        }
        self
    }

    /// Parse a JSON structural description.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let layout: ExecutableLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Read and parse a JSON structural description.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check table consistency.
    ///
    /// Zero alignments, overlapping sections and out-of-order sections are
    /// all legal; only a descriptor whose index disagrees with its table
    /// position is rejected.
    pub fn validate(&self) -> Result<()> {
        for (pos, sec) in self.sections.iter().enumerate() {
            if sec.index != pos {
                return Err(SecmapError::InvalidLayout(format!(
                    "section '{}' has index {} at table position {}",
                    sec.display_name, sec.index, pos
                )));
            }
        }
        Ok(())
    }

    /// Lowest RVA at which a non-empty section is mapped.
    fn first_section_rva(&self) -> Option<u64> {
        self.sections
            .iter()
            .filter(|s| s.virtual_footprint() > 0)
            .map(|s| s.virtual_offset)
            .min()
    }
}

impl LayoutProvider for ExecutableLayout {
    fn section_table(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    fn raw_size(&self) -> u64 {
        self.raw_size
    }

    fn virtual_size(&self) -> u64 {
        self.virtual_size
    }

    fn alignment(&self, view: ViewMode) -> u64 {
        match view {
            ViewMode::Raw => self.raw_alignment,
            ViewMode::Virtual => self.virtual_alignment,
        }
    }

    /// Headers below the first section map 1:1; anything else goes through
    /// the first section (table order) whose mapped footprint holds the RVA.
    fn translate_rva_to_raw(&self, rva: u64) -> std::result::Result<u64, AddressTranslationError> {
        let in_headers = self.first_section_rva().map_or(true, |first| rva < first);
        if in_headers {
            return if rva < self.raw_size {
                Ok(rva)
            } else {
                Err(AddressTranslationError::Unmapped { rva })
            };
        }

        let section = self
            .sections
            .iter()
            .find(|s| s.contains_rva(rva))
            .ok_or(AddressTranslationError::Unmapped { rva })?;

        let delta = rva - section.virtual_offset;
        if delta >= section.raw_content_size {
            return Err(AddressTranslationError::PastMappedContent {
                rva,
                section: section.index,
            });
        }

        let raw = section.raw_offset.saturating_add(delta);
        if raw >= self.raw_size {
            return Err(AddressTranslationError::OutsideFile { rva, raw });
        }
        Ok(raw)
    }

    fn entry_point_rva(&self) -> u64 {
        self.entry_point_rva
    }

    fn section_header_table_end_rva(&self) -> u64 {
        self.section_header_table_end_rva
    }
}
