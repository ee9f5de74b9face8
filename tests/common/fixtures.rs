//! Shared layouts and file helpers for integration tests.

use secmap::{ExecutableLayout, SecmapConfig};
use std::io::Write;
use tempfile::NamedTempFile;

/// A small PE-like image with an entry point in `.text`.
pub fn pe_like() -> ExecutableLayout {
    ExecutableLayout::new(0x2400, 0x4000, 0x200, 0x1000)
        .with_entry_point(0x1010)
        .with_header_table_end(0x1f8)
        .with_section(".text", 0x400, 0x1000, 0x1000, 0xff0)
        .with_section(".data", 0x1400, 0x200, 0x2000, 0x800)
        .with_section(".rsrc", 0x1600, 0xe00, 0x3000, 0xe00)
}

/// Same image with both alignments zeroed, as found in malformed headers.
pub fn zero_aligned() -> ExecutableLayout {
    ExecutableLayout {
        raw_alignment: 0,
        virtual_alignment: 0,
        ..pe_like()
    }
}

pub fn config() -> SecmapConfig {
    SecmapConfig::default()
}

/// Creates a temporary file with the given content.
///
/// The file is removed when the returned `NamedTempFile` is dropped.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}
