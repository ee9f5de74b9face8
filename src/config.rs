//! Configuration for the layout model and the track diagram.
//!
//! Provides centralized configuration with defaults matching the classic
//! section diagram: page-sized units, one page per click, entry point and
//! header markers on, grid off.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SecmapError};

/// Standard memory-page granularity.
pub const PAGE_SIZE: u64 = 0x1000;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecmapConfig {
    /// Unit quantization settings.
    pub units: UnitConfig,
    /// Selection tracking settings.
    pub selection: SelectionConfig,
    /// Diagram snapshot settings.
    pub track: TrackConfig,
}

impl SecmapConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SecmapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the model cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.units.fallback_unit_size == 0 {
            return Err(SecmapError::InvalidConfig(
                "units.fallback_unit_size must be non-zero".to_string(),
            ));
        }
        if self.track.palette_size == 0 {
            return Err(SecmapError::InvalidConfig(
                "track.palette_size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unit quantization configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Unit size used when a view's alignment is zero.
    pub fallback_unit_size: u64,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            fallback_unit_size: PAGE_SIZE,
        }
    }
}

/// Selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Host page granularity; one click selects this many bytes.
    pub page_size: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

/// Diagram snapshot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Emit one grid line per unit.
    pub show_grid: bool,
    /// Emit the entry point marker.
    pub show_entry_point: bool,
    /// Emit the end-of-section-headers marker.
    pub show_header_end: bool,
    /// Emit the selection span.
    pub show_selection: bool,
    /// Carry section offsets in the snapshot bands.
    pub show_offsets: bool,
    /// Carry section labels in the snapshot bands.
    pub show_names: bool,
    /// Upper bound on emitted grid lines.
    pub max_grid_lines: usize,
    /// Number of distinct fill colors sections cycle through.
    pub palette_size: usize,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            show_grid: false,
            show_entry_point: true,
            show_header_end: true,
            show_selection: true,
            show_offsets: true,
            show_names: true,
            max_grid_lines: 1000,
            palette_size: 5,
        }
    }
}
