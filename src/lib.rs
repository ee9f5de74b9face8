//! Address-space quantization and lookup for executable section diagrams.
//!
//! An executable's raw (on-disk) and virtual (in-memory) address spaces are
//! cut into fixed-size units so the layout can be drawn as a linear track.
//! The crate answers lookups between byte addresses, unit positions and
//! sections for either view, tracks a selected byte range, and describes the
//! resulting track geometry for a renderer.

/// Configuration
pub mod config;
/// Core data types module
pub mod core;
pub mod error;
pub mod logging;
/// Address-space model and selection
pub mod model;
pub mod track;

#[cfg(feature = "python-ext")]
pub mod python_bindings;

pub use crate::config::SecmapConfig;
pub use crate::core::{ExecutableLayout, LayoutProvider, SectionDescriptor, ViewMode};
pub use crate::error::{AddressTranslationError, Result, SecmapError};
pub use crate::model::{
    AddressSpaceModel, ChangeEvent, SectionUnits, SelectionRange, SelectionTracker,
    SelectionUnits, Subscription,
};
pub use crate::track::{TrackGeometry, TrackSnapshot};
