//! Core data types for the secmap layout model.
//!
//! This module contains the read-only structural description the model is
//! built on: the view selector, section descriptors, and the executable
//! layout together with the provider trait that supplies it.

pub mod layout;
pub mod section;
pub mod view;

pub use layout::{ExecutableLayout, LayoutProvider};
pub use section::SectionDescriptor;
pub use view::ViewMode;
