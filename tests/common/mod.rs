//! Common test fixtures and helpers.
//!
//! Layouts here mimic small PE images: a header page, a few sections with
//! file alignment 0x200 and section alignment 0x1000.

pub mod fixtures;
