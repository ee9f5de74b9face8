//! Track diagram support: pixel geometry, snapshots and pointer handling.
//!
//! No painting happens here. The types describe where things go on a
//! vertical track of a given height so any renderer can draw them.

pub mod geometry;
pub mod interaction;
pub mod snapshot;

pub use geometry::TrackGeometry;
pub use interaction::{click, hover, HoverInfo};
pub use snapshot::{Marker, SectionBand, SelectionSpan, TrackSnapshot};
