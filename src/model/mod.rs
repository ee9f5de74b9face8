//! Query model over a published executable layout.
//!
//! `AddressSpaceModel` quantizes the raw and virtual address spaces into
//! units; `SelectionTracker` owns the selected byte range. Both announce
//! their mutations through a [`notify::ChangeNotifier`].

pub mod address_space;
pub mod notify;
pub mod selection;

pub use address_space::{
    ceil_div, unit_or_sentinel, AddressSpaceModel, PinnedLayout, SectionUnits, UNIT_NOT_VISIBLE,
};
pub use notify::{ChangeEvent, ChangeNotifier, Subscription};
pub use selection::{SelectionRange, SelectionTracker, SelectionUnits};
