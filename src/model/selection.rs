//! Selected byte range, tracked in raw (file offset) terms.
//!
//! The range is independent of the active view; it is translated into the
//! unit space of whichever view is being drawn on demand. The all-zero
//! range doubles as "nothing selected", so an empty selection at offset 0
//! cannot be told apart from no selection at all.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::SecmapConfig;
use crate::core::layout::LayoutProvider;
use crate::core::view::ViewMode;
use crate::model::address_space::{AddressSpaceModel, PinnedLayout};
use crate::model::notify::{ChangeEvent, ChangeNotifier, Subscription};

/// Half-open byte range `[start, end)` in the raw address space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: u64,
    pub end: u64,
}

impl SelectionRange {
    /// The reserved "no selection" value.
    pub const UNSET: SelectionRange = SelectionRange { start: 0, end: 0 };

    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    /// Selected byte count; a reversed range counts as empty.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.start && address < self.end
    }
}

/// A selection translated into the unit space of one view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionUnits {
    pub start_unit: f64,
    pub end_unit: f64,
}

/// Owns the selected range and the host's page granularity.
#[derive(Debug)]
pub struct SelectionTracker {
    range: SelectionRange,
    page_size: u64,
    notifier: ChangeNotifier,
}

impl SelectionTracker {
    /// Start with nothing selected.
    pub fn new(config: &SecmapConfig) -> Self {
        Self {
            range: SelectionRange::UNSET,
            page_size: config.selection.page_size,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Start with the page the host currently displays selected.
    pub fn with_page(page_start: u64, config: &SecmapConfig) -> Self {
        let mut tracker = Self::new(config);
        tracker.range = SelectionRange::new(
            page_start,
            page_start.saturating_add(tracker.page_size),
        );
        tracker
    }

    pub fn range(&self) -> SelectionRange {
        self.range
    }

    pub fn is_unset(&self) -> bool {
        self.range.is_unset()
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Change the page granularity used by [`Self::set_start_from_address`].
    /// The current range is left alone.
    pub fn set_page_size(&mut self, page_size: u64) {
        if self.page_size == page_size {
            return;
        }
        self.page_size = page_size;
        self.notifier.notify(ChangeEvent::PageSizeChanged(page_size));
    }

    /// Replace the range as given.
    ///
    /// Bounds are not reordered: a reversed pair is stored as-is and reads
    /// back as an empty range.
    pub fn set_range(&mut self, start: u64, end: u64) {
        self.range = SelectionRange::new(start, end);
        debug!(start, end, "selection changed");
        self.notifier.notify(ChangeEvent::SelectionChanged(self.range));
    }

    /// Select one page starting at `address`.
    ///
    /// Does nothing (and returns `false`) when no layout is loaded or
    /// `address` is outside `[0, raw_size)`.
    pub fn set_start_from_address<P: LayoutProvider>(
        &mut self,
        address: u64,
        model: &AddressSpaceModel<P>,
    ) -> bool {
        let Some(layout) = model.layout() else {
            trace!(address, "selection ignored: no layout");
            return false;
        };
        if address >= layout.raw_size() {
            trace!(address, raw_size = layout.raw_size(), "selection ignored: outside file");
            return false;
        }
        self.set_range(address, address.saturating_add(self.page_size));
        true
    }

    /// The selection in unit coordinates of `view`.
    ///
    /// Absent when nothing is selected (the all-zero range) or the model
    /// cannot place addresses. The raw offsets are divided by the unit size
    /// of `view` as they are; no RAW to RVA translation is applied.
    pub fn as_units<P: LayoutProvider>(
        &self,
        view: ViewMode,
        model: &AddressSpaceModel<P>,
    ) -> Option<SelectionUnits> {
        self.units_in(view, &model.pin())
    }

    /// [`Self::as_units`] against an already pinned layout.
    pub fn units_in<P: LayoutProvider>(
        &self,
        view: ViewMode,
        pinned: &PinnedLayout<P>,
    ) -> Option<SelectionUnits> {
        if self.range.is_unset() {
            return None;
        }
        let (start_unit, end_unit) = pinned.unit_span(self.range.start, self.range.end, view)?;
        Some(SelectionUnits {
            start_unit,
            end_unit,
        })
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }
}
