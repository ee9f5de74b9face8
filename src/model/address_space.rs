//! Address-space quantization over a structural description.
//!
//! The model cuts the raw or virtual address space of an executable into
//! fixed-size units (one unit per track row) and answers lookups in both
//! directions: address to fractional unit position, unit to section, and
//! unit back to an approximate address.
//!
//! Nothing here is cached. Every query reads the currently published layout
//! once and derives its answer from that value, so a replaced layout is
//! picked up by the next query without any invalidation step.

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::SecmapConfig;
use crate::core::layout::{ExecutableLayout, LayoutProvider};
use crate::core::section::SectionDescriptor;
use crate::core::view::ViewMode;
use crate::model::notify::{ChangeEvent, ChangeNotifier, Subscription};

/// Numeric form of an absent unit position, for flat-number consumers.
pub const UNIT_NOT_VISIBLE: f64 = -1.0;

/// Flatten an optional unit position into the `-1.0` sentinel form.
pub fn unit_or_sentinel(unit: Option<f64>) -> f64 {
    unit.unwrap_or(UNIT_NOT_VISIBLE)
}

/// Integer division rounding up. Returns 0 for a zero divisor.
pub fn ceil_div(value: u64, divisor: u64) -> u64 {
    if divisor == 0 {
        return 0;
    }
    value / divisor + u64::from(value % divisor != 0)
}

/// Placement of one section on the unit track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionUnits {
    /// Fractional unit where the section content begins
    pub start_unit: f64,
    /// Whole units covered by the content, rounded up
    pub unit_count: u64,
}

/// Queries answered against one pinned layout value.
///
/// Obtained from [`AddressSpaceModel::pin`]; a pinned view keeps answering
/// from the same layout even if the model publishes a replacement meanwhile.
#[derive(Debug, Clone)]
pub struct PinnedLayout<P = ExecutableLayout> {
    layout: Option<Arc<P>>,
    fallback_unit_size: u64,
}

impl<P: LayoutProvider> PinnedLayout<P> {
    /// The pinned layout, if one was published when pinning.
    pub fn layout(&self) -> Option<&P> {
        self.layout.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.layout.is_some()
    }

    /// Unit size of the view. Never 0: a zero (or missing) alignment falls
    /// back to the configured page-sized unit.
    pub fn unit_size(&self, view: ViewMode) -> u64 {
        match self.layout.as_deref().map(|l| l.alignment(view)) {
            Some(alignment) if alignment > 0 => alignment,
            _ => self.fallback_unit_size,
        }
    }

    /// Number of units covering the view; 0 when unloaded or empty.
    pub fn total_units(&self, view: ViewMode) -> u64 {
        match self.layout.as_deref() {
            Some(layout) => ceil_div(layout.size_for(view), self.unit_size(view)),
            None => 0,
        }
    }

    /// Fractional unit position of `address`.
    ///
    /// Absent when no layout is loaded or the view has no units.
    pub fn unit_of_address(&self, address: u64, view: ViewMode) -> Option<f64> {
        if self.total_units(view) == 0 {
            return None;
        }
        let unit_size = self.unit_size(view);
        if unit_size == 0 {
            return None;
        }
        Some(address as f64 / unit_size as f64)
    }

    /// Address at the start of `unit_index`.
    ///
    /// This is only an approximate inverse of [`Self::unit_of_address`]:
    /// `address -> unit -> address'` lands on the unit boundary, so
    /// `address'` is in the same unit as `address` but not generally equal.
    ///
    /// Returns 0 when the view has no units or `unit_index` lies past
    /// `total_units(view)`. The end boundary `unit_index == total_units`
    /// itself is valid.
    pub fn unit_to_address_approx(&self, unit_index: u64, view: ViewMode) -> u64 {
        let total = self.total_units(view);
        if total == 0 || unit_index > total {
            return 0;
        }
        unit_index.saturating_mul(self.unit_size(view))
    }

    /// Number of section table entries; 0 when unloaded.
    pub fn section_count(&self) -> usize {
        self.layout
            .as_deref()
            .map_or(0, |l| l.section_table().len())
    }

    /// Section table entry at `index`.
    pub fn section(&self, index: usize) -> Option<&SectionDescriptor> {
        self.layout.as_deref()?.section_table().get(index)
    }

    /// Table position of the first section whose unit-rounded content
    /// covers `unit_index`.
    ///
    /// Overlaps resolve to the lowest table index; the table is scanned in
    /// order and never re-sorted by address.
    pub fn section_index_at_unit(&self, unit_index: u64, view: ViewMode) -> Option<usize> {
        let layout = self.layout.as_deref()?;
        let total = self.total_units(view);
        if total == 0 || unit_index > total {
            return None;
        }
        let unit_size = self.unit_size(view);
        let address = unit_index.checked_mul(unit_size)?;

        layout.section_table().iter().position(|sec| {
            let start = sec.content_offset(view);
            let span = ceil_div(sec.content_size(view), unit_size).saturating_mul(unit_size);
            address >= start && address - start < span
        })
    }

    /// Section owning `unit_index`, first match in table order.
    pub fn section_at(&self, unit_index: u64, view: ViewMode) -> Option<&SectionDescriptor> {
        let index = self.section_index_at_unit(unit_index, view)?;
        self.section(index)
    }

    /// Whole units needed for a section's content; 0 when absent or when
    /// the view has no units.
    pub fn units_of_section(&self, index: usize, view: ViewMode) -> u64 {
        if self.total_units(view) == 0 {
            return 0;
        }
        match self.section(index) {
            Some(sec) => ceil_div(sec.content_size(view), self.unit_size(view)),
            None => 0,
        }
    }

    /// Fractional start unit and whole unit count of a section.
    ///
    /// Absent for an out-of-range index or a view without units.
    pub fn unit_range_of_section(&self, index: usize, view: ViewMode) -> Option<SectionUnits> {
        let sec = self.section(index)?;
        let start_unit = self.unit_of_address(sec.content_offset(view), view)?;
        Some(SectionUnits {
            start_unit,
            unit_count: self.units_of_section(index, view),
        })
    }

    /// Share of the unit-rounded footprint the content actually occupies.
    ///
    /// In `[0, 1]`; exactly 0 when the section is absent, its rounded
    /// footprint is empty or the view has no units.
    pub fn fill_ratio(&self, index: usize, view: ViewMode) -> f64 {
        let Some(sec) = self.section(index) else {
            return 0.0;
        };
        let rounded = self
            .units_of_section(index, view)
            .saturating_mul(self.unit_size(view));
        if rounded == 0 {
            return 0.0;
        }
        (sec.content_size(view) as f64 / rounded as f64).min(1.0)
    }

    /// Content offset of a section in the given view.
    pub fn section_begin(&self, index: usize, view: ViewMode) -> Option<u64> {
        self.section(index).map(|sec| sec.content_offset(view))
    }

    /// Bracketed section name, or an empty string for an absent index.
    pub fn section_label(&self, index: usize) -> String {
        self.section(index).map(|s| s.label()).unwrap_or_default()
    }

    /// Express an RVA in the given view, translating to RAW when needed.
    pub fn rva_in_view(&self, rva: u64, view: ViewMode) -> Option<u64> {
        let layout = self.layout.as_deref()?;
        match view {
            ViewMode::Virtual => Some(rva),
            ViewMode::Raw => match layout.translate_rva_to_raw(rva) {
                Ok(raw) => Some(raw),
                Err(err) => {
                    trace!(rva, error = %err, "RVA has no raw counterpart");
                    None
                }
            },
        }
    }

    /// Entry point as an RVA, or as a file offset in the raw view.
    pub fn entry_point_address(&self, view: ViewMode) -> Option<u64> {
        let rva = self.layout.as_deref()?.entry_point_rva();
        self.rva_in_view(rva, view)
    }

    /// Unit position of the entry point; absent when it cannot be expressed
    /// in the view (e.g. no raw counterpart).
    pub fn unit_of_entry_point(&self, view: ViewMode) -> Option<f64> {
        let address = self.entry_point_address(view)?;
        self.unit_of_address(address, view)
    }

    /// End of the section header table, translated like the entry point.
    pub fn header_table_end_address(&self, view: ViewMode) -> Option<u64> {
        let rva = self.layout.as_deref()?.section_header_table_end_rva();
        self.rva_in_view(rva, view)
    }

    /// Unit position of the header table end; absent when untranslatable.
    pub fn unit_of_header_table_end(&self, view: ViewMode) -> Option<f64> {
        let address = self.header_table_end_address(view)?;
        self.unit_of_address(address, view)
    }

    /// Unit positions of both bounds of a byte range.
    pub fn unit_span(&self, start: u64, end: u64, view: ViewMode) -> Option<(f64, f64)> {
        Some((
            self.unit_of_address(start, view)?,
            self.unit_of_address(end, view)?,
        ))
    }
}

/// Publishes the current layout and answers unit queries against it.
pub struct AddressSpaceModel<P = ExecutableLayout> {
    layout: ArcSwapOption<P>,
    fallback_unit_size: u64,
    notifier: ChangeNotifier,
}

impl<P: LayoutProvider> AddressSpaceModel<P> {
    /// Create an unloaded model.
    pub fn new(config: &SecmapConfig) -> Self {
        Self {
            layout: ArcSwapOption::empty(),
            fallback_unit_size: config.units.fallback_unit_size.max(1),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Create a model with `layout` already published.
    pub fn with_layout(layout: P, config: &SecmapConfig) -> Self {
        let model = Self::new(config);
        model.layout.store(Some(Arc::new(layout)));
        model
    }

    /// Publish a new layout, replacing the previous one wholesale.
    pub fn load(&self, layout: P) {
        self.load_shared(Arc::new(layout));
    }

    /// Publish an already shared layout.
    pub fn load_shared(&self, layout: Arc<P>) {
        debug!(
            sections = layout.section_table().len(),
            raw_size = layout.raw_size(),
            virtual_size = layout.virtual_size(),
            "layout replaced"
        );
        self.layout.store(Some(layout));
        self.notifier.notify(ChangeEvent::LayoutReplaced);
    }

    /// Drop the current layout.
    pub fn clear(&self) {
        if self.layout.swap(None).is_some() {
            debug!("layout cleared");
            self.notifier.notify(ChangeEvent::LayoutCleared);
        }
    }

    /// The currently published layout.
    pub fn layout(&self) -> Option<Arc<P>> {
        self.layout.load_full()
    }

    pub fn is_loaded(&self) -> bool {
        self.layout.load().is_some()
    }

    /// Pin the current layout for a sequence of consistent queries.
    pub fn pin(&self) -> PinnedLayout<P> {
        PinnedLayout {
            layout: self.layout.load_full(),
            fallback_unit_size: self.fallback_unit_size,
        }
    }

    /// Register a callback run after every layout replacement or clear.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    /// Bytes per unit in `view`; never 0.
    pub fn unit_size(&self, view: ViewMode) -> u64 {
        self.pin().unit_size(view)
    }

    /// Units covering `view`; 0 when unloaded or empty.
    pub fn total_units(&self, view: ViewMode) -> u64 {
        self.pin().total_units(view)
    }

    /// Fractional unit position of `address`.
    pub fn unit_of_address(&self, address: u64, view: ViewMode) -> Option<f64> {
        self.pin().unit_of_address(address, view)
    }

    /// See [`PinnedLayout::unit_to_address_approx`] for the rounding caveat
    /// and the out-of-range result.
    pub fn unit_to_address_approx(&self, unit_index: u64, view: ViewMode) -> u64 {
        self.pin().unit_to_address_approx(unit_index, view)
    }

    pub fn section_count(&self) -> usize {
        self.pin().section_count()
    }

    /// Clone of the section table entry at `index`.
    pub fn section(&self, index: usize) -> Option<SectionDescriptor> {
        self.pin().section(index).cloned()
    }

    /// Section owning `unit_index`; the lowest table index wins on overlap.
    pub fn section_at(&self, unit_index: u64, view: ViewMode) -> Option<SectionDescriptor> {
        self.pin().section_at(unit_index, view).cloned()
    }

    pub fn section_index_at_unit(&self, unit_index: u64, view: ViewMode) -> Option<usize> {
        self.pin().section_index_at_unit(unit_index, view)
    }

    /// Placement of a section on the unit track.
    pub fn unit_range_of_section(&self, index: usize, view: ViewMode) -> Option<SectionUnits> {
        self.pin().unit_range_of_section(index, view)
    }

    /// Share of the rounded footprint the content occupies, in `[0, 1]`.
    pub fn fill_ratio(&self, index: usize, view: ViewMode) -> f64 {
        self.pin().fill_ratio(index, view)
    }

    pub fn section_begin(&self, index: usize, view: ViewMode) -> Option<u64> {
        self.pin().section_begin(index, view)
    }

    pub fn section_label(&self, index: usize) -> String {
        self.pin().section_label(index)
    }

    pub fn entry_point_address(&self, view: ViewMode) -> Option<u64> {
        self.pin().entry_point_address(view)
    }

    /// Unit position of the entry point; absent when not visible in `view`.
    pub fn unit_of_entry_point(&self, view: ViewMode) -> Option<f64> {
        self.pin().unit_of_entry_point(view)
    }

    pub fn header_table_end_address(&self, view: ViewMode) -> Option<u64> {
        self.pin().header_table_end_address(view)
    }

    /// Unit position of the header table end; absent when not visible.
    pub fn unit_of_header_table_end(&self, view: ViewMode) -> Option<f64> {
        self.pin().unit_of_header_table_end(view)
    }
}

impl<P> std::fmt::Debug for AddressSpaceModel<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSpaceModel")
            .field("loaded", &self.layout.load().is_some())
            .field("fallback_unit_size", &self.fallback_unit_size)
            .field("notifier", &self.notifier)
            .finish()
    }
}
