//! Render-ready description of the section track.
//!
//! A `TrackSnapshot` is everything a painter needs for one view of the
//! diagram: grid rows, one band per section, the entry point and header
//! markers and the selection span. All of it is computed from a single
//! pinned layout so the parts agree with each other.

use serde::Serialize;

use crate::config::TrackConfig;
use crate::core::layout::LayoutProvider;
use crate::core::view::ViewMode;
use crate::error::Result;
use crate::model::address_space::{AddressSpaceModel, PinnedLayout};
use crate::model::selection::{SelectionRange, SelectionTracker};
use crate::track::geometry::TrackGeometry;

/// One section drawn on the track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBand {
    pub index: usize,
    /// Bracketed name, when names are shown
    pub label: Option<String>,
    /// Content offset in the view, when offsets are shown
    pub offset: Option<u64>,
    pub start_unit: f64,
    pub unit_count: u64,
    pub fill_ratio: f64,
    /// Row of the section's start line
    pub y: i64,
    /// Filled rows below `y`; 0 for sections without content
    pub height: i64,
    /// Index into the renderer's fill palette
    pub palette_slot: usize,
}

/// A horizontal marker line at an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub address: u64,
    pub unit: f64,
    pub y: i64,
}

/// The selection projected on the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionSpan {
    pub range: SelectionRange,
    pub start_unit: f64,
    pub end_unit: f64,
    pub y1: i64,
    pub y2: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSnapshot {
    pub view: ViewMode,
    pub geometry: TrackGeometry,
    pub unit_size: u64,
    pub total_units: u64,
    pub grid_lines: Vec<i64>,
    pub bands: Vec<SectionBand>,
    pub entry_point: Option<Marker>,
    pub header_end: Option<Marker>,
    pub selection: Option<SelectionSpan>,
}

impl TrackSnapshot {
    /// Capture the current state of `model` and `selection` for `view`.
    pub fn capture<P: LayoutProvider>(
        model: &AddressSpaceModel<P>,
        selection: &SelectionTracker,
        view: ViewMode,
        geometry: TrackGeometry,
        config: &TrackConfig,
    ) -> Self {
        Self::from_pinned(&model.pin(), selection, view, geometry, config)
    }

    pub fn from_pinned<P: LayoutProvider>(
        pinned: &PinnedLayout<P>,
        selection: &SelectionTracker,
        view: ViewMode,
        geometry: TrackGeometry,
        config: &TrackConfig,
    ) -> Self {
        let total_units = pinned.total_units(view);
        let mut snapshot = Self {
            view,
            geometry,
            unit_size: pinned.unit_size(view),
            total_units,
            grid_lines: Vec::new(),
            bands: Vec::new(),
            entry_point: None,
            header_end: None,
            selection: None,
        };
        if snapshot.is_empty() || !geometry.is_valid() {
            return snapshot;
        }

        if config.show_grid {
            snapshot.grid_lines = geometry.grid_lines(total_units, config.max_grid_lines);
        }

        snapshot.bands = (0..pinned.section_count())
            .filter_map(|index| band(pinned, index, view, geometry, config, total_units))
            .collect();

        if config.show_entry_point {
            snapshot.entry_point = marker(pinned, pinned.entry_point_address(view), view, geometry);
        }
        if config.show_header_end {
            snapshot.header_end =
                marker(pinned, pinned.header_table_end_address(view), view, geometry);
        }

        if config.show_selection {
            snapshot.selection = selection.units_in(view, pinned).and_then(|units| {
                let (y1, y2) =
                    geometry.selection_span(units.start_unit, units.end_unit, total_units)?;
                Some(SelectionSpan {
                    range: selection.range(),
                    start_unit: units.start_unit,
                    end_unit: units.end_unit,
                    y1,
                    y2,
                })
            });
        }

        snapshot
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.total_units == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn band<P: LayoutProvider>(
    pinned: &PinnedLayout<P>,
    index: usize,
    view: ViewMode,
    geometry: TrackGeometry,
    config: &TrackConfig,
    total_units: u64,
) -> Option<SectionBand> {
    let units = pinned.unit_range_of_section(index, view)?;
    let fill_ratio = pinned.fill_ratio(index, view);
    let y = geometry.position_y(units.start_unit, total_units)?;
    Some(SectionBand {
        index,
        label: config.show_names.then(|| pinned.section_label(index)),
        offset: if config.show_offsets {
            pinned.section_begin(index, view)
        } else {
            None
        },
        start_unit: units.start_unit,
        unit_count: units.unit_count,
        fill_ratio,
        y,
        height: geometry.band_height(units.unit_count, fill_ratio, total_units),
        palette_slot: index % config.palette_size.max(1),
    })
}

fn marker<P: LayoutProvider>(
    pinned: &PinnedLayout<P>,
    address: Option<u64>,
    view: ViewMode,
    geometry: TrackGeometry,
) -> Option<Marker> {
    let address = address?;
    let unit = pinned.unit_of_address(address, view)?;
    let y = geometry.position_y(unit, pinned.total_units(view))?;
    Some(Marker { address, unit, y })
}
