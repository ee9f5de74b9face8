//! Pointer interaction on the track: hover lookups and click selection.

use serde::Serialize;
use tracing::trace;

use crate::core::layout::LayoutProvider;
use crate::core::view::ViewMode;
use crate::model::address_space::AddressSpaceModel;
use crate::model::selection::SelectionTracker;
use crate::track::geometry::TrackGeometry;

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverInfo {
    pub unit: u64,
    /// Address at the start of the unit, in the hovered view
    pub address: u64,
    /// Bracketed label of the section owning the unit
    pub section: Option<String>,
}

impl HoverInfo {
    /// Tooltip text: lowercase hex address, then the section label if any.
    pub fn tooltip(&self) -> String {
        match &self.section {
            Some(label) => format!("{:x}\n{}", self.address, label),
            None => format!("{:x}", self.address),
        }
    }
}

/// Look up the unit and section under row `pos_y`.
pub fn hover<P: LayoutProvider>(
    pos_y: i64,
    view: ViewMode,
    geometry: TrackGeometry,
    model: &AddressSpaceModel<P>,
) -> Option<HoverInfo> {
    let pinned = model.pin();
    let unit = geometry.unit_at(pos_y, pinned.total_units(view))?;
    Some(HoverInfo {
        unit,
        address: pinned.unit_to_address_approx(unit, view),
        section: pinned.section_at(unit, view).map(|s| s.label()),
    })
}

/// Select one page starting at the unit under row `pos_y`.
///
/// The unit index is turned into an address with the raw unit size in
/// either view, since selections live in the raw address space. Returns the
/// address the selection now starts at, or `None` if the click missed the
/// track or landed past the end of the file.
pub fn click<P: LayoutProvider>(
    pos_y: i64,
    view: ViewMode,
    geometry: TrackGeometry,
    model: &AddressSpaceModel<P>,
    selection: &mut SelectionTracker,
) -> Option<u64> {
    let pinned = model.pin();
    let Some(unit) = geometry.unit_at(pos_y, pinned.total_units(view)) else {
        trace!(pos_y, %view, "click outside track");
        return None;
    };
    // `unit` indexes `view`, so it may run past the raw unit count; the
    // resulting address is then rejected as outside the file.
    let address = unit.saturating_mul(pinned.unit_size(ViewMode::Raw));
    selection
        .set_start_from_address(address, model)
        .then_some(address)
}
