use secmap::model::{ceil_div, unit_or_sentinel, UNIT_NOT_VISIBLE};
use secmap::{
    AddressSpaceModel, ExecutableLayout, LayoutProvider, SelectionTracker, SelectionUnits,
    ViewMode,
};

use crate::common::fixtures::{config, pe_like, zero_aligned};

fn loaded(layout: ExecutableLayout) -> AddressSpaceModel {
    AddressSpaceModel::with_layout(layout, &config())
}

#[test]
fn two_page_file_has_two_raw_units() {
    let m = loaded(ExecutableLayout::new(0x2000, 0x2000, 0x1000, 0x1000));
    assert_eq!(m.total_units(ViewMode::Raw), 2);
}

#[test]
fn total_units_is_ceil_of_size_over_unit() {
    for layout in [pe_like(), zero_aligned()] {
        let m = loaded(layout.clone());
        for view in ViewMode::ALL {
            let unit = m.unit_size(view);
            assert!(unit > 0);
            assert_eq!(m.total_units(view), ceil_div(layout.size_for(view), unit));
        }
    }
}

#[test]
fn zero_alignment_uses_page_units() {
    let m = loaded(zero_aligned());
    assert_eq!(m.unit_size(ViewMode::Raw), 0x1000);
    assert_eq!(m.total_units(ViewMode::Raw), 3);
    // .text starts at 0x400 -> a quarter into unit 0
    assert_eq!(
        m.unit_range_of_section(0, ViewMode::Raw).map(|u| u.start_unit),
        Some(0.25)
    );
}

#[test]
fn half_filled_section() {
    let m = loaded(
        ExecutableLayout::new(0x3000, 0x3000, 0x1000, 0x1000)
            .with_section(".text", 0x1000, 0x800, 0x1000, 0x800),
    );
    let units = m.unit_range_of_section(0, ViewMode::Raw).unwrap();
    assert_eq!(units.start_unit, 1.0);
    assert_eq!(units.unit_count, 1);
    assert_eq!(m.fill_ratio(0, ViewMode::Raw), 0.5);
}

#[test]
fn overlapping_sections_resolve_to_lowest_index() {
    let mut layout = ExecutableLayout::new(0x8000, 0x8000, 0x1000, 0x1000);
    for i in 0..6u64 {
        // Sections 2 and 5 both cover unit 3; the others sit elsewhere.
        let (offset, size) = match i {
            2 => (0x2000, 0x2000),
            5 => (0x3000, 0x1000),
            _ => (0x5000 + i * 0x100, 0x80),
        };
        layout = layout.with_section(format!("s{i}"), offset, size, offset, size);
    }
    let m = loaded(layout);
    assert_eq!(m.section_at(3, ViewMode::Raw).map(|s| s.index), Some(2));
    assert_eq!(m.section_at(3, ViewMode::Virtual).map(|s| s.index), Some(2));
}

#[test]
fn entry_point_outside_sections_is_not_visible_in_raw() {
    let m = loaded(pe_like().with_entry_point(0x9000));
    assert_eq!(m.unit_of_entry_point(ViewMode::Raw), None);
    assert_eq!(
        unit_or_sentinel(m.unit_of_entry_point(ViewMode::Raw)),
        UNIT_NOT_VISIBLE
    );
}

#[test]
fn entry_point_translates_when_mapped() {
    let m = loaded(pe_like());
    let unit = m.unit_of_entry_point(ViewMode::Raw).unwrap();
    assert!(unit >= 0.0);
    let raw = m.layout().unwrap().translate_rva_to_raw(0x1010).unwrap();
    assert_eq!(unit, raw as f64 / 0x200 as f64);
}

#[test]
fn unset_selection_is_distinct_from_zero_based_page() {
    let m = loaded(pe_like());
    let mut selection = SelectionTracker::new(&config());

    selection.set_range(0, 0);
    assert_eq!(selection.as_units(ViewMode::Raw, &m), None);

    selection.set_range(0, 0x1000);
    assert_eq!(
        selection.as_units(ViewMode::Raw, &m),
        Some(SelectionUnits {
            start_unit: 0.0,
            end_unit: 8.0
        })
    );
}

#[test]
fn approximate_inverse_stays_in_unit() {
    let m = loaded(pe_like());
    for view in ViewMode::ALL {
        let size = m.layout().unwrap().size_for(view);
        for address in (0..size).step_by(0x33) {
            let unit = m.unit_of_address(address, view).unwrap().floor() as u64;
            assert!(m.unit_to_address_approx(unit, view) <= address);
            assert!(address < m.unit_to_address_approx(unit + 1, view));
        }
    }
}

#[test]
fn section_lookups_out_of_bounds_are_absent() {
    let m = loaded(pe_like());
    assert_eq!(m.unit_range_of_section(3, ViewMode::Raw), None);
    assert_eq!(m.fill_ratio(usize::MAX, ViewMode::Virtual), 0.0);
    assert_eq!(m.section_at(m.total_units(ViewMode::Raw) + 1, ViewMode::Raw), None);
    assert_eq!(m.section_begin(7, ViewMode::Raw), None);
}

#[test]
fn click_selects_page_via_model_lookup() {
    let m = loaded(pe_like());
    let mut selection = SelectionTracker::new(&config());
    let unit = m.section_index_at_unit(0xb, ViewMode::Raw);
    assert_eq!(unit, Some(2));
    let address = m.unit_to_address_approx(0xb, ViewMode::Raw);
    assert!(selection.set_start_from_address(address, &m));
    assert_eq!(selection.range().start, 0x1600);
    assert_eq!(selection.range().end, 0x2600);
}
