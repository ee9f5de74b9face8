//! Python wrapper around a model and its selection.

use pyo3::prelude::*;

use crate::config::SecmapConfig;
use crate::core::layout::ExecutableLayout;
use crate::core::section::SectionDescriptor;
use crate::core::view::ViewMode;
use crate::model::{unit_or_sentinel, AddressSpaceModel, SelectionTracker};
use crate::track::{TrackGeometry, TrackSnapshot};

/// Register model bindings.
pub fn register_model_bindings(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySectionMap>()?;
    Ok(())
}

/// Address-space model plus selection, driven from Python.
#[pyclass(name = "SectionMap")]
pub struct PySectionMap {
    config: SecmapConfig,
    model: AddressSpaceModel,
    selection: SelectionTracker,
}

#[pymethods]
impl PySectionMap {
    /// Create an unloaded map.
    ///
    /// Args:
    ///     config_json: Optional JSON configuration (str)
    ///
    /// Raises:
    ///     ValueError: If the configuration is invalid
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => SecmapConfig::from_json_str(json)?,
            None => SecmapConfig::default(),
        };
        Ok(Self {
            model: AddressSpaceModel::new(&config),
            selection: SelectionTracker::new(&config),
            config,
        })
    }

    /// Publish a layout given as JSON.
    fn load_json(&self, json: &str) -> PyResult<()> {
        self.model.load(ExecutableLayout::from_json_str(json)?);
        Ok(())
    }

    /// Publish a layout read from a JSON file.
    fn load_file(&self, path: &str) -> PyResult<()> {
        self.model.load(ExecutableLayout::from_json_file(path)?);
        Ok(())
    }

    fn clear(&self) {
        self.model.clear();
    }

    fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    fn unit_size(&self, view: ViewMode) -> u64 {
        self.model.unit_size(view)
    }

    fn total_units(&self, view: ViewMode) -> u64 {
        self.model.total_units(view)
    }

    fn unit_of_address(&self, address: u64, view: ViewMode) -> f64 {
        unit_or_sentinel(self.model.unit_of_address(address, view))
    }

    fn unit_to_address_approx(&self, unit: u64, view: ViewMode) -> u64 {
        self.model.unit_to_address_approx(unit, view)
    }

    fn section_count(&self) -> usize {
        self.model.section_count()
    }

    fn section_at(&self, unit: u64, view: ViewMode) -> Option<SectionDescriptor> {
        self.model.section_at(unit, view)
    }

    /// Returns (start_unit, unit_count) or None.
    fn unit_range_of_section(&self, index: usize, view: ViewMode) -> Option<(f64, u64)> {
        self.model
            .unit_range_of_section(index, view)
            .map(|u| (u.start_unit, u.unit_count))
    }

    fn fill_ratio(&self, index: usize, view: ViewMode) -> f64 {
        self.model.fill_ratio(index, view)
    }

    fn unit_of_entry_point(&self, view: ViewMode) -> f64 {
        unit_or_sentinel(self.model.unit_of_entry_point(view))
    }

    fn unit_of_header_table_end(&self, view: ViewMode) -> f64 {
        unit_or_sentinel(self.model.unit_of_header_table_end(view))
    }

    fn set_range(&mut self, start: u64, end: u64) {
        self.selection.set_range(start, end);
    }

    fn set_page_size(&mut self, page_size: u64) {
        self.selection.set_page_size(page_size);
    }

    fn set_start_from_address(&mut self, address: u64) -> bool {
        self.selection.set_start_from_address(address, &self.model)
    }

    /// Current selection as (start, end).
    fn selection(&self) -> (u64, u64) {
        let range = self.selection.range();
        (range.start, range.end)
    }

    fn selection_units(&self, view: ViewMode) -> Option<(f64, f64)> {
        self.selection
            .as_units(view, &self.model)
            .map(|u| (u.start_unit, u.end_unit))
    }

    /// Describe the track for `view` on a track of `height` rows as JSON.
    #[pyo3(signature = (view, height, top=0))]
    fn snapshot_json(&self, view: ViewMode, height: i64, top: i64) -> PyResult<String> {
        let snapshot = TrackSnapshot::capture(
            &self.model,
            &self.selection,
            view,
            TrackGeometry::new(top, height),
            &self.config.track,
        );
        Ok(snapshot.to_json()?)
    }
}
