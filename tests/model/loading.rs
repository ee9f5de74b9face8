use secmap::{AddressSpaceModel, ExecutableLayout, SecmapConfig, SecmapError, ViewMode};

use crate::common::fixtures::{create_temp_file, pe_like};

#[test]
fn layout_file_round_trips_into_model() {
    let json = pe_like().to_json().unwrap();
    let file = create_temp_file(json.as_bytes());

    let layout = ExecutableLayout::from_json_file(file.path()).unwrap();
    assert_eq!(layout, pe_like());

    let model = AddressSpaceModel::with_layout(layout, &SecmapConfig::default());
    assert_eq!(model.section_count(), 3);
    assert_eq!(model.total_units(ViewMode::Virtual), 4);
}

#[test]
fn misnumbered_sections_are_rejected() {
    let mut layout = pe_like();
    layout.sections[1].index = 7;
    let file = create_temp_file(layout.to_json().unwrap().as_bytes());
    assert!(matches!(
        ExecutableLayout::from_json_file(file.path()),
        Err(SecmapError::InvalidLayout(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let file = create_temp_file(b"");
    let path = file.path().to_path_buf();
    drop(file);
    assert!(matches!(
        ExecutableLayout::from_json_file(&path),
        Err(SecmapError::Io(_))
    ));
}

#[test]
fn config_file_overrides_fallback_unit() {
    let file = create_temp_file(br#"{"units": {"fallback_unit_size": 512}}"#);
    let config = SecmapConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.selection.page_size, 0x1000);

    let layout = ExecutableLayout {
        raw_alignment: 0,
        ..pe_like()
    };
    let model = AddressSpaceModel::with_layout(layout, &config);
    assert_eq!(model.unit_size(ViewMode::Raw), 512);
    assert_eq!(model.total_units(ViewMode::Raw), 18);
}

#[test]
fn garbage_config_is_serialization_error() {
    let file = create_temp_file(b"{not json");
    assert!(matches!(
        SecmapConfig::from_json_file(file.path()),
        Err(SecmapError::Serialization(_))
    ));
}
