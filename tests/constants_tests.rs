//! Tests for constants module.
//!
//! Validates run level bounds and the well-known coordinates.

use osgi_runtime::*;

// =============================================================================
// Run Level Tests
// =============================================================================

#[test]
fn test_run_level_bounds() {
    assert_eq!(MIN_RUN_LEVEL, 1);
    assert_eq!(MAX_RUN_LEVEL, 120);
}

#[test]
fn test_default_run_level_in_range() {
    assert_eq!(DEFAULT_RUN_LEVEL, 70);
    assert!((MIN_RUN_LEVEL..=MAX_RUN_LEVEL).contains(&DEFAULT_RUN_LEVEL));
}

#[test]
fn test_default_run_level_after_catalog() {
    // Unleveled bundles start after every framework service in the catalog
    let highest = bundles_for(&Feature::ALL)
        .iter()
        .map(|b| b.run_level())
        .max()
        .unwrap();
    assert!(DEFAULT_RUN_LEVEL > highest);
}

// =============================================================================
// Coordinate Tests
// =============================================================================

#[test]
fn test_framework_coordinates_parse() {
    for spec in [OSGI_CORE, OSGI_COMPENDIUM] {
        let parts = ArtifactCoordinate::new(spec).parse().unwrap();
        assert_eq!(parts.group, "org.apache.felix");
        assert_eq!(parts.packaging, BUNDLE_PACKAGING);
        assert_eq!(parts.version, "1.4.0");
    }
}

#[test]
fn test_coordinate_chars_exclude_separators() {
    assert!(!COORDINATE_VALID_CHARS.contains('/'));
    assert!(!COORDINATE_VALID_CHARS.contains('\\'));
}

#[test]
fn test_coordinate_length_reasonable() {
    assert!(MAX_COORDINATE_LEN >= 256, "coordinate limit too restrictive");
    assert!(MAX_COORDINATE_LEN <= 1024, "coordinate limit too permissive");
}
