//! Tests for bundle descriptors.
//!
//! Validates construction, lenient run levels, and install path derivation
//! through a stub resolver.

use osgi_runtime::{
    ArtifactCoordinate, ArtifactResolver, Bundle, DEFAULT_RUN_LEVEL, Error, InMemoryResolver,
    ResolvedArtifact, Result,
};
use std::path::PathBuf;

/// Resolver that always fails the way an unreachable repository would.
struct FailingResolver;

impl ArtifactResolver for FailingResolver {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        Err(Error::ResolutionFailed {
            coordinate: coordinate.to_string(),
            reason: "repository unreachable".to_string(),
        })
    }
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_bundle_accessors() {
    let bundle = Bundle::new("org.apache.felix:org.osgi.core:jar:1.4.0", 1);
    assert_eq!(
        bundle.coordinate().as_str(),
        "org.apache.felix:org.osgi.core:jar:1.4.0"
    );
    assert_eq!(bundle.run_level(), 1);
}

#[test]
fn test_out_of_range_run_levels_accepted() {
    for level in [0, 121, 500, u32::MAX] {
        let bundle = Bundle::new("org.example:odd:jar:1.0", level);
        assert_eq!(bundle.run_level(), level);
        assert!(!bundle.has_valid_run_level());
    }
}

#[test]
fn test_boundary_run_levels_valid() {
    assert!(Bundle::new("org.example:a:jar:1.0", 1).validate().is_ok());
    assert!(Bundle::new("org.example:a:jar:1.0", 120).validate().is_ok());
}

#[test]
fn test_malformed_coordinate_accepted() {
    let bundle = Bundle::new("not a coordinate", 5);
    assert_eq!(bundle.coordinate().as_str(), "not a coordinate");
}

#[test]
fn test_default_run_level_bundle() {
    let bundle = Bundle::with_default_run_level("org.example:app:jar:1.0");
    assert_eq!(bundle.run_level(), DEFAULT_RUN_LEVEL);
}

#[test]
fn test_bundle_value_equality() {
    let a = Bundle::new("org.example:a:jar:1.0", 3);
    let b = Bundle::new("org.example:a:jar:1.0", 3);
    let c = Bundle::new("org.example:a:jar:1.0", 4);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// =============================================================================
// Install Path Tests
// =============================================================================

#[test]
fn test_relative_install_path_with_group() {
    let resolver = InMemoryResolver::new();
    resolver
        .register(
            "org.apache.felix:org.osgi.core:jar:1.4.0",
            ResolvedArtifact::new(
                "/home/user/.m2/repository/org/apache/felix/org.osgi.core/1.4.0/org.osgi.core-1.4.0.jar",
                "org.apache.felix",
            ),
        )
        .unwrap();

    let bundle = Bundle::new("org.apache.felix:org.osgi.core:jar:1.4.0", 1);
    assert_eq!(
        bundle.relative_install_path(&resolver).unwrap(),
        "org/apache/felix/org.osgi.core-1.4.0.jar"
    );
}

#[test]
fn test_relative_install_path_without_group() {
    let resolver = InMemoryResolver::new();
    resolver
        .register(
            "local:thing:jar:1.0",
            ResolvedArtifact::ungrouped("/build/output/thing-1.0.jar"),
        )
        .unwrap();

    let bundle = Bundle::new("local:thing:jar:1.0", 70);
    assert_eq!(bundle.relative_install_path(&resolver).unwrap(), "thing-1.0.jar");
}

#[test]
fn test_resolved_artifact_passthrough() {
    let resolver = InMemoryResolver::new();
    let artifact = ResolvedArtifact::new("/cache/x-1.jar", "org.example");
    resolver.register("org.example:x:jar:1", artifact.clone()).unwrap();

    let bundle = Bundle::new("org.example:x:jar:1", 20);
    assert_eq!(bundle.resolved_artifact(&resolver).unwrap(), artifact);
    assert_eq!(
        bundle.resolved_artifact(&resolver).unwrap().path,
        PathBuf::from("/cache/x-1.jar")
    );
}

#[test]
fn test_resolver_errors_propagate_unchanged() {
    let bundle = Bundle::new("org.example:x:jar:1", 20);
    let err = bundle.relative_install_path(&FailingResolver).unwrap_err();

    match err {
        Error::ResolutionFailed { coordinate, reason } => {
            assert_eq!(coordinate, "org.example:x:jar:1");
            assert_eq!(reason, "repository unreachable");
        }
        other => panic!("unexpected error: {}", other),
    }
}
