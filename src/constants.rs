//! # Runtime Catalog Constants
//!
//! Run level bounds, coordinate limits, directory names and the well-known
//! coordinates shared by the feature catalog. These constants are the
//! **single source of truth** for the values used across the crate.
//!
//! ## Cross-References
//!
//! - [`crate::bundle`]: Uses the run level bounds
//! - [`crate::coordinate`]: Uses coordinate length and character limits
//! - [`crate::features`]: Uses the framework API coordinates
//! - [`crate::layout`]: Uses the runtime directory names

// =============================================================================
// Run Levels
// =============================================================================
//
// OSGi start levels order bundle activation: lower levels start first. The
// framework itself sits at level 0, so catalog bundles begin at 1.
// =============================================================================

/// Lowest run level a catalog bundle can be assigned.
pub const MIN_RUN_LEVEL: u32 = 1;

/// Highest run level a bundle can be assigned.
///
/// The runtime layout starts the framework at the highest level actually in
/// use, never above this bound.
pub const MAX_RUN_LEVEL: u32 = 120;

/// Run level for bundles that are not explicitly leveled.
///
/// Sits above every framework service level in the catalog so application
/// bundles start after logging, configuration and management are up.
pub const DEFAULT_RUN_LEVEL: u32 = 70;

// =============================================================================
// Artifact Coordinates
// =============================================================================

/// Maximum artifact coordinate length in bytes.
///
/// Real Maven coordinates are well under 200 bytes; anything longer is
/// treated as malformed before any path is derived from it.
pub const MAX_COORDINATE_LEN: usize = 512;

/// Characters allowed in an artifact coordinate (besides ASCII alphanumerics).
///
/// Excludes `/` and `\` so no coordinate field can introduce a path component.
pub const COORDINATE_VALID_CHARS: &str = ".-_:";

/// Packaging type of OSGi bundles.
pub const BUNDLE_PACKAGING: &str = "jar";

/// Core OSGi framework API (Felix build).
pub const OSGI_CORE: &str = "org.apache.felix:org.osgi.core:jar:1.4.0";

/// OSGi compendium service API (Felix build).
pub const OSGI_COMPENDIUM: &str = "org.apache.felix:org.osgi.compendium:jar:1.4.0";

// =============================================================================
// Repository and Runtime Layout
// =============================================================================

/// Local Maven repository, relative to the user's home directory.
pub const LOCAL_REPOSITORY_DIR: &str = ".m2/repository";

/// Environment variable overriding the default local repository.
pub const REPOSITORY_ENV_VAR: &str = "OSGI_RUNTIME_REPOSITORY";

/// Bundle directory inside a runtime directory.
pub const BUNDLE_DIR: &str = "bundle";

/// Framework configuration directory inside a runtime directory.
pub const CONF_DIR: &str = "conf";

/// Framework auto-start properties file, inside [`CONF_DIR`].
pub const FRAMEWORK_PROPERTIES_FILE: &str = "config.properties";

/// Install manifest written at the root of a runtime directory.
pub const INSTALL_MANIFEST_FILE: &str = "install-manifest.json";

/// Property prefix for per-level auto-start bundle lists.
pub const AUTO_START_PROPERTY_PREFIX: &str = "felix.auto.start";

/// Property naming the start level the framework moves to on launch.
pub const BEGINNING_START_LEVEL_PROPERTY: &str = "org.osgi.framework.startlevel.beginning";
