//! # osgi-runtime
//!
//! **Catalog of OSGi Runtime Bundles and Runtime Directory Assembly**
//!
//! This crate describes a fixed set of version-pinned OSGi bundles, grouped
//! into feature sets and tagged with the run level each one starts at, and
//! derives where every bundle belongs inside a framework runtime directory.
//! Resolving coordinates into files is the host's job; the crate consumes it
//! through the [`ArtifactResolver`] trait and never downloads anything.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         osgi-runtime                                │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                    Feature Catalog                          │    │
//! │  │  osgi-core(1) compendium(1) pax-logging(2) pax-confman(3)   │    │
//! │  │  felix-tui-shell(10) osgi-jmx(50) maexo-jmx(60)             │    │
//! │  └──────────────────────────┬──────────────────────────────────┘    │
//! │                             │ Vec<Bundle>                           │
//! │  ┌──────────────────────────┼──────────────────────────────────┐    │
//! │  │         Bundle { coordinate, run_level }                    │    │
//! │  │   relative_install_path(resolver) → group/as/dirs/file.jar  │    │
//! │  └──────────────────────────┼──────────────────────────────────┘    │
//! │                             │                                       │
//! │  ┌──────────────────────────┼──────────────────────────────────┐    │
//! │  │                    RuntimeLayout                            │    │
//! │  │   plan() → InstallPlan    install() → bundle/ conf/ manifest│    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                    ArtifactResolver (host)                          │
//! │  ┌──────────────────┐  ┌──────────────────┐                         │
//! │  │ LocalRepository  │  │ InMemoryResolver │                         │
//! │  │ (~/.m2 layout)   │  │ (registrations)  │                         │
//! │  └──────────────────┘  └──────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Run Levels
//!
//! Lower run levels start earlier. Catalog bundles use levels between
//! [`MIN_RUN_LEVEL`] and [`MAX_RUN_LEVEL`]; [`DEFAULT_RUN_LEVEL`] is for
//! bundles with no explicit level. Out-of-range levels are accepted on
//! construction and only rejected by [`Bundle::validate`] or a strict
//! [`RuntimeLayout`].
//!
//! # Example
//!
//! ```rust,ignore
//! use osgi_runtime::{bundles_for, Feature, LocalRepository, RuntimeLayout};
//!
//! fn main() -> osgi_runtime::Result<()> {
//!     let repository = LocalRepository::new();
//!     let bundles = bundles_for(&[Feature::OsgiCore, Feature::PaxLogging]);
//!
//!     for bundle in &bundles {
//!         println!("{} -> {}", bundle.coordinate(), bundle.relative_install_path(&repository)?);
//!     }
//!
//!     RuntimeLayout::new("target/runtime").assemble(&bundles, &repository)?;
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod config;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod features;
pub mod layout;
pub mod resolver;

// Re-exports
pub use bundle::Bundle;
pub use config::RuntimeConfig;
pub use constants::*;
pub use coordinate::{ArtifactCoordinate, CoordinateParts};
pub use error::{Error, Result};
pub use features::{
    Feature, bundles_for, felix_tui_shell_bundles, maexo_jmx_bundles, osgi_compendium_bundles,
    osgi_core_bundles, osgi_jmx_bundles, pax_confman_bundles, pax_logging_bundles,
};
pub use layout::{InstallEntry, InstallPlan, InstallReport, InstalledBundle, RuntimeLayout};
pub use resolver::{ArtifactResolver, InMemoryResolver, LocalRepository, ResolvedArtifact};
