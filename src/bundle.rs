//! OSGi bundle descriptors.
//!
//! A [`Bundle`] pairs an artifact coordinate with the run level the bundle
//! starts at. It knows nothing about files until handed an
//! [`ArtifactResolver`]; from the resolved artifact it derives where the
//! bundle goes inside a runtime's bundle directory.
//!
//! Run levels are not checked on construction. A level outside
//! `MIN_RUN_LEVEL..=MAX_RUN_LEVEL` is kept as given; callers that want the
//! check use [`Bundle::validate`].

use crate::constants::{DEFAULT_RUN_LEVEL, MAX_RUN_LEVEL, MIN_RUN_LEVEL};
use crate::coordinate::ArtifactCoordinate;
use crate::error::{Error, Result};
use crate::resolver::{ArtifactResolver, ResolvedArtifact};
use serde::{Deserialize, Serialize};

/// An OSGi bundle: artifact coordinate plus activation run level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bundle {
    /// Artifact coordinate.
    coordinate: ArtifactCoordinate,
    /// Start level; lower starts earlier.
    run_level: u32,
}

impl Bundle {
    /// Creates a bundle. The run level is accepted as-is.
    pub fn new(coordinate: impl Into<ArtifactCoordinate>, run_level: u32) -> Self {
        Self {
            coordinate: coordinate.into(),
            run_level,
        }
    }

    /// Creates a bundle at [`DEFAULT_RUN_LEVEL`].
    pub fn with_default_run_level(coordinate: impl Into<ArtifactCoordinate>) -> Self {
        Self::new(coordinate, DEFAULT_RUN_LEVEL)
    }

    /// Returns the artifact coordinate.
    pub fn coordinate(&self) -> &ArtifactCoordinate {
        &self.coordinate
    }

    /// Returns the run level.
    pub fn run_level(&self) -> u32 {
        self.run_level
    }

    /// Returns true if the run level is within `1..=120`.
    pub fn has_valid_run_level(&self) -> bool {
        (MIN_RUN_LEVEL..=MAX_RUN_LEVEL).contains(&self.run_level)
    }

    /// Fails with [`Error::InvalidRunLevel`] if the run level is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.has_valid_run_level() {
            Ok(())
        } else {
            Err(Error::InvalidRunLevel {
                coordinate: self.coordinate.to_string(),
                run_level: self.run_level,
            })
        }
    }

    /// Resolves the bundle's artifact through the given resolver.
    pub fn resolved_artifact(&self, resolver: &dyn ArtifactResolver) -> Result<ResolvedArtifact> {
        resolver.resolve(&self.coordinate)
    }

    /// Returns the path to install the bundle to, relative to the base of
    /// the bundle directory.
    pub fn relative_install_path(&self, resolver: &dyn ArtifactResolver) -> Result<String> {
        Ok(self.resolved_artifact(resolver)?.relative_install_path())
    }
}
