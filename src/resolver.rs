//! # Artifact Resolution
//!
//! Turning a coordinate into a file is the host build system's job. This
//! module defines the seam it plugs into:
//!
//! - [`ArtifactResolver`]: the capability, passed explicitly to every
//!   operation that needs it
//! - [`ResolvedArtifact`]: what a resolver hands back, a file path and an
//!   optional group identifier
//!
//! Two resolvers ship with the crate:
//!
//! | Resolver | Source of truth | Missing artifact |
//! |----------|-----------------|------------------|
//! | [`LocalRepository`] | Maven layout on disk (`~/.m2/repository`) | [`Error::ArtifactNotFound`] |
//! | [`InMemoryResolver`] | Explicit registrations | [`Error::ResolutionFailed`] |
//!
//! Neither one downloads anything. Populating the repository is up to the
//! host.
//!
//! [`Error::ArtifactNotFound`]: crate::error::Error::ArtifactNotFound
//! [`Error::ResolutionFailed`]: crate::error::Error::ResolutionFailed

use crate::constants::{LOCAL_REPOSITORY_DIR, REPOSITORY_ENV_VAR};
use crate::coordinate::ArtifactCoordinate;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Capability that maps artifact coordinates to resolved artifacts.
///
/// Errors returned by implementations propagate unchanged through
/// [`Bundle::resolved_artifact`] and [`Bundle::relative_install_path`].
///
/// [`Bundle::resolved_artifact`]: crate::bundle::Bundle::resolved_artifact
/// [`Bundle::relative_install_path`]: crate::bundle::Bundle::relative_install_path
pub trait ArtifactResolver: Send + Sync {
    /// Resolves a coordinate into an artifact.
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact>;
}

/// A resolved artifact: where its file lives and which group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Path of the artifact file.
    pub path: PathBuf,
    /// Dotted group identifier, if the resolver knows it.
    pub group: Option<String>,
}

impl ResolvedArtifact {
    /// Creates an artifact with a known group.
    pub fn new(path: impl Into<PathBuf>, group: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            group: Some(group.into()),
        }
    }

    /// Creates an artifact with no group identifier.
    pub fn ungrouped(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            group: None,
        }
    }

    /// Returns the file-name component of the artifact path.
    ///
    /// Paths without a file name (e.g. `/`) are returned whole.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Returns the install path relative to a runtime's bundle directory.
    ///
    /// With a group the file lands under the group's dotted segments turned
    /// into directories (`org/apache/felix/org.osgi.core-1.4.0.jar`).
    /// Without one it is just the file name.
    pub fn relative_install_path(&self) -> String {
        let name = self.file_name();
        match &self.group {
            Some(group) => format!("{}/{}", group.replace('.', "/"), name),
            None => name,
        }
    }
}

// =============================================================================
// Local Maven Repository
// =============================================================================

/// Resolver over a local Maven-layout repository.
///
/// A coordinate `g.h:a:jar:1.0` resolves to `<root>/g/h/a/1.0/a-1.0.jar`.
/// The file must already exist.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    /// Repository root directory.
    root: PathBuf,
}

impl LocalRepository {
    /// Opens the default repository.
    ///
    /// Uses `$OSGI_RUNTIME_REPOSITORY` when set, else `~/.m2/repository`.
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Opens a repository rooted at the given path.
    pub fn with_path(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the default repository path.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(REPOSITORY_ENV_VAR) {
            return PathBuf::from(path);
        }

        if let Some(home) = dirs::home_dir() {
            home.join(LOCAL_REPOSITORY_DIR)
        } else {
            PathBuf::from(LOCAL_REPOSITORY_DIR)
        }
    }

    /// Returns the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns where a coordinate's file lives, without checking it exists.
    pub fn artifact_path(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
        let parts = coordinate.parse()?;
        Ok(self.root.join(parts.repository_path()))
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        let parts = coordinate.parse()?;
        let path = self.root.join(parts.repository_path());

        if !path.is_file() {
            return Err(Error::ArtifactNotFound {
                coordinate: coordinate.to_string(),
                path,
            });
        }

        debug!("Resolved {} -> {}", coordinate, path.display());
        Ok(ResolvedArtifact {
            path,
            group: Some(parts.group),
        })
    }
}

// =============================================================================
// In-Memory Resolver
// =============================================================================

/// Resolver backed by explicit registrations.
///
/// Useful when the host has already resolved everything and just needs to
/// hand the results over, and for tests.
#[derive(Debug, Default)]
pub struct InMemoryResolver {
    artifacts: RwLock<HashMap<ArtifactCoordinate, ResolvedArtifact>>,
}

impl InMemoryResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the artifact for a coordinate.
    pub fn register(
        &self,
        coordinate: impl Into<ArtifactCoordinate>,
        artifact: ResolvedArtifact,
    ) -> Result<()> {
        self.artifacts
            .write()
            .map_err(|e| Error::Internal(format!("lock poisoned: {}", e)))?
            .insert(coordinate.into(), artifact);
        Ok(())
    }

    /// Returns the number of registered artifacts.
    pub fn len(&self) -> usize {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactResolver for InMemoryResolver {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<ResolvedArtifact> {
        let artifacts = self
            .artifacts
            .read()
            .map_err(|e| Error::Internal(format!("lock poisoned: {}", e)))?;

        artifacts
            .get(coordinate)
            .cloned()
            .ok_or_else(|| Error::ResolutionFailed {
                coordinate: coordinate.to_string(),
                reason: "not registered".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relative_install_path_with_group() {
        let artifact = ResolvedArtifact::new(
            "/repo/org/apache/felix/org.osgi.core/1.4.0/org.osgi.core-1.4.0.jar",
            "org.apache.felix",
        );
        assert_eq!(
            artifact.relative_install_path(),
            "org/apache/felix/org.osgi.core-1.4.0.jar"
        );
    }

    #[test]
    fn test_relative_install_path_without_group() {
        let artifact = ResolvedArtifact::ungrouped("/tmp/build/my.bundle-2.0.jar");
        assert_eq!(artifact.relative_install_path(), "my.bundle-2.0.jar");
    }

    #[test]
    fn test_local_repository_resolves_existing_file() {
        let temp = TempDir::new().unwrap();
        let repo = LocalRepository::with_path(temp.path());
        let coord = ArtifactCoordinate::new("org.example:widget:jar:1.0");

        let expected = temp.path().join("org/example/widget/1.0/widget-1.0.jar");
        std::fs::create_dir_all(expected.parent().unwrap()).unwrap();
        std::fs::write(&expected, b"jar").unwrap();

        let artifact = repo.resolve(&coord).unwrap();
        assert_eq!(artifact.path, expected);
        assert_eq!(artifact.group.as_deref(), Some("org.example"));
    }

    #[test]
    fn test_local_repository_missing_file() {
        let temp = TempDir::new().unwrap();
        let repo = LocalRepository::with_path(temp.path());
        let coord = ArtifactCoordinate::new("org.example:widget:jar:1.0");

        assert!(matches!(
            repo.resolve(&coord),
            Err(Error::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn test_in_memory_resolver_unregistered() {
        let resolver = InMemoryResolver::new();
        let coord = ArtifactCoordinate::new("org.example:widget:jar:1.0");

        assert!(resolver.is_empty());
        assert!(matches!(
            resolver.resolve(&coord),
            Err(Error::ResolutionFailed { .. })
        ));
    }

    #[test]
    fn test_in_memory_resolver_len_survives_poisoned_lock() {
        let resolver = std::sync::Arc::new(InMemoryResolver::new());
        resolver
            .register("org.example:widget:jar:1.0", ResolvedArtifact::ungrouped("/w.jar"))
            .unwrap();

        let poisoner = std::sync::Arc::clone(&resolver);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.artifacts.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(resolver.artifacts.is_poisoned());
        assert_eq!(resolver.len(), 1);
        assert!(!resolver.is_empty());
    }
}
