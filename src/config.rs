//! Runtime assembly configuration.
//!
//! Read from a JSON file; every field is optional:
//!
//! ```json
//! {
//!   "repository": "/srv/maven",
//!   "features": ["osgi-core", "pax-logging"],
//!   "strict_run_levels": true
//! }
//! ```
//!
//! A missing `repository` falls back to [`LocalRepository::default_path`].
//! An empty `features` list selects every feature in the catalog.

use crate::error::{Error, Result};
use crate::features::Feature;
use crate::layout::RuntimeLayout;
use crate::resolver::LocalRepository;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for assembling a runtime directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Local Maven repository root.
    pub repository: Option<PathBuf>,
    /// Feature names to install.
    pub features: Vec<String>,
    /// Reject bundles with out-of-range run levels.
    pub strict_run_levels: bool,
}

impl RuntimeConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&data).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Returns the configured features, or every feature if none are listed.
    pub fn features(&self) -> Result<Vec<Feature>> {
        if self.features.is_empty() {
            return Ok(Feature::ALL.to_vec());
        }
        self.features.iter().map(|name| name.parse()).collect()
    }

    /// Returns the repository resolver.
    pub fn repository(&self) -> LocalRepository {
        match &self.repository {
            Some(path) => LocalRepository::with_path(path),
            None => LocalRepository::new(),
        }
    }

    /// Returns a runtime layout at `base_dir` using these settings.
    pub fn layout(&self, base_dir: impl Into<PathBuf>) -> RuntimeLayout {
        RuntimeLayout::new(base_dir).strict(self.strict_run_levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_features_selects_all() {
        let config = RuntimeConfig::default();
        assert_eq!(config.features().unwrap(), Feature::ALL.to_vec());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("runtime.json");
        fs::write(
            &path,
            r#"{ "repository": "/srv/maven", "features": ["osgi-jmx"], "strict_run_levels": true }"#,
        )
        .unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.repository, Some(PathBuf::from("/srv/maven")));
        assert_eq!(config.features().unwrap(), vec![Feature::OsgiJmx]);
        assert!(config.layout(temp.path()).is_strict());
        assert_eq!(config.repository().root(), Path::new("/srv/maven"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("runtime.json");
        fs::write(&path, r#"{ "repositry": "/srv/maven" }"#).unwrap();

        assert!(matches!(
            RuntimeConfig::load(&path),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
