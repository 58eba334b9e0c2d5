//! # Runtime Directory Layout
//!
//! Places resolved bundles into a framework runtime directory and writes the
//! configuration that starts them at their run levels:
//!
//! ```text
//! <runtime>/
//! ├── bundle/
//! │   ├── org/apache/felix/org.osgi.core-1.4.0.jar
//! │   └── org/ops4j/pax/logging/pax-logging-api-1.3.0.jar
//! ├── conf/
//! │   └── config.properties      (auto-start lists per run level)
//! └── install-manifest.json      (what was installed, with sha256)
//! ```
//!
//! Assembly is two steps:
//!
//! 1. [`RuntimeLayout::plan`] resolves every bundle and computes where it
//!    goes. Nothing is written.
//! 2. [`RuntimeLayout::install`] copies the planned files and writes the
//!    configuration.
//!
//! ## Path Safety
//!
//! Install paths come from resolvers the crate does not control. Each path is
//! rebuilt component by component while planning; `..` components are
//! rejected and empty or `.` components dropped, so nothing lands outside
//! `bundle/`.
//!
//! ## Atomic Writes
//!
//! Every file is written to a uniquely named temp file and renamed into
//! place. Bundles whose destination already has the same sha256 are left
//! untouched, so re-running an install is cheap.

use crate::bundle::Bundle;
use crate::constants::{
    AUTO_START_PROPERTY_PREFIX, BEGINNING_START_LEVEL_PROPERTY, BUNDLE_DIR, CONF_DIR,
    FRAMEWORK_PROPERTIES_FILE, INSTALL_MANIFEST_FILE, MAX_RUN_LEVEL, MIN_RUN_LEVEL,
};
use crate::coordinate::ArtifactCoordinate;
use crate::error::{Error, Result};
use crate::resolver::ArtifactResolver;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// One bundle's place in an install plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallEntry {
    /// Artifact coordinate.
    pub coordinate: ArtifactCoordinate,
    /// Run level.
    pub run_level: u32,
    /// Resolved artifact file.
    pub source: PathBuf,
    /// Install path relative to the bundle directory.
    pub relative_path: String,
}

/// Ordered list of bundles to install.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstallPlan {
    entries: Vec<InstallEntry>,
}

impl InstallPlan {
    /// Returns the entries in bundle order.
    pub fn entries(&self) -> &[InstallEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the plan installs nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups entries by run level, ascending; bundle order is kept within a level.
    pub fn by_run_level(&self) -> BTreeMap<u32, Vec<&InstallEntry>> {
        let mut levels: BTreeMap<u32, Vec<&InstallEntry>> = BTreeMap::new();
        for entry in &self.entries {
            levels.entry(entry.run_level).or_default().push(entry);
        }
        levels
    }

    /// Returns the start level the framework should move to on launch.
    ///
    /// The highest run level in the plan, capped at [`MAX_RUN_LEVEL`];
    /// [`MIN_RUN_LEVEL`] for an empty plan.
    pub fn beginning_start_level(&self) -> u32 {
        self.entries
            .iter()
            .map(|e| e.run_level)
            .max()
            .map_or(MIN_RUN_LEVEL, |level| level.min(MAX_RUN_LEVEL))
    }

    /// Renders the framework auto-start properties.
    ///
    /// Levels outside `MIN_RUN_LEVEL..=MAX_RUN_LEVEL` are clamped into range
    /// so every planned bundle is started by the framework.
    pub fn framework_properties(&self) -> String {
        let mut out = String::from("# Generated by osgi-runtime. Do not edit.\n");
        out.push_str(&format!(
            "{}={}\n",
            BEGINNING_START_LEVEL_PROPERTY,
            self.beginning_start_level()
        ));

        let mut auto_start: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for (level, entries) in self.by_run_level() {
            auto_start
                .entry(level.clamp(MIN_RUN_LEVEL, MAX_RUN_LEVEL))
                .or_default()
                .extend(
                    entries
                        .iter()
                        .map(|e| format!("file:{}/{}", BUNDLE_DIR, e.relative_path)),
                );
        }

        for (level, urls) in auto_start {
            out.push_str(&format!(
                "{}.{}={}\n",
                AUTO_START_PROPERTY_PREFIX,
                level,
                urls.join(" ")
            ));
        }

        out
    }
}

/// Record of one installed bundle, as written to the install manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledBundle {
    /// Artifact coordinate.
    pub coordinate: ArtifactCoordinate,
    /// Run level.
    pub run_level: u32,
    /// Install path relative to the bundle directory.
    pub relative_path: String,
    /// Content digest (`sha256:<hex>`).
    pub digest: String,
    /// Size in bytes.
    pub size: u64,
}

/// Result of an install run.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Every bundle in the plan, in plan order.
    pub installed: Vec<InstalledBundle>,
    /// Number of bundles copied.
    pub copied: usize,
    /// Number of bundles already present with identical content.
    pub unchanged: usize,
    /// Number of bundles from the previous install no longer in the plan.
    pub removed: usize,
}

/// A framework runtime directory.
#[derive(Debug, Clone)]
pub struct RuntimeLayout {
    /// Runtime root directory.
    base_dir: PathBuf,
    /// Reject bundles with out-of-range run levels.
    strict: bool,
}

impl RuntimeLayout {
    /// Creates a layout rooted at `base_dir`. Nothing is created yet.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            strict: false,
        }
    }

    /// Enables or disables run level validation while planning.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns true if run levels are validated.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns the runtime root directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the bundle directory.
    pub fn bundle_dir(&self) -> PathBuf {
        self.base_dir.join(BUNDLE_DIR)
    }

    /// Returns the framework configuration directory.
    pub fn conf_dir(&self) -> PathBuf {
        self.base_dir.join(CONF_DIR)
    }

    /// Returns the framework properties file path.
    pub fn framework_properties_path(&self) -> PathBuf {
        self.conf_dir().join(FRAMEWORK_PROPERTIES_FILE)
    }

    /// Returns the install manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir.join(INSTALL_MANIFEST_FILE)
    }

    /// Resolves the bundles and computes where each one goes.
    ///
    /// ## Errors
    ///
    /// - [`Error::InvalidRunLevel`]: strict mode and a level outside `1..=120`
    /// - Any resolver error, unchanged
    /// - [`Error::InstallFailed`]: unsafe install path, or two different
    ///   bundles mapping to the same path
    /// - [`Error::ConflictingRunLevels`]: one coordinate listed at two levels
    pub fn plan(&self, bundles: &[Bundle], resolver: &dyn ArtifactResolver) -> Result<InstallPlan> {
        let mut entries = Vec::with_capacity(bundles.len());
        let mut claimed: HashMap<String, (ArtifactCoordinate, u32)> = HashMap::new();

        for bundle in bundles {
            if self.strict {
                bundle.validate()?;
            } else if !bundle.has_valid_run_level() {
                warn!(
                    "Bundle {} has out-of-range run level {}, starting it at {}",
                    bundle.coordinate(),
                    bundle.run_level(),
                    bundle.run_level().clamp(MIN_RUN_LEVEL, MAX_RUN_LEVEL)
                );
            }

            let artifact = bundle.resolved_artifact(resolver)?;
            let relative_path = self.normalize_install_path(&artifact.relative_install_path())?;

            if let Some((owner, level)) = claimed.get(&relative_path) {
                if owner == bundle.coordinate() {
                    if *level != bundle.run_level() {
                        return Err(Error::ConflictingRunLevels {
                            coordinate: owner.to_string(),
                            first: *level,
                            second: bundle.run_level(),
                        });
                    }
                    debug!("Skipping duplicate bundle {}", owner);
                    continue;
                }
                return Err(Error::InstallFailed {
                    path: self.bundle_dir().join(&relative_path),
                    reason: format!(
                        "both '{}' and '{}' install to this path",
                        owner,
                        bundle.coordinate()
                    ),
                });
            }
            claimed.insert(
                relative_path.clone(),
                (bundle.coordinate().clone(), bundle.run_level()),
            );

            debug!(
                "Planned {} at level {} -> {}",
                bundle.coordinate(),
                bundle.run_level(),
                relative_path
            );

            entries.push(InstallEntry {
                coordinate: bundle.coordinate().clone(),
                run_level: bundle.run_level(),
                source: artifact.path,
                relative_path,
            });
        }

        Ok(InstallPlan { entries })
    }

    /// Copies the planned bundles and writes the framework configuration
    /// and install manifest.
    ///
    /// Every source is read before anything is written, so a missing or
    /// unreadable artifact leaves the runtime untouched. Bundles listed in
    /// the previous manifest but absent from the plan are removed.
    pub fn install(&self, plan: &InstallPlan) -> Result<InstallReport> {
        let mut staged = Vec::with_capacity(plan.len());
        for entry in plan.entries() {
            let dest = self.install_path(&entry.relative_path)?;

            if !entry.source.is_file() {
                return Err(Error::ArtifactNotFound {
                    coordinate: entry.coordinate.to_string(),
                    path: entry.source.clone(),
                });
            }

            let data = fs::read(&entry.source).map_err(|e| Error::InstallFailed {
                path: entry.source.clone(),
                reason: e.to_string(),
            })?;
            staged.push((entry, dest, data));
        }

        let previous = if self.manifest_path().is_file() {
            self.read_manifest().unwrap_or_else(|e| {
                warn!("Ignoring previous install manifest: {}", e);
                Vec::new()
            })
        } else {
            Vec::new()
        };

        let bundle_dir = self.bundle_dir();
        let conf_dir = self.conf_dir();
        for dir in [&bundle_dir, &conf_dir] {
            fs::create_dir_all(dir).map_err(|e| Error::InstallFailed {
                path: dir.clone(),
                reason: e.to_string(),
            })?;
        }

        let mut report = InstallReport::default();

        for (entry, dest, data) in staged {
            let digest = format!("sha256:{}", hex::encode(Sha256::digest(&data)));

            if file_digest(&dest).as_deref() == Some(digest.as_str()) {
                debug!("Bundle {} already installed", entry.relative_path);
                report.unchanged += 1;
            } else {
                write_atomic(&dest, &data)?;
                debug!(
                    "Installed {} ({} bytes) -> {}",
                    entry.coordinate,
                    data.len(),
                    dest.display()
                );
                report.copied += 1;
            }

            report.installed.push(InstalledBundle {
                coordinate: entry.coordinate.clone(),
                run_level: entry.run_level,
                relative_path: entry.relative_path.clone(),
                digest,
                size: data.len() as u64,
            });
        }

        let planned: HashSet<&str> = plan
            .entries()
            .iter()
            .map(|e| e.relative_path.as_str())
            .collect();
        for stale in previous
            .iter()
            .filter(|b| !planned.contains(b.relative_path.as_str()))
        {
            if self.remove_bundle(&stale.relative_path)? {
                debug!("Removed stale bundle {}", stale.relative_path);
                report.removed += 1;
            }
        }

        write_atomic(
            &self.framework_properties_path(),
            plan.framework_properties().as_bytes(),
        )?;

        let manifest = serde_json::to_string_pretty(&report.installed)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        write_atomic(&self.manifest_path(), manifest.as_bytes())?;

        info!(
            "Runtime assembled at {}: {} copied, {} unchanged, {} removed",
            self.base_dir.display(),
            report.copied,
            report.unchanged,
            report.removed
        );

        Ok(report)
    }

    /// Plans and installs in one go.
    pub fn assemble(
        &self,
        bundles: &[Bundle],
        resolver: &dyn ArtifactResolver,
    ) -> Result<InstallReport> {
        let plan = self.plan(bundles, resolver)?;
        self.install(&plan)
    }

    /// Reads back the install manifest of a previous run.
    pub fn read_manifest(&self) -> Result<Vec<InstalledBundle>> {
        let path = self.manifest_path();
        let data = fs::read_to_string(&path).map_err(|e| Error::InstallFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&data).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deletes an installed bundle and any directories it leaves empty.
    ///
    /// Returns false if the bundle was already gone.
    fn remove_bundle(&self, relative_path: &str) -> Result<bool> {
        let dest = match self.install_path(relative_path) {
            Ok(dest) => dest,
            Err(e) => {
                warn!("Ignoring manifest entry: {}", e);
                return Ok(false);
            }
        };

        if !dest.is_file() {
            return Ok(false);
        }
        fs::remove_file(&dest).map_err(|e| Error::InstallFailed {
            path: dest.clone(),
            reason: e.to_string(),
        })?;

        let bundle_dir = self.bundle_dir();
        let mut dir = dest.parent();
        while let Some(parent) = dir {
            if parent == bundle_dir || fs::remove_dir(parent).is_err() {
                break;
            }
            dir = parent.parent();
        }

        Ok(true)
    }

    /// Normalizes a relative install path to `/`-separated components.
    fn normalize_install_path(&self, relative_path: &str) -> Result<String> {
        let mut parts = Vec::new();

        // SECURITY: rebuild the path so resolver output cannot escape bundle/
        for part in relative_path.split(['/', '\\']) {
            match Path::new(part).components().next() {
                None | Some(Component::CurDir) => continue,
                Some(Component::Normal(_)) => parts.push(part),
                _ => {
                    return Err(Error::InstallFailed {
                        path: self.bundle_dir(),
                        reason: format!("unsafe install path '{}'", relative_path),
                    });
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::InstallFailed {
                path: self.bundle_dir(),
                reason: format!("empty install path '{}'", relative_path),
            });
        }

        Ok(parts.join("/"))
    }

    /// Maps a relative install path to its destination under the bundle directory.
    fn install_path(&self, relative_path: &str) -> Result<PathBuf> {
        let normalized = self.normalize_install_path(relative_path)?;
        Ok(normalized
            .split('/')
            .fold(self.bundle_dir(), |dest, part| dest.join(part)))
    }
}

/// Returns the sha256 digest of a file, if it can be read.
fn file_digest(path: &Path) -> Option<String> {
    let data = fs::read(path).ok()?;
    Some(format!("sha256:{}", hex::encode(Sha256::digest(&data))))
}

/// Writes a file via a unique temp file and rename.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let fail = |e: std::io::Error| Error::InstallFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(fail)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.tmp.{}", file_name, uuid::Uuid::now_v7()));

    fs::write(&temp_path, data).map_err(fail)?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        fail(e)
    })
}
