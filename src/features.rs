//! # Feature Catalog
//!
//! Each feature is a fixed, version-pinned list of bundles providing one
//! runtime capability. The accessors rebuild their list on every call; two
//! calls always return equal values.
//!
//! | Feature | Accessor | Run level | Bundles |
//! |---------|----------|-----------|---------|
//! | `osgi-core` | [`osgi_core_bundles`] | 1 | 1 |
//! | `osgi-compendium` | [`osgi_compendium_bundles`] | 1 | 1 |
//! | `pax-logging` | [`pax_logging_bundles`] | 2 | 2 |
//! | `pax-confman` | [`pax_confman_bundles`] | 3 | 2 |
//! | `felix-tui-shell` | [`felix_tui_shell_bundles`] | 10 | 2 |
//! | `osgi-jmx` | [`osgi_jmx_bundles`] | 50 | 1 |
//! | `maexo-jmx` | [`maexo_jmx_bundles`] | 60 | 5 |
//!
//! List order is declaration order only. Activation order comes from the run
//! level.

use crate::bundle::Bundle;
use crate::constants::{OSGI_COMPENDIUM, OSGI_CORE};
use crate::error::Error;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Core OSGi framework API.
pub fn osgi_core_bundles() -> Vec<Bundle> {
    vec![Bundle::new(OSGI_CORE, 1)]
}

/// OSGi compendium service API.
pub fn osgi_compendium_bundles() -> Vec<Bundle> {
    vec![Bundle::new(OSGI_COMPENDIUM, 1)]
}

/// Pax Logging: bridges the common logging APIs onto the OSGi log service.
pub fn pax_logging_bundles() -> Vec<Bundle> {
    vec![
        // Commons logging, log4j, slf4j and friends
        Bundle::new("org.ops4j.pax.logging:pax-logging-api:jar:1.3.0", 2),
        // OSGi compendium log service
        Bundle::new("org.ops4j.pax.logging:pax-logging-service:jar:1.3.0", 2),
    ]
}

/// Configuration admin plus a loader for property files on disk.
pub fn pax_confman_bundles() -> Vec<Bundle> {
    vec![
        Bundle::new("org.apache.felix:org.apache.felix.configadmin:jar:1.0.4", 3),
        Bundle::new("org.ops4j.pax.confman:pax-confman-propsloader:jar:0.2.2", 3),
    ]
}

/// Felix shell with its text console.
pub fn felix_tui_shell_bundles() -> Vec<Bundle> {
    vec![
        Bundle::new("org.apache.felix:org.apache.felix.shell:jar:1.4.2", 10),
        Bundle::new("org.apache.felix:org.apache.felix.shell.tui:jar:1.4.1", 10),
    ]
}

/// OSGi reference JMX bridge.
pub fn osgi_jmx_bundles() -> Vec<Bundle> {
    vec![Bundle::new(
        "org.osgi:org.osgi.impl.bundle.jmx:jar:4.2.0.200907080519",
        50,
    )]
}

/// MAEXO JMX management layer.
pub fn maexo_jmx_bundles() -> Vec<Bundle> {
    // Minimal set unknown; the JMX bridge may make this redundant.
    vec![
        Bundle::new(
            "com.buschmais.maexo.modules.framework:maexo-framework.switchboard:jar:1.0.0",
            60,
        ),
        Bundle::new(
            "com.buschmais.maexo.modules.framework:maexo-framework.commons.mbean:jar:1.0.0",
            60,
        ),
        Bundle::new(
            "com.buschmais.maexo.modules.mbeans:maexo-mbeans.osgi.core:jar:1.0.0",
            60,
        ),
        Bundle::new(
            "com.buschmais.maexo.modules.server:maexo-server.factory:jar:1.0.0",
            60,
        ),
        Bundle::new(
            "com.buschmais.maexo.modules.server:maexo-server.platform:jar:1.0.0",
            60,
        ),
    ]
}

// =============================================================================
// Named Features
// =============================================================================

/// Named feature sets in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    OsgiCore,
    OsgiCompendium,
    PaxLogging,
    PaxConfman,
    FelixTuiShell,
    OsgiJmx,
    MaexoJmx,
}

impl Feature {
    /// Every feature, in catalog order.
    pub const ALL: [Feature; 7] = [
        Feature::OsgiCore,
        Feature::OsgiCompendium,
        Feature::PaxLogging,
        Feature::PaxConfman,
        Feature::FelixTuiShell,
        Feature::OsgiJmx,
        Feature::MaexoJmx,
    ];

    /// Returns the kebab-case feature name.
    pub fn name(self) -> &'static str {
        match self {
            Self::OsgiCore => "osgi-core",
            Self::OsgiCompendium => "osgi-compendium",
            Self::PaxLogging => "pax-logging",
            Self::PaxConfman => "pax-confman",
            Self::FelixTuiShell => "felix-tui-shell",
            Self::OsgiJmx => "osgi-jmx",
            Self::MaexoJmx => "maexo-jmx",
        }
    }

    /// Returns a one-line description.
    pub fn description(self) -> &'static str {
        match self {
            Self::OsgiCore => "core OSGi framework API",
            Self::OsgiCompendium => "OSGi compendium service API",
            Self::PaxLogging => "logging bridge",
            Self::PaxConfman => "configuration management",
            Self::FelixTuiShell => "text management shell",
            Self::OsgiJmx => "OSGi JMX bridge",
            Self::MaexoJmx => "extended JMX management",
        }
    }

    /// Returns the feature's bundles.
    pub fn bundles(self) -> Vec<Bundle> {
        match self {
            Self::OsgiCore => osgi_core_bundles(),
            Self::OsgiCompendium => osgi_compendium_bundles(),
            Self::PaxLogging => pax_logging_bundles(),
            Self::PaxConfman => pax_confman_bundles(),
            Self::FelixTuiShell => felix_tui_shell_bundles(),
            Self::OsgiJmx => osgi_jmx_bundles(),
            Self::MaexoJmx => maexo_jmx_bundles(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownFeature(s.to_string()))
    }
}

/// Concatenates the bundles of several features, in the order given.
///
/// A bundle listed by more than one feature is kept only the first time.
pub fn bundles_for(features: &[Feature]) -> Vec<Bundle> {
    let mut seen = HashSet::new();
    features
        .iter()
        .flat_map(|f| f.bundles())
        .filter(|b| seen.insert(b.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_roundtrip() {
        for feature in Feature::ALL {
            assert_eq!(feature.name().parse::<Feature>().unwrap(), feature);
        }
    }

    #[test]
    fn test_unknown_feature() {
        assert!(matches!(
            "equinox".parse::<Feature>(),
            Err(Error::UnknownFeature(name)) if name == "equinox"
        ));
    }

    #[test]
    fn test_bundles_for_drops_duplicates() {
        let bundles = bundles_for(&[Feature::OsgiCore, Feature::OsgiCore, Feature::PaxLogging]);
        assert_eq!(bundles.len(), 3);
        assert_eq!(bundles[0].coordinate().as_str(), OSGI_CORE);
    }
}
