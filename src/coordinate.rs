//! # Artifact Coordinates
//!
//! An artifact coordinate names a versioned, packaged artifact in a Maven
//! style repository:
//!
//! ```text
//! group:artifact:type:version
//! group:artifact:type:classifier:version
//! ```
//!
//! [`ArtifactCoordinate`] keeps the string exactly as supplied. Construction
//! never fails; the format belongs to whichever resolver consumes it.
//! [`ArtifactCoordinate::parse`] splits it into [`CoordinateParts`] for
//! resolvers that understand the Maven layout.
//!
//! ## Validation
//!
//! Parsing rejects:
//! - Coordinates longer than [`MAX_COORDINATE_LEN`]
//! - Characters outside ASCII alphanumerics and [`COORDINATE_VALID_CHARS`]
//! - Anything other than 4 or 5 non-empty fields
//!
//! Since `/`, `\`, empty and all-dot fields are rejected, no parsed field can add or
//! escape a directory when rendered with [`CoordinateParts::repository_path`].
//!
//! [`MAX_COORDINATE_LEN`]: crate::constants::MAX_COORDINATE_LEN
//! [`COORDINATE_VALID_CHARS`]: crate::constants::COORDINATE_VALID_CHARS

use crate::constants::{COORDINATE_VALID_CHARS, MAX_COORDINATE_LEN};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opaque artifact coordinate string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactCoordinate(String);

impl ArtifactCoordinate {
    /// Wraps a coordinate string without validating it.
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// Returns the coordinate exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the coordinate into its Maven fields.
    pub fn parse(&self) -> Result<CoordinateParts> {
        let spec = self.0.as_str();

        if spec.len() > MAX_COORDINATE_LEN {
            return Err(self.invalid(format!("exceeds {} bytes", MAX_COORDINATE_LEN)));
        }

        if !spec
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || COORDINATE_VALID_CHARS.contains(c))
        {
            return Err(self.invalid("contains invalid characters".to_string()));
        }

        let fields: Vec<&str> = spec.split(':').collect();
        if fields.iter().any(|f| f.is_empty()) {
            return Err(self.invalid("contains an empty field".to_string()));
        }
        if fields.iter().any(|f| f.chars().all(|c| c == '.')) {
            return Err(self.invalid("contains a field made only of dots".to_string()));
        }

        match fields.as_slice() {
            [group, artifact, packaging, version] => Ok(CoordinateParts {
                group: group.to_string(),
                artifact: artifact.to_string(),
                packaging: packaging.to_string(),
                classifier: None,
                version: version.to_string(),
            }),
            [group, artifact, packaging, classifier, version] => Ok(CoordinateParts {
                group: group.to_string(),
                artifact: artifact.to_string(),
                packaging: packaging.to_string(),
                classifier: Some(classifier.to_string()),
                version: version.to_string(),
            }),
            _ => Err(self.invalid(format!(
                "expected 4 or 5 fields (group:artifact:type[:classifier]:version), got {}",
                fields.len()
            ))),
        }
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidCoordinate {
            coordinate: self.0.clone(),
            reason,
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactCoordinate {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl From<String> for ArtifactCoordinate {
    fn from(spec: String) -> Self {
        Self(spec)
    }
}

/// Parsed fields of an [`ArtifactCoordinate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateParts {
    /// Dotted group identifier (e.g. `org.apache.felix`).
    pub group: String,
    /// Artifact identifier.
    pub artifact: String,
    /// Packaging type, also the file extension (e.g. `jar`).
    pub packaging: String,
    /// Optional classifier (e.g. `sources`).
    pub classifier: Option<String>,
    /// Version string.
    pub version: String,
}

impl CoordinateParts {
    /// Returns the Maven file name: `artifact-version[-classifier].type`.
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact, self.version, classifier, self.packaging
            ),
            None => format!("{}-{}.{}", self.artifact, self.version, self.packaging),
        }
    }

    /// Returns the group with every `.` turned into a directory level.
    pub fn group_path(&self) -> PathBuf {
        self.group.split('.').collect()
    }

    /// Returns the path of the artifact relative to a Maven repository root:
    /// `group/as/dirs/artifact/version/file`.
    pub fn repository_path(&self) -> PathBuf {
        self.group_path()
            .join(&self.artifact)
            .join(&self.version)
            .join(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_four_fields() {
        let coord = ArtifactCoordinate::new("org.apache.felix:org.osgi.core:jar:1.4.0");
        let parts = coord.parse().unwrap();

        assert_eq!(parts.group, "org.apache.felix");
        assert_eq!(parts.artifact, "org.osgi.core");
        assert_eq!(parts.packaging, "jar");
        assert_eq!(parts.classifier, None);
        assert_eq!(parts.version, "1.4.0");
        assert_eq!(parts.file_name(), "org.osgi.core-1.4.0.jar");
    }

    #[test]
    fn test_parse_with_classifier() {
        let coord = ArtifactCoordinate::new("org.example:widget:jar:sources:2.0");
        let parts = coord.parse().unwrap();

        assert_eq!(parts.classifier.as_deref(), Some("sources"));
        assert_eq!(parts.file_name(), "widget-2.0-sources.jar");
    }

    #[test]
    fn test_repository_path_structure() {
        let parts = ArtifactCoordinate::new("org.ops4j.pax.logging:pax-logging-api:jar:1.3.0")
            .parse()
            .unwrap();

        assert_eq!(
            parts.repository_path(),
            PathBuf::from("org/ops4j/pax/logging/pax-logging-api/1.3.0/pax-logging-api-1.3.0.jar")
        );
    }

    #[test]
    fn test_parse_rejects_path_separators() {
        let coord = ArtifactCoordinate::new("org/../etc:passwd:jar:1.0");
        assert!(matches!(
            coord.parse(),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_dot_fields() {
        let coord = ArtifactCoordinate::new("org.example:..:jar:1.0");
        assert!(coord.parse().is_err());
    }

    #[test]
    fn test_display_is_verbatim() {
        let coord = ArtifactCoordinate::new("not even a coordinate");
        assert_eq!(coord.to_string(), "not even a coordinate");
    }
}
