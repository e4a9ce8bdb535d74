//! # Credit Model
//!
//! Value types shared by the parser, the database and the selection engine.
//!
//! - **`CreditItem`**: one attributable component. Identity, equality,
//!   hashing and ordering are all based on the `key` alone.
//! - **`Owner`** / **`License`**: either inline text or a reference to an
//!   entry of the document's owner/license registry.
//! - **`ArtifactCoordinate`**: a `(groupId, artifactId)` pair used to look up
//!   the credit of a resolved dependency.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Which registry a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Owner,
    License,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Owner => f.write_str("owner"),
            ReferenceKind::License => f.write_str("license"),
        }
    }
}

/// Mandatory credit fields checked once the document has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditField {
    Component,
    Owner,
    License,
}

impl fmt::Display for CreditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditField::Component => f.write_str("Component"),
            CreditField::Owner => f.write_str("Owner"),
            CreditField::License => f.write_str("License"),
        }
    }
}

/// Entity credited with the rights to a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Owner {
    /// Owner text given directly inside the credit.
    Inline { text: String },
    /// Key of an entry in the `owners` registry.
    Reference { key: String },
}

/// License governing a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum License {
    /// License text given directly inside the credit.
    Inline { text: String },
    /// Key of an entry in the `licenses` registry.
    Reference { key: String },
}

impl Owner {
    /// Display text, if this owner is inline.
    pub fn text(&self) -> Option<&str> {
        match self {
            Owner::Inline { text } => Some(text),
            Owner::Reference { .. } => None,
        }
    }

    /// Registry key, if this owner is still a reference.
    pub fn reference_key(&self) -> Option<&str> {
        match self {
            Owner::Inline { .. } => None,
            Owner::Reference { key } => Some(key),
        }
    }
}

impl License {
    /// Display text, if this license is inline.
    pub fn text(&self) -> Option<&str> {
        match self {
            License::Inline { text } => Some(text),
            License::Reference { .. } => None,
        }
    }

    /// Registry key, if this license is still a reference.
    pub fn reference_key(&self) -> Option<&str> {
        match self {
            License::Inline { .. } => None,
            License::Reference { key } => Some(key),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Inline { text } => f.write_str(text),
            Owner::Reference { key } => write!(f, "@{}", key),
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            License::Inline { text } => f.write_str(text),
            License::Reference { key } => write!(f, "@{}", key),
        }
    }
}

/// One attributable third-party component.
#[derive(Debug, Clone, Serialize)]
pub struct CreditItem {
    /// Unique key of the credit.
    pub key: String,
    /// Whether the component must be cited regardless of the dependencies.
    pub force: bool,
    /// Display name of the component.
    pub component: String,
    pub owner: Owner,
    pub license: License,
}

impl PartialEq for CreditItem {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CreditItem {}

impl Hash for CreditItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for CreditItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CreditItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Maven-style `(groupId, artifactId)` pair identifying a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
}

impl ArtifactCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Parses `group:artifact` or `group:artifact:version`; the version is
/// ignored because credits are associated with artifacts, not releases.
impl FromStr for ArtifactCoordinate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| Error::InvalidCoordinate {
            value: value.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = value.trim().split(':').map(str::trim).collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid("expected group:artifact[:version]"));
        }

        if parts[0].is_empty() {
            return Err(invalid("group is empty"));
        }

        if parts[1].is_empty() {
            return Err(invalid("artifact is empty"));
        }

        Ok(Self::new(parts[0], parts[1]))
    }
}
