//! # Credit Database
//!
//! The validated, immutable result of loading one credit database document.
//! It holds two lookup structures:
//!
//! - credits by key, one entry per declared credit;
//! - credit key by artifact coordinate, one entry per declared artifact.
//!
//! Every credit key referenced by an artifact exists in the credit map. A
//! database is never mutated after construction, so it can be shared between
//! threads and queried concurrently without locking.

use std::collections::HashMap;

use crate::error::Result;
use crate::fetch;
use crate::model::{ArtifactCoordinate, CreditItem};
use crate::parser::{self, ParsedDocument};

/// Credit database.
#[derive(Debug, Clone, Default)]
pub struct CreditDatabase {
    credits: HashMap<String, CreditItem>,
    artifacts: HashMap<ArtifactCoordinate, String>,
}

impl CreditDatabase {
    fn new(document: ParsedDocument) -> Self {
        let ParsedDocument { credits, artifacts } = document;
        debug_assert!(
            artifacts.values().all(|key| credits.contains_key(key)),
            "artifact associated with an undeclared credit"
        );

        Self { credits, artifacts }
    }

    /// Loads a database from a file path or URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` if the document cannot be retrieved, or one of
    /// the document errors if it fails validation.
    pub fn load(location: &str) -> Result<Self> {
        let source = fetch::fetch_document(location)?;
        let database = Self::parse(&source)?;
        log::info!(
            "Loaded {} credits and {} artifacts from {}",
            database.len(),
            database.artifact_count(),
            location
        );
        Ok(database)
    }

    /// Parses a database from an in-memory document.
    pub fn parse(source: &str) -> Result<Self> {
        parser::parse(source).map(Self::new)
    }

    /// Gets the credit corresponding to an artifact.
    ///
    /// Returns `None` if no credit declares the artifact.
    ///
    /// # Panics
    ///
    /// Panics if the artifact is associated with a key that has no credit,
    /// which a successful load never produces.
    pub fn lookup_by_artifact(&self, artifact: &ArtifactCoordinate) -> Option<&CreditItem> {
        let key = self.artifacts.get(artifact)?;
        match self.credits.get(key) {
            Some(credit) => Some(credit),
            None => panic!("No credit for key {}.", key),
        }
    }

    /// Gets a credit by key.
    pub fn get(&self, key: &str) -> Option<&CreditItem> {
        self.credits.get(key)
    }

    /// All credits, ordered by key.
    pub fn credits(&self) -> Vec<&CreditItem> {
        let mut credits: Vec<&CreditItem> = self.credits.values().collect();
        credits.sort();
        credits
    }

    /// Credits that must be cited regardless of the dependencies.
    pub fn forced(&self) -> impl Iterator<Item = &CreditItem> {
        self.credits.values().filter(|credit| credit.force)
    }

    /// Artifacts declared for the credit with the given key, ordered.
    pub fn artifacts_of(&self, key: &str) -> Vec<&ArtifactCoordinate> {
        let mut artifacts: Vec<&ArtifactCoordinate> = self
            .artifacts
            .iter()
            .filter(|(_, credit)| credit.as_str() == key)
            .map(|(artifact, _)| artifact)
            .collect();
        artifacts.sort();
        artifacts
    }

    /// Number of credits.
    pub fn len(&self) -> usize {
        self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credits.is_empty()
    }

    /// Number of artifact associations.
    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }
}
