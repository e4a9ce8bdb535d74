//! # Credit Selection
//!
//! Computes the credits that apply to a build from its resolved dependencies.
//!
//! ## Process
//!
//! 1.  **Forced credits**: every credit with `force = true` is selected,
//!     whatever the dependencies are.
//!
//! 2.  **Dependency lookup**: each dependency coordinate is looked up in the
//!     database. A match adds its credit; several dependencies mapping to the
//!     same credit add it once. A dependency without a credit is logged as a
//!     warning and skipped.
//!
//! 3.  **Ordering**: the selected credits are kept in a `BTreeSet`, so the
//!     result is ordered by key regardless of the order in which the
//!     dependencies were supplied or the credits were declared.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::database::CreditDatabase;
use crate::model::{ArtifactCoordinate, CreditItem};

/// Outcome of a selection run.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    credits: Vec<&'a CreditItem>,
    unmatched: Vec<ArtifactCoordinate>,
}

impl<'a> Selection<'a> {
    /// Selected credits, ordered by key, each appearing once.
    pub fn credits(&self) -> &[&'a CreditItem] {
        &self.credits
    }

    /// Dependencies that have no credit, ordered and deduplicated.
    pub fn unmatched(&self) -> &[ArtifactCoordinate] {
        &self.unmatched
    }

    pub fn into_credits(self) -> Vec<&'a CreditItem> {
        self.credits
    }

    /// Keys of the selected credits, in output order.
    pub fn keys(&self) -> Vec<&'a str> {
        self.credits.iter().map(|credit| credit.key.as_str()).collect()
    }
}

/// Selects the credits applicable to a set of dependencies.
pub fn select<'a, I>(database: &'a CreditDatabase, dependencies: I) -> Selection<'a>
where
    I: IntoIterator<Item = ArtifactCoordinate>,
{
    let mut credits: BTreeSet<&'a CreditItem> = database.forced().collect();
    let mut unmatched = BTreeSet::new();

    for artifact in dependencies {
        debug!("Detect artifact {}.", artifact);
        match database.lookup_by_artifact(&artifact) {
            Some(credit) => {
                credits.insert(credit);
            }
            None => {
                warn!("No credit found for artifact {}.", artifact);
                unmatched.insert(artifact);
            }
        }
    }

    Selection {
        credits: credits.into_iter().collect(),
        unmatched: unmatched.into_iter().collect(),
    }
}
