//! End-of-document validation.
//!
//! References may point at registry entries declared later in the document,
//! so they are resolved here, once every credit and every registry entry has
//! been read. The pass also turns each `PendingCredit` into a complete
//! `CreditItem`.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{CreditField, CreditItem, License, Owner, ReferenceKind};

/// Registry entries: key to canonical text.
pub(crate) type Registry = HashMap<String, String>;

/// Owner and license registries, each present only if the document declares
/// the corresponding section.
#[derive(Debug, Default)]
pub(crate) struct Registries {
    pub owners: Option<Registry>,
    pub licenses: Option<Registry>,
}

impl Registries {
    fn get(&self, kind: ReferenceKind) -> Option<&Registry> {
        match kind {
            ReferenceKind::Owner => self.owners.as_ref(),
            ReferenceKind::License => self.licenses.as_ref(),
        }
    }
}

/// A credit whose mandatory fields may still be missing.
#[derive(Debug, Clone)]
pub(crate) struct PendingCredit {
    pub key: String,
    pub force: bool,
    pub component: Option<String>,
    pub owner: Option<Owner>,
    pub license: Option<License>,
}

impl PendingCredit {
    pub fn new(key: String, force: bool) -> Self {
        Self {
            key,
            force,
            component: None,
            owner: None,
            license: None,
        }
    }
}

/// Validates every credit and resolves its references.
///
/// Credits are visited in key order so that the reported error does not
/// depend on hash ordering.
pub(crate) fn finalize(
    credits: HashMap<String, PendingCredit>,
    registries: &Registries,
) -> Result<HashMap<String, CreditItem>> {
    let mut pending: Vec<PendingCredit> = credits.into_values().collect();
    pending.sort_by(|a, b| a.key.cmp(&b.key));

    let mut resolved = HashMap::with_capacity(pending.len());
    for credit in pending {
        let credit = check_credit(credit, registries)?;
        resolved.insert(credit.key.clone(), credit);
    }

    Ok(resolved)
}

fn check_credit(credit: PendingCredit, registries: &Registries) -> Result<CreditItem> {
    let incomplete = |field| Error::IncompleteCredit {
        key: credit.key.clone(),
        field,
    };

    let component = credit
        .component
        .clone()
        .filter(|component| !component.trim().is_empty())
        .ok_or_else(|| incomplete(CreditField::Component))?;

    let owner = match credit.owner.clone() {
        Some(Owner::Reference { key }) => {
            match resolve(&credit.key, ReferenceKind::Owner, &key, registries)? {
                Some(text) => Owner::Inline { text },
                None => Owner::Reference { key },
            }
        }
        Some(owner @ Owner::Inline { .. }) => owner,
        None => return Err(incomplete(CreditField::Owner)),
    };

    let license = match credit.license.clone() {
        Some(License::Reference { key }) => {
            match resolve(&credit.key, ReferenceKind::License, &key, registries)? {
                Some(text) => License::Inline { text },
                None => License::Reference { key },
            }
        }
        Some(license @ License::Inline { .. }) => license,
        None => return Err(incomplete(CreditField::License)),
    };

    Ok(CreditItem {
        key: credit.key,
        force: credit.force,
        component,
        owner,
        license,
    })
}

/// Looks a reference up in its registry.
///
/// Returns `Ok(None)` when the document declares no registry of that kind:
/// the reference is then kept as-is, whatever the other registry holds.
fn resolve(
    credit: &str,
    kind: ReferenceKind,
    key: &str,
    registries: &Registries,
) -> Result<Option<String>> {
    let unresolved = || Error::UnresolvedReference {
        credit: credit.to_string(),
        kind,
        key: key.to_string(),
    };

    match registries.get(kind) {
        Some(registry) => registry.get(key).cloned().map(Some).ok_or_else(unresolved),
        None => Ok(None),
    }
}
