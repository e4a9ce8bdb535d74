//! Per-document parse state.
//!
//! `ParseContext` is owned by a single `parser::parse` call. It holds the
//! entities that are currently open (at most one credit, one owner registry
//! entry and one license registry entry), the registries declared so far and
//! the text collected for the innermost leaf element.

use std::collections::HashMap;

use super::finalize::{self, PendingCredit, Registries, Registry};
use super::ParsedDocument;
use crate::error::{Error, Location, Result};
use crate::model::{ArtifactCoordinate, License, Owner, ReferenceKind};

pub(crate) const CREDIT_ELEMENT: &str = "credit";
pub(crate) const COMPONENT_ELEMENT: &str = "component";
pub(crate) const OWNER_ELEMENT: &str = "owner";
pub(crate) const LICENSE_ELEMENT: &str = "license";
pub(crate) const OWNER_REF: &str = "ownerRef";
pub(crate) const LICENSE_REF: &str = "licenseRef";
pub(crate) const ARTIFACT_ELEMENT: &str = "artifact";
pub(crate) const OWNER_DATABASE: &str = "owners";
pub(crate) const LICENSE_DATABASE: &str = "licenses";

const KEY_ATTR: &str = "key";
const KEYREF_ATTR: &str = "keyref";
const FORCE_ATTR: &str = "force";
const GROUPID_ATTR: &str = "groupId";
const ARTIFACTID_ATTR: &str = "artifactId";

/// Byte offset of an event inside the document being parsed.
///
/// Converted to a line and column only when an error is reported, since
/// that conversion scans the document from the start.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Position<'a> {
    pub source: &'a str,
    pub offset: usize,
}

impl Position<'_> {
    pub fn location(self) -> Location {
        Location::from_offset(self.source, self.offset)
    }
}

/// An element-enter event with its attributes decoded.
#[derive(Debug, Clone, Default)]
pub(crate) struct StartTag {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl StartTag {
    /// Returns the attribute value, treating blank values as absent.
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str, at: Position<'_>) -> Result<String> {
        self.attribute(name)
            .map(|value| value.trim().to_string())
            .ok_or_else(|| Error::MissingAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
                location: at.location(),
            })
    }

    /// Parses an `xs:boolean` attribute; absent means `false`.
    fn boolean(&self, name: &str, at: Position<'_>) -> Result<bool> {
        match self.attribute(name).map(str::trim) {
            None | Some("false") | Some("0") => Ok(false),
            Some("true") | Some("1") => Ok(true),
            Some(other) => Err(Error::InvalidAttribute {
                element: self.name.clone(),
                attribute: name.to_string(),
                value: other.to_string(),
                location: at.location(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    credits: HashMap<String, PendingCredit>,
    artifacts: HashMap<ArtifactCoordinate, String>,
    current_credit: Option<PendingCredit>,
    current_owner: Option<String>,
    current_license: Option<String>,
    owners: Option<Registry>,
    licenses: Option<Registry>,
    open_section: Option<ReferenceKind>,
    content: Option<String>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self, tag: &StartTag, at: Position<'_>) -> Result<()> {
        match tag.name.as_str() {
            CREDIT_ELEMENT => self.enter_credit(tag, at),
            OWNER_DATABASE => self.open_registry(tag, ReferenceKind::Owner, at),
            LICENSE_DATABASE => self.open_registry(tag, ReferenceKind::License, at),
            COMPONENT_ELEMENT => {
                if self.current_credit.is_none() {
                    return Err(misplaced(tag, "outside a credit", at));
                }

                self.collect_content();
                Ok(())
            }
            OWNER_ELEMENT => self.enter_attribution(tag, ReferenceKind::Owner, at),
            LICENSE_ELEMENT => self.enter_attribution(tag, ReferenceKind::License, at),
            OWNER_REF => {
                let credit = self
                    .current_credit
                    .as_mut()
                    .ok_or_else(|| misplaced(tag, "outside a credit", at))?;
                let key = tag.required(KEYREF_ATTR, at)?;
                credit.owner = Some(Owner::Reference { key });
                Ok(())
            }
            LICENSE_REF => {
                let credit = self
                    .current_credit
                    .as_mut()
                    .ok_or_else(|| misplaced(tag, "outside a credit", at))?;
                let key = tag.required(KEYREF_ATTR, at)?;
                credit.license = Some(License::Reference { key });
                Ok(())
            }
            ARTIFACT_ELEMENT => self.enter_artifact(tag, at),
            _ => Ok(()),
        }
    }

    pub fn exit(&mut self, name: &str, at: Position<'_>) -> Result<()> {
        match name {
            CREDIT_ELEMENT => {
                let credit = self
                    .current_credit
                    .take()
                    .ok_or_else(|| unbalanced(name, at))?;
                log::debug!("Parsed credit {}", credit.key);
                self.credits.insert(credit.key.clone(), credit);
                Ok(())
            }
            COMPONENT_ELEMENT => {
                let text = self.collected_content();
                let credit = self
                    .current_credit
                    .as_mut()
                    .ok_or_else(|| unbalanced(name, at))?;
                credit.component = Some(text);
                Ok(())
            }
            OWNER_ELEMENT => {
                let text = self.collected_content();
                if let Some(credit) = self.current_credit.as_mut() {
                    credit.owner = Some(Owner::Inline { text });
                } else if let Some(key) = self.current_owner.take() {
                    self.owners
                        .get_or_insert_with(Registry::new)
                        .insert(key, text);
                } else {
                    return Err(unbalanced(name, at));
                }
                Ok(())
            }
            LICENSE_ELEMENT => {
                let text = self.collected_content();
                if let Some(credit) = self.current_credit.as_mut() {
                    credit.license = Some(License::Inline { text });
                } else if let Some(key) = self.current_license.take() {
                    self.licenses
                        .get_or_insert_with(Registry::new)
                        .insert(key, text);
                } else {
                    return Err(unbalanced(name, at));
                }
                Ok(())
            }
            OWNER_DATABASE => self.close_registry(name, ReferenceKind::Owner, at),
            LICENSE_DATABASE => self.close_registry(name, ReferenceKind::License, at),
            _ => Ok(()),
        }
    }

    /// Appends character data to the leaf element being collected, if any.
    pub fn text(&mut self, text: &str) {
        if let Some(content) = self.content.as_mut() {
            content.push_str(text);
        }
    }

    /// Closes the document and runs the deferred validation pass.
    pub fn finish(self, end: Location) -> Result<ParsedDocument> {
        if let Some(credit) = &self.current_credit {
            return Err(Error::MalformedDocument {
                message: format!("unexpected end of document inside credit {}", credit.key),
                location: end,
            });
        }

        if let Some(kind) = self.open_section {
            return Err(Error::MalformedDocument {
                message: format!("unexpected end of document inside the {} registry", kind),
                location: end,
            });
        }

        let registries = Registries {
            owners: self.owners,
            licenses: self.licenses,
        };
        let credits = finalize::finalize(self.credits, &registries)?;

        Ok(ParsedDocument {
            credits,
            artifacts: self.artifacts,
        })
    }

    fn enter_credit(&mut self, tag: &StartTag, at: Position<'_>) -> Result<()> {
        if self.current_credit.is_some() {
            return Err(misplaced(tag, "inside another credit", at));
        }

        if let Some(kind) = self.open_section {
            return Err(misplaced(
                tag,
                &format!("inside the {} registry", kind),
                at,
            ));
        }

        let key = tag.required(KEY_ATTR, at)?;
        let force = tag.boolean(FORCE_ATTR, at)?;
        if self.credits.contains_key(&key) {
            return Err(duplicate("credit", key, at));
        }

        self.current_credit = Some(PendingCredit::new(key, force));
        Ok(())
    }

    fn enter_attribution(
        &mut self,
        tag: &StartTag,
        kind: ReferenceKind,
        at: Position<'_>,
    ) -> Result<()> {
        // Outside both a credit and its registry the text is still collected;
        // the element is rejected as unbalanced on exit.
        if self.current_credit.is_some() || self.open_section != Some(kind) {
            self.collect_content();
            return Ok(());
        }

        let key = tag.required(KEY_ATTR, at)?;
        let (registry, current) = match kind {
            ReferenceKind::Owner => (&self.owners, &mut self.current_owner),
            ReferenceKind::License => (&self.licenses, &mut self.current_license),
        };

        if current.is_some() {
            return Err(misplaced(
                tag,
                &format!("inside another {} entry", kind),
                at,
            ));
        }

        if registry.as_ref().is_some_and(|r| r.contains_key(&key)) {
            return Err(duplicate(&kind.to_string(), key, at));
        }

        *current = Some(key);
        self.collect_content();
        Ok(())
    }

    fn enter_artifact(&mut self, tag: &StartTag, at: Position<'_>) -> Result<()> {
        let credit = self
            .current_credit
            .as_ref()
            .ok_or_else(|| misplaced(tag, "outside a credit", at))?;
        let group_id = tag.required(GROUPID_ATTR, at)?;
        let artifact_id = tag.required(ARTIFACTID_ATTR, at)?;

        let coordinate = ArtifactCoordinate::new(group_id, artifact_id);
        if self.artifacts.contains_key(&coordinate) {
            return Err(duplicate("artifact", coordinate.to_string(), at));
        }

        self.artifacts.insert(coordinate, credit.key.clone());
        Ok(())
    }

    fn open_registry(
        &mut self,
        tag: &StartTag,
        kind: ReferenceKind,
        at: Position<'_>,
    ) -> Result<()> {
        if self.current_credit.is_some() {
            return Err(misplaced(tag, "inside a credit", at));
        }

        if self.open_section.is_some() {
            return Err(misplaced(tag, "inside another registry", at));
        }

        let registry = match kind {
            ReferenceKind::Owner => &mut self.owners,
            ReferenceKind::License => &mut self.licenses,
        };

        if registry.is_some() {
            return Err(misplaced(tag, "more than once", at));
        }

        *registry = Some(Registry::new());
        self.open_section = Some(kind);
        Ok(())
    }

    fn close_registry(&mut self, name: &str, kind: ReferenceKind, at: Position<'_>) -> Result<()> {
        if self.open_section != Some(kind) {
            return Err(unbalanced(name, at));
        }

        self.open_section = None;
        Ok(())
    }

    fn collect_content(&mut self) {
        self.content = Some(String::new());
    }

    fn collected_content(&mut self) -> String {
        self.content
            .take()
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }
}

fn misplaced(tag: &StartTag, context: &str, at: Position<'_>) -> Error {
    Error::MisplacedElement {
        element: tag.name.clone(),
        context: context.to_string(),
        location: at.location(),
    }
}

fn unbalanced(name: &str, at: Position<'_>) -> Error {
    Error::UnbalancedElement {
        element: name.to_string(),
        location: at.location(),
    }
}

fn duplicate(constraint: &str, value: String, at: Position<'_>) -> Error {
    Error::DuplicateKey {
        constraint: constraint.to_string(),
        value,
        location: at.location(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: Position<'static> = Position {
        source: "",
        offset: 0,
    };

    fn tag(name: &str, attributes: &[(&str, &str)]) -> StartTag {
        StartTag {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn leaf(context: &mut ParseContext, name: &str, attributes: &[(&str, &str)], text: &str) {
        context.enter(&tag(name, attributes), AT).unwrap();
        context.text(text);
        context.exit(name, AT).unwrap();
    }

    #[test]
    fn test_text_is_accumulated_across_events() {
        let mut context = ParseContext::new();
        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        context.enter(&tag("component", &[]), AT).unwrap();
        context.text("  Gli");
        context.text("de \n");
        context.exit("component", AT).unwrap();

        let credit = context.current_credit.as_ref().unwrap();
        assert_eq!(credit.component.as_deref(), Some("Glide"));
    }

    #[test]
    fn test_text_outside_leaf_is_ignored() {
        let mut context = ParseContext::new();
        context.text("stray");
        assert!(context.content.is_none());
    }

    #[test]
    fn test_artifact_recorded_immediately() {
        let mut context = ParseContext::new();
        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        context
            .enter(
                &tag(
                    "artifact",
                    &[("groupId", "com.github.bumptech.glide"), ("artifactId", "glide")],
                ),
                AT,
            )
            .unwrap();

        let coordinate = ArtifactCoordinate::new("com.github.bumptech.glide", "glide");
        assert_eq!(context.artifacts.get(&coordinate).map(String::as_str), Some("glide"));
    }

    #[test]
    fn test_force_attribute_values() {
        let cases = [("true", true), ("1", true), ("false", false), ("0", false)];
        for (value, expected) in cases {
            let start = tag("credit", &[("key", "k"), ("force", value)]);
            assert_eq!(start.boolean(FORCE_ATTR, AT).unwrap(), expected);
        }

        let start = tag("credit", &[("key", "k"), ("force", "yes")]);
        assert!(matches!(
            start.boolean(FORCE_ATTR, AT),
            Err(Error::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let mut context = ParseContext::new();
        let err = context
            .enter(&tag("credit", &[("key", "   ")]), AT)
            .unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { ref attribute, .. } if attribute == "key"));
    }

    #[test]
    fn test_registry_entry_without_key() {
        let mut context = ParseContext::new();
        context.enter(&tag("licenses", &[]), AT).unwrap();
        let err = context.enter(&tag("license", &[]), AT).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute { ref element, ref attribute, .. }
                if element == "license" && attribute == "key"
        ));
    }

    #[test]
    fn test_reference_without_keyref() {
        for name in ["ownerRef", "licenseRef"] {
            let mut context = ParseContext::new();
            context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
            let err = context.enter(&tag(name, &[("keyref", "")]), AT).unwrap_err();
            assert!(matches!(
                err,
                Error::MissingAttribute { ref element, ref attribute, .. }
                    if element == name && attribute == "keyref"
            ));
        }
    }

    #[test]
    fn test_blank_group_id_is_missing() {
        let mut context = ParseContext::new();
        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        let err = context
            .enter(&tag("artifact", &[("groupId", " "), ("artifactId", "glide")]), AT)
            .unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { ref attribute, .. } if attribute == "groupId"));
        assert!(context.artifacts.is_empty());
    }

    #[test]
    fn test_duplicate_registry_key_after_credits() {
        let mut context = ParseContext::new();
        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        leaf(&mut context, "ownerRef", &[("keyref", "android")], "");
        context.exit("credit", AT).unwrap();

        context.enter(&tag("owners", &[]), AT).unwrap();
        leaf(&mut context, "owner", &[("key", "android")], "AOSP");
        let err = context
            .enter(&tag("owner", &[("key", "android")]), AT)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateKey { ref constraint, ref value, .. }
                if constraint == "owner" && value == "android"
        ));
    }

    #[test]
    fn test_root_level_owner_rejected_on_exit() {
        let mut context = ParseContext::new();
        context.enter(&tag("owner", &[]), AT).unwrap();
        context.text("X");
        let err = context.exit("owner", AT).unwrap_err();
        assert!(matches!(err, Error::UnbalancedElement { ref element, .. } if element == "owner"));
    }

    #[test]
    fn test_registry_entry_stored_on_exit() {
        let mut context = ParseContext::new();
        context.enter(&tag("owners", &[]), AT).unwrap();
        leaf(&mut context, "owner", &[("key", "android")], "The Android Open Source Project");
        context.exit("owners", AT).unwrap();

        let owners = context.owners.as_ref().unwrap();
        assert_eq!(
            owners.get("android").map(String::as_str),
            Some("The Android Open Source Project")
        );
        assert!(context.licenses.is_none());
    }

    #[test]
    fn test_inline_owner_after_registry_section() {
        let mut context = ParseContext::new();
        context.enter(&tag("owners", &[]), AT).unwrap();
        leaf(&mut context, "owner", &[("key", "android")], "AOSP");
        context.exit("owners", AT).unwrap();

        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        leaf(&mut context, "owner", &[], "Bump Technologies");

        let credit = context.current_credit.as_ref().unwrap();
        assert_eq!(
            credit.owner,
            Some(Owner::Inline {
                text: "Bump Technologies".to_string()
            })
        );
    }

    #[test]
    fn test_reference_outside_credit_is_misplaced() {
        let mut context = ParseContext::new();
        let err = context
            .enter(&tag("licenseRef", &[("keyref", "apache")]), AT)
            .unwrap_err();
        assert!(matches!(err, Error::MisplacedElement { .. }));
    }

    #[test]
    fn test_unbalanced_exits() {
        let mut context = ParseContext::new();
        assert!(matches!(
            context.exit("credit", AT),
            Err(Error::UnbalancedElement { .. })
        ));
        assert!(matches!(
            context.exit("owner", AT),
            Err(Error::UnbalancedElement { .. })
        ));
        assert!(matches!(
            context.exit("licenses", AT),
            Err(Error::UnbalancedElement { .. })
        ));
    }

    #[test]
    fn test_second_registry_section_is_misplaced() {
        let mut context = ParseContext::new();
        context.enter(&tag("licenses", &[]), AT).unwrap();
        context.exit("licenses", AT).unwrap();
        let err = context.enter(&tag("licenses", &[]), AT).unwrap_err();
        assert!(matches!(err, Error::MisplacedElement { ref context, .. } if context == "more than once"));
    }

    #[test]
    fn test_finish_inside_open_credit() {
        let mut context = ParseContext::new();
        context.enter(&tag("credit", &[("key", "glide")]), AT).unwrap();
        let err = context.finish(AT.location()).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
    }
}
