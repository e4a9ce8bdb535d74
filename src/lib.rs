//! # Credits Library
//!
//! Loads a credit database, an XML document that attributes third-party
//! components to their owners and licenses, and selects the credits that
//! apply to a build from the coordinates of its resolved dependencies.
//!
//! ## Quick Example
//!
//! ```
//! use credits::database::CreditDatabase;
//! use credits::model::ArtifactCoordinate;
//! use credits::selection::select;
//!
//! let database = CreditDatabase::parse(r#"
//! <credits>
//!     <credit key="libX">
//!         <component>LibX</component>
//!         <owner>Acme</owner>
//!         <license>MIT</license>
//!         <artifact groupId="com.acme" artifactId="libx" />
//!     </credit>
//!     <credit key="core" force="true">
//!         <component>Core</component>
//!         <ownerRef keyref="acme" />
//!         <licenseRef keyref="mit" />
//!     </credit>
//!     <owners><owner key="acme">Acme Corp</owner></owners>
//!     <licenses><license key="mit">MIT License</license></licenses>
//! </credits>
//! "#).unwrap();
//!
//! let selection = select(&database, vec![ArtifactCoordinate::new("com.acme", "libx")]);
//! assert_eq!(selection.keys(), vec!["core", "libX"]);
//! assert_eq!(selection.credits()[0].owner.text(), Some("Acme Corp"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Database (`database`)**: the validated, immutable index of credits by
//!   key and by artifact coordinate. Built once per load and safe to share
//!   between threads.
//! - **Parsing (`parser`)**: a single streaming pass over the document with
//!   deferred resolution of owner and license references, so registries may
//!   appear after the credits that refer to them.
//! - **Selection (`selection`)**: forced credits plus the credits matching
//!   the dependencies, deduplicated and ordered by key.
//! - **Rendering (`render`)**: hands the selection to a `tera` template.
//!
//! The remaining modules (`config`, `dependencies`, `fetch`, `output`,
//! `suggestions`) support the `credits` command-line tool.

pub mod config;
pub mod database;
pub mod defaults;
pub mod dependencies;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
mod parser;
pub mod render;
pub mod selection;
pub mod suggestions;
