//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `credits` crate. It uses the `thiserror` library to create a single
//! `Error` enum that covers every failure a credit database load, a
//! selection run, or a rendering step can produce.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. The document variants (`MissingAttribute`,
//!   `InvalidAttribute`, `MisplacedElement`, `UnbalancedElement`,
//!   `DuplicateKey`, `IncompleteCredit`, `UnresolvedReference`,
//!   `MalformedDocument`) abort a load. `Fetch` is raised when the document
//!   cannot be retrieved at all and is kept apart from the parse errors.
//!
//! - **`Location`**: A 1-based line/column pair attached to every error that
//!   is detected while the document is being scanned.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A dependency without a matching credit is not an error: the selection
//! engine logs it as a warning and carries on.

use std::fmt;

use thiserror::Error;

use crate::model::{CreditField, ReferenceKind};

/// Position inside a credit database document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub column: usize,
}

impl Location {
    /// Computes the location of a byte offset inside `source`.
    ///
    /// Offsets past the end of the source are clamped to the last position.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut end = offset.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }

        let consumed = &source[..end];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let column = consumed[line_start..].chars().count() + 1;

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Main error type for credit database operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required attribute is absent (or blank) on an element.
    #[error("Missing attribute {attribute} on element <{element}> at {location}.")]
    MissingAttribute {
        element: String,
        attribute: String,
        location: Location,
    },

    /// An attribute is present but its value cannot be interpreted.
    #[error("Invalid value '{value}' for attribute {attribute} on element <{element}> at {location}.")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        location: Location,
    },

    /// An element appears where its enclosing context forbids it.
    #[error("Element <{element}> not allowed {context} at {location}.")]
    MisplacedElement {
        element: String,
        /// Human readable description of where the element was found.
        context: String,
        location: Location,
    },

    /// A closing tag that does not match any open entity.
    #[error("End element </{element}> does not match any open element at {location}.")]
    UnbalancedElement { element: String, location: Location },

    /// A uniqueness constraint was violated.
    ///
    /// `constraint` names the constraint (`credit`, `artifact`, `owner` or
    /// `license`) and `value` the duplicated key.
    #[error("Duplicate key value [{value}] declared for {constraint} key at {location}.")]
    DuplicateKey {
        constraint: String,
        value: String,
        location: Location,
    },

    /// A credit is missing its component, owner or license once the whole
    /// document has been read.
    #[error("{field} undefined for credit with key {key}.")]
    IncompleteCredit { key: String, field: CreditField },

    /// A credit refers to an owner or license key its registry does not
    /// declare.
    #[error("Credit with key {credit} refers to undefined {kind} key {key}.")]
    UnresolvedReference {
        credit: String,
        kind: ReferenceKind,
        key: String,
    },

    /// The document is not well-formed XML.
    #[error("Malformed credit database at {location}: {message}")]
    MalformedDocument { message: String, location: Location },

    /// The document could not be retrieved.
    #[error("Failed to fetch credit database {location}: {message}")]
    Fetch { location: String, message: String },

    /// A dependency coordinate could not be parsed.
    #[error("Invalid artifact coordinate '{value}': {message}")]
    InvalidCoordinate { value: String, message: String },

    /// An error occurred while parsing the `.credits.yaml` configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An error occurred while loading or rendering the credits template.
    #[error("Template processing error: {message}{}", template.as_ref().map(|t| format!(" (template: {})", t)).unwrap_or_default())]
    Template {
        message: String,
        /// The template that failed, if known
        template: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` for the errors raised while reading a document, as
    /// opposed to retrieving it or using its contents.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            Error::MissingAttribute { .. }
                | Error::InvalidAttribute { .. }
                | Error::MisplacedElement { .. }
                | Error::UnbalancedElement { .. }
                | Error::DuplicateKey { .. }
                | Error::IncompleteCredit { .. }
                | Error::UnresolvedReference { .. }
                | Error::MalformedDocument { .. }
        )
    }

    /// The document location attached to this error, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::MissingAttribute { location, .. }
            | Error::InvalidAttribute { location, .. }
            | Error::MisplacedElement { location, .. }
            | Error::UnbalancedElement { location, .. }
            | Error::DuplicateKey { location, .. }
            | Error::MalformedDocument { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
