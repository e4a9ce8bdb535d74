//! Dependency lists.
//!
//! The coordinates of the dependencies actually pulled into a build are
//! resolved by the build tool and handed over as a plain text list, one
//! coordinate per line:
//!
//! ```text
//! # runtime dependencies of the release variant
//! com.github.bumptech.glide:glide:4.16.0
//! org.apache.commons:commons-lang3
//! ```
//!
//! Blank lines and `#` comments are skipped; a trailing version is ignored.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::ArtifactCoordinate;

/// Parses a dependency list.
pub fn parse_dependency_list(content: &str) -> Result<Vec<ArtifactCoordinate>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((idx, line))
        })
        .map(|(idx, line)| {
            line.parse::<ArtifactCoordinate>().map_err(|e| match e {
                Error::InvalidCoordinate { value, message } => Error::InvalidCoordinate {
                    value,
                    message: format!("{} (line {})", message, idx + 1),
                },
                other => other,
            })
        })
        .collect()
}

/// Reads and parses a dependency list file.
pub fn read_dependency_list(path: &Path) -> Result<Vec<ArtifactCoordinate>> {
    let content = fs::read_to_string(path)?;
    let dependencies = parse_dependency_list(&content)?;
    log::debug!(
        "Read {} dependencies from {}",
        dependencies.len(),
        path.display()
    );
    Ok(dependencies)
}
