//! # Configuration
//!
//! This module defines the `.credits.yaml` project configuration and the
//! logic for parsing it.
//!
//! ```yaml
//! database: https://example.org/credits.xml
//! template: templates/credits.html
//! output-name: credits.html
//! variants:
//!   debug: build/debug-deps.txt
//!   release: build/release-deps.txt
//! ```
//!
//! Every key is optional. Command-line flags and environment variables take
//! precedence over the file; relative paths are resolved against the
//! directory containing the configuration file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_OUTPUT_NAME;
use crate::error::{Error, Result};

/// Project configuration for credits generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CreditsConfig {
    /// Location of the credit database: a path or a URL.
    #[serde(default)]
    pub database: Option<String>,
    /// Template file. The built-in HTML template is used if unset.
    #[serde(default)]
    pub template: Option<PathBuf>,
    /// Name of the generated credits file.
    #[serde(default)]
    pub output_name: Option<String>,
    /// Build variants, each mapped to its dependency list file.
    #[serde(default)]
    pub variants: BTreeMap<String, PathBuf>,
}

impl CreditsConfig {
    /// Name of the generated file, falling back to the default.
    pub fn output_name(&self) -> &str {
        self.output_name.as_deref().unwrap_or(DEFAULT_OUTPUT_NAME)
    }

    /// Resolves relative paths against `base`.
    ///
    /// A relative database location is only rewritten when it is not a URL.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if let Some(database) = &self.database {
            if url::Url::parse(database).is_err() && Path::new(database).is_relative() {
                self.database = Some(base.join(database).to_string_lossy().into_owned());
            }
        }

        if let Some(template) = &self.template {
            if template.is_relative() {
                self.template = Some(base.join(template));
            }
        }

        for path in self.variants.values_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }

        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.output_name {
            if name.trim().is_empty() || name.contains(['/', '\\']) {
                return Err(Error::ConfigParse {
                    message: format!("Invalid output-name '{}'", name),
                    hint: Some("Use a plain file name such as credits.html".to_string()),
                });
            }
        }

        if let Some(name) = self.variants.keys().find(|name| name.trim().is_empty()) {
            return Err(Error::ConfigParse {
                message: format!("Invalid variant name '{}'", name),
                hint: None,
            });
        }

        Ok(())
    }
}

/// Parses a YAML string into a `CreditsConfig`.
pub fn parse(yaml_content: &str) -> Result<CreditsConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(CreditsConfig::default());
    }

    let config: CreditsConfig = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Supported keys are database, template, output-name and variants".to_string(),
        ),
    })?;
    config.validate()?;
    Ok(config)
}

/// Reads and parses a configuration file, resolving relative paths against
/// its directory.
pub fn from_file(path: &Path) -> Result<CreditsConfig> {
    let content = fs::read_to_string(path)?;
    let config = parse(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}
