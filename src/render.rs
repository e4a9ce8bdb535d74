//! # Credits Rendering
//!
//! Thin adapter between the selected credits and the `tera` template engine.
//! The selection is exposed to the template as the `credits` variable: a
//! sequence of records with `key`, `force`, `component`, `owner` and
//! `license`. Owners and licenses carry a `kind` field (`inline` or
//! `reference`) together with their `text` or `key`.
//!
//! Templates whose name ends in `.html`, `.htm` or `.xml` are autoescaped.

use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::error::{Error, Result};
use crate::model::CreditItem;

/// Template variable holding the selected credits.
pub const CREDITS_VAR: &str = "credits";

/// Name under which the built-in template is registered.
pub const BUILTIN_TEMPLATE_NAME: &str = "credits.html";

const BUILTIN_TEMPLATE: &str = include_str!("templates/credits.html");

/// Where the credits template comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// The HTML template shipped with the crate.
    #[default]
    Builtin,
    /// A template file on disk.
    File(PathBuf),
}

/// A compiled credits template.
pub struct CreditsRenderer {
    tera: Tera,
    name: String,
}

impl CreditsRenderer {
    /// Compiles the template.
    pub fn new(source: &TemplateSource) -> Result<Self> {
        let mut tera = Tera::default();
        let name = match source {
            TemplateSource::Builtin => {
                tera.add_raw_template(BUILTIN_TEMPLATE_NAME, BUILTIN_TEMPLATE)
                    .map_err(|e| template_error(&e, BUILTIN_TEMPLATE_NAME))?;
                BUILTIN_TEMPLATE_NAME.to_string()
            }
            TemplateSource::File(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| Error::Template {
                        message: "template path has no file name".to_string(),
                        template: Some(path.display().to_string()),
                    })?;
                tera.add_template_file(path, Some(&name))
                    .map_err(|e| template_error(&e, &path.display().to_string()))?;
                name
            }
        };

        Ok(Self { tera, name })
    }

    /// Renders the selected credits.
    pub fn render(&self, credits: &[&CreditItem]) -> Result<String> {
        let mut context = Context::new();
        context.insert(CREDITS_VAR, credits);
        self.tera
            .render(&self.name, &context)
            .map_err(|e| template_error(&e, &self.name))
    }
}

/// Writes the rendered credits to `dir/name`, creating `dir` if needed.
pub fn write_output(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, content)?;
    log::info!("Wrote credits file {}", path.display());
    Ok(path)
}

/// Flattens a tera error and its causes into one message.
fn template_error(err: &tera::Error, template: &str) -> Error {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    Error::Template {
        message,
        template: Some(template.to_string()),
    }
}
