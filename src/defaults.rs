//! Default values for credits configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Name of the project configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".credits.yaml";

/// Name of the generated credits file.
pub const DEFAULT_OUTPUT_NAME: &str = "credits.html";

/// Directory the generated files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "build/credits";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "CREDITS_CONFIG";

/// Environment variable overriding the credit database location.
pub const DATABASE_ENV: &str = "CREDITS_DATABASE_URL";

/// Environment variable overriding the template file.
pub const TEMPLATE_ENV: &str = "CREDITS_TEMPLATE";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name_is_plain_file_name() {
        assert!(!DEFAULT_OUTPUT_NAME.contains('/'));
        assert!(DEFAULT_OUTPUT_NAME.ends_with(".html"));
    }

    #[test]
    fn test_env_names_share_prefix() {
        for name in [CONFIG_ENV, DATABASE_ENV, TEMPLATE_ENV] {
            assert!(name.starts_with("CREDITS_"), "{name}");
        }
    }
}
