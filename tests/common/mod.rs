//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_database(fixtures::CREDITS_XML);
//! fixture.command().arg("validate").assert().success();
//! ```

use assert_fs::prelude::*;
use credits::defaults::{CONFIG_ENV, DATABASE_ENV, TEMPLATE_ENV};
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fixtures;
    pub use super::TestFixture;
}

/// Documents and dependency lists shared by the tests.
#[allow(dead_code)]
pub mod fixtures {
    /// Seven credits, two of them forced, with owner and license registries
    /// declared after the credits.
    pub const CREDITS_XML: &str = include_str!("../testdata/credits.xml");

    /// Dependencies of the release variant; one has no credit.
    pub const RELEASE_DEPS: &str = include_str!("../testdata/deps/release.txt");

    /// Dependencies of the debug variant.
    pub const DEBUG_DEPS: &str = include_str!("../testdata/deps/debug.txt");

    /// Configuration with two variants.
    pub const VARIANTS_CONFIG: &str = r#"
database: credits.xml
variants:
  debug: deps/debug.txt
  release: deps/release.txt
"#;

    /// A document with an unresolved owner reference.
    pub const INVALID_XML: &str = r#"<credits>
    <credit key="exoplayer">
        <component>Exo Player</component>
        <ownerRef keyref="google" />
        <license>Apache License, Version 2.0</license>
    </credit>
    <owners>
        <owner key="googleOS">Google Open Source</owner>
    </owners>
</credits>"#;
}

/// A temporary project directory for running the `credits` binary.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add `credits.xml` with the given content.
    pub fn with_database(self, content: &str) -> Self {
        self.with_file("credits.xml", content)
    }

    /// Add a `.credits.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".credits.yaml", content)
    }

    /// Add the two variant dependency lists under `deps/`.
    pub fn with_variants(self) -> Self {
        self.with_file("deps/release.txt", fixtures::RELEASE_DEPS)
            .with_file("deps/debug.txt", fixtures::DEBUG_DEPS)
            .with_config(fixtures::VARIANTS_CONFIG)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn database_path(&self) -> PathBuf {
        self.temp_dir.path().join("credits.xml")
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory, isolated from
    /// any `CREDITS_*` variables of the calling environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("credits");
        cmd.current_dir(self.path())
            .env_remove(CONFIG_ENV)
            .env_remove(DATABASE_ENV)
            .env_remove(TEMPLATE_ENV)
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
