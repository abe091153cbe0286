//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_state(states::SINGLE_LIBRARY)
//!         .with_file("foo/gen.rs", "// generated");
//!     fixture.command().arg("plan").arg("--library").arg("foo").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::states;
    pub use super::TestFixture;
}

/// State file snippets for testing.
#[allow(dead_code)]
pub mod states {
    /// One library rooted at `foo/`, removing everything except `keep.txt`.
    pub const SINGLE_LIBRARY: &str = r#"
libraries:
  - id: foo
    version: 1.0.0
    source_roots: [foo]
    remove_regex: ['.*']
    preserve_regex: ['keep\.txt$']
"#;

    /// Two libraries sharing a repository.
    pub const TWO_LIBRARIES: &str = r#"
libraries:
  - id: foo
    source_roots: [foo]
    remove_regex: ['^foo/']
  - id: bar
    source_roots: [bar]
    remove_regex: ['^bar/.*\.rs$']
"#;

    /// A library with no source roots: cleanup must be a no-op.
    pub const NO_SOURCE_ROOTS: &str = r#"
libraries:
  - id: foo
    remove_regex: ['.*']
"#;

    /// A state file with problems `validate` must report.
    pub const INVALID: &str = r#"
libraries:
  - id: foo
    version: one
    source_roots: [../outside]
    remove_regex: ['[bad(']
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "libraries: [unclosed";
}

/// A temporary repository checkout with an optional state file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `.librarian/state.yaml` with the given content.
    pub fn with_state(self, content: &str) -> Self {
        self.temp_dir
            .child(".librarian/state.yaml")
            .write_str(content)
            .expect("Failed to write state file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add an empty directory.
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Add a symlink at `path` pointing at `target` (stored verbatim).
    #[cfg(unix)]
    pub fn with_symlink(self, path: &str, target: &str) -> Self {
        let link = self.temp_dir.path().join(path);
        std::fs::create_dir_all(link.parent().expect("symlink has a parent"))
            .expect("Failed to create symlink parent");
        std::os::unix::fs::symlink(target, link).expect("Failed to create symlink");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of a file inside the fixture.
    pub fn join(&self, path: &str) -> PathBuf {
        self.temp_dir.path().join(path)
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("librarian-reconcile");
        cmd.current_dir(self.path()).env_remove("LIBRARIAN_STATE");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
