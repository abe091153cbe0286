//! # Library State Schema and Parsing
//!
//! This module defines the data structures for `.librarian/state.yaml`, the
//! per-repository file listing every generated library together with the
//! rules that govern its cleanup.
//!
//! ## Key Components
//!
//! - **`LibrarianState`**: The whole file: an optional generator image and a
//!   list of libraries.
//!
//! - **`LibraryState`**: One library: its id, the source roots that bound
//!   generated code, and the remove/preserve regexes applied inside them.
//!
//! ## Example
//!
//! ```yaml
//! image: gcr.io/example/generator:1.0
//! libraries:
//!   - id: google-cloud-secretmanager
//!     version: 1.4.0
//!     apis:
//!       - path: google/cloud/secretmanager/v1
//!     source_roots:
//!       - packages/google-cloud-secretmanager
//!     remove_regex:
//!       - "^packages/google-cloud-secretmanager/src/generated/"
//!     preserve_regex:
//!       - "CHANGELOG\\.md$"
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patterns::PatternSet;

/// An API a library is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Api {
    /// Path of the API definition, e.g. `google/cloud/foo/v1`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_config: Option<String>,
}

/// One generated library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryState {
    /// Unique library identifier.
    pub id: String,
    /// Released version, if any. Must be valid semver when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated_commit: Option<String>,
    #[serde(default)]
    pub apis: Vec<Api>,
    /// Directories, relative to the repository root, holding generated code.
    ///
    /// With no source roots nothing is ever removed for this library.
    #[serde(default)]
    pub source_roots: Vec<String>,
    /// Regexes protecting paths from removal.
    #[serde(default)]
    pub preserve_regex: Vec<String>,
    /// Regexes selecting paths for removal before new output is copied in.
    #[serde(default)]
    pub remove_regex: Vec<String>,
}

/// The contents of a state file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarianState {
    /// Generator container image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub libraries: Vec<LibraryState>,
}

/// A problem found by [`LibrarianState::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Library the issue belongs to, if it could be identified.
    pub library: Option<String>,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.library {
            Some(id) => write!(f, "{}: {}", id, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl LibrarianState {
    /// Look up a library by id.
    pub fn library(&self, id: &str) -> Result<&LibraryState> {
        self.libraries
            .iter()
            .find(|lib| lib.id == id)
            .ok_or_else(|| Error::LibraryNotFound { id: id.to_string() })
    }

    /// Check the state for problems that would make reconciliation fail or
    /// misbehave. Returns every issue found; an empty list means valid.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for (idx, lib) in self.libraries.iter().enumerate() {
            let label = if lib.id.is_empty() {
                issues.push(ValidationIssue {
                    library: None,
                    message: format!("library at index {} has an empty id", idx),
                });
                None
            } else {
                Some(lib.id.clone())
            };

            if !lib.id.is_empty() && !seen.insert(lib.id.as_str()) {
                issues.push(ValidationIssue {
                    library: label.clone(),
                    message: "duplicate library id".to_string(),
                });
            }

            if let Some(version) = &lib.version {
                if let Err(e) = semver::Version::parse(version) {
                    issues.push(ValidationIssue {
                        library: label.clone(),
                        message: format!("version '{}' is not valid semver: {}", version, e),
                    });
                }
            }

            for root in &lib.source_roots {
                if let Some(problem) = source_root_problem(root) {
                    issues.push(ValidationIssue {
                        library: label.clone(),
                        message: format!("source root '{}' {}", root, problem),
                    });
                }
            }

            for (field, patterns) in [
                ("remove_regex", &lib.remove_regex),
                ("preserve_regex", &lib.preserve_regex),
            ] {
                if let Err(e) = PatternSet::compile(patterns) {
                    issues.push(ValidationIssue {
                        library: label.clone(),
                        message: format!("{}: {}", field, e),
                    });
                }
            }
        }

        issues
    }
}

fn source_root_problem(root: &str) -> Option<&'static str> {
    let path = Path::new(root);
    if root.is_empty() {
        return Some("is empty");
    }
    if path.is_absolute() {
        return Some("must be relative to the repository root");
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Some("must not contain '..'");
    }
    None
}

/// Parse a state file from a YAML string.
pub fn parse(yaml_content: &str) -> Result<LibrarianState> {
    if yaml_content.trim().is_empty() {
        return Err(Error::ConfigParse {
            message: "state file is empty".to_string(),
            hint: Some("Add a 'libraries:' list".to_string()),
        });
    }
    let state = serde_yaml::from_str(yaml_content)?;
    Ok(state)
}

/// Parse a state file from disk.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LibrarianState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE: &str = r#"
image: gcr.io/example/generator:1.0
libraries:
  - id: google-cloud-foo
    version: 1.2.3
    last_generated_commit: abc123
    apis:
      - path: google/cloud/foo/v1
        service_config: foo_v1.yaml
    source_roots:
      - packages/foo
    remove_regex:
      - "^packages/foo/src/"
    preserve_regex:
      - "CHANGELOG\\.md$"
  - id: google-cloud-bar
"#;

    #[test]
    fn test_parse_state() {
        let state = parse(STATE).unwrap();
        assert_eq!(state.image.as_deref(), Some("gcr.io/example/generator:1.0"));
        assert_eq!(state.libraries.len(), 2);

        let foo = &state.libraries[0];
        assert_eq!(foo.id, "google-cloud-foo");
        assert_eq!(foo.version.as_deref(), Some("1.2.3"));
        assert_eq!(foo.apis[0].path, "google/cloud/foo/v1");
        assert_eq!(foo.apis[0].service_config.as_deref(), Some("foo_v1.yaml"));
        assert_eq!(foo.source_roots, vec!["packages/foo"]);
        assert_eq!(foo.remove_regex, vec!["^packages/foo/src/"]);
        assert_eq!(foo.preserve_regex, vec![r"CHANGELOG\.md$"]);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let state = parse(STATE).unwrap();
        let bar = state.library("google-cloud-bar").unwrap();
        assert!(bar.source_roots.is_empty());
        assert!(bar.remove_regex.is_empty());
        assert!(bar.preserve_regex.is_empty());
        assert!(bar.version.is_none());
    }

    #[test]
    fn test_library_not_found() {
        let state = parse(STATE).unwrap();
        let err = state.library("missing").unwrap_err();
        assert!(matches!(err, Error::LibraryNotFound { id } if id == "missing"));
    }

    #[test]
    fn test_parse_empty_is_error() {
        let err = parse("   \n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse("libraries: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file("/nonexistent/state.yaml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_validate_valid_state() {
        let state = parse(STATE).unwrap();
        assert!(state.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let yaml = r#"
libraries:
  - id: dup
    version: not-a-version
    source_roots: ["/abs", "../escape", "ok"]
    remove_regex: ["[bad("]
  - id: dup
    preserve_regex: ["(unclosed"]
  - id: ""
"#;
        let issues = parse(yaml).unwrap().validate();
        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();

        assert!(messages.iter().any(|m| m.contains("not valid semver")));
        assert!(messages.iter().any(|m| m.contains("'/abs' must be relative")));
        assert!(messages.iter().any(|m| m.contains("'../escape' must not contain")));
        assert!(messages.iter().any(|m| m.contains("remove_regex")));
        assert!(messages.iter().any(|m| m.contains("preserve_regex")));
        assert!(messages.iter().any(|m| m == "dup: duplicate library id"));
        assert!(messages.iter().any(|m| m.contains("index 2 has an empty id")));
        assert_eq!(issues.len(), 7);
    }

    #[test]
    fn test_state_round_trips_through_yaml() {
        let state = parse(STATE).unwrap();
        let yaml = serde_yaml::to_string(&state).unwrap();
        assert_eq!(parse(&yaml).unwrap(), state);
    }
}
