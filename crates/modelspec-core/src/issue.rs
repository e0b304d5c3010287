//! # Issues
//!
//! The flat record every check produces. Issues are append-only data: the
//! pipeline collects them in discovery order and the reporter renders them
//! without further interpretation.

use std::fmt;

use crate::path::InstancePath;

/// Display path used for issues that concern the whole document.
pub const ROOT_PATH: &str = "$";

/// Prefix of every message produced for a file that failed to load.
pub const PARSE_ERROR_PREFIX: &str = "Parse error:";

/// Which stage of the pipeline produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// The file could not be read or parsed.
    Parse,
    /// Structural non-conformance reported by the schema engine.
    Schema,
    /// A cross-field business rule was violated.
    Semantic,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Schema => "schema",
            Self::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Source file, as it was discovered.
    pub file: String,
    /// `$` or a root-relative accessor such as `$.spec.runtime[0]`.
    pub path: String,
    /// Human-readable description.
    pub message: String,
    /// Stage that produced the issue.
    pub kind: IssueKind,
}

impl Issue {
    /// A load failure, reported at the document root.
    pub fn parse_error(file: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            file: file.into(),
            path: ROOT_PATH.to_string(),
            message: format!("{PARSE_ERROR_PREFIX} {error}"),
            kind: IssueKind::Parse,
        }
    }

    /// A schema engine error at `path`.
    pub fn schema(file: impl Into<String>, path: &InstancePath, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path: path.to_string(),
            message: message.into(),
            kind: IssueKind::Schema,
        }
    }

    /// A semantic rule violation at `path`.
    pub fn semantic(file: impl Into<String>, path: &InstancePath, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path: path.to_string(),
            message: message.into(),
            kind: IssueKind::Semantic,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.file, self.path, self.message)
    }
}

/// Per-kind tally of a run's issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub parse: usize,
    pub schema: usize,
    pub semantic: usize,
}

impl IssueCounts {
    /// Count `issues` by kind.
    pub fn tally<'a>(issues: impl IntoIterator<Item = &'a Issue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.kind {
                IssueKind::Parse => counts.parse += 1,
                IssueKind::Schema => counts.schema += 1,
                IssueKind::Semantic => counts.semantic += 1,
            }
        }
        counts
    }

    /// Issues of every kind.
    pub fn total(&self) -> usize {
        self.parse + self.schema + self.semantic
    }
}
