//! # modelspec-core — Foundational Types
//!
//! Shared vocabulary for the ModelSpec validator. Nothing in this crate
//! touches the filesystem or the schema engine; it only defines the values
//! that flow between the loader, the validators and the reporter.
//!
//! ## Contents
//!
//! - [`Issue`]: one reported problem (file, display path, message).
//! - [`InstancePath`] / [`PathSegment`]: a typed location inside a parsed
//!   document, rendered as `$`, `$.spec.runtime` or `$.items[2]`.
//! - [`LoadError`] / [`SchemaError`]: per-file and startup failures.
//!
//! ## Crate Policy
//!
//! - No dependencies on other workspace crates.
//! - The path display format is user-facing output (CI logs, diffs) and
//!   must not change.

pub mod error;
pub mod issue;
pub mod path;

pub use error::{LoadError, SchemaError};
pub use issue::{Issue, IssueCounts, IssueKind, PARSE_ERROR_PREFIX, ROOT_PATH};
pub use path::{format_path, InstancePath, PathSegment};
