//! # Error Types
//!
//! Two failure families exist and they are handled very differently:
//!
//! - [`LoadError`] is per-file. The pipeline converts it into a single
//!   `Parse error:` issue at `$` and moves on to the next file.
//! - [`SchemaError`] is a startup failure. Nothing is validated without a
//!   schema, so it aborts the run before any file is read.

use std::path::PathBuf;

use thiserror::Error;

/// A document could not be read or parsed.
///
/// The `Display` text deliberately omits the path: the reporter already
/// shows the file in its own column.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable, not UTF-8).
    #[error("cannot read file: {source}")]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON.
    #[error("invalid JSON: {source}")]
    Json {
        /// Path of the document.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The file is not well-formed YAML.
    #[error("invalid YAML: {source}")]
    Yaml {
        /// Path of the document.
        path: PathBuf,
        /// Parser error with line and column.
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML parsed but has no JSON equivalent (e.g. a sequence used as
    /// a mapping key, or a non-finite float).
    #[error("YAML-to-JSON conversion failed: {reason}")]
    YamlConversion {
        /// Path of the document.
        path: PathBuf,
        /// What could not be represented.
        reason: String,
    },
}

impl LoadError {
    /// Path of the document that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Json { path, .. }
            | Self::Yaml { path, .. }
            | Self::YamlConversion { path, .. } => path,
        }
    }
}

/// The schema could not be loaded or compiled.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("cannot read schema {path}: {source}")]
    Read {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("schema {path} is not valid JSON: {source}")]
    Parse {
        /// Path of the schema file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The schema parsed but is neither an object nor a boolean.
    #[error("schema {path} must be a JSON object or boolean, found {found}")]
    NotASchema {
        /// Path of the schema file.
        path: PathBuf,
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// The schema engine rejected the schema (bad keyword values,
    /// unresolvable `$ref`, ...).
    #[error("schema {path} failed to compile: {reason}")]
    Compile {
        /// Path of the schema file.
        path: PathBuf,
        /// Engine-provided reason.
        reason: String,
    },
}
