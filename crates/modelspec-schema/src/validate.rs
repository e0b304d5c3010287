//! # Schema Validation
//!
//! Validates parsed documents against a single JSON Schema (Draft 2020-12).
//!
//! ## Design
//!
//! [`SchemaValidator`] reads and compiles the schema once, at startup, and
//! is then shared read-only by every document in the run. For each document
//! it returns every engine error, converted to a typed [`InstancePath`] plus
//! the engine's message, sorted by path. Sorting is stable, so errors at the
//! same location keep the engine's own order and output is identical from
//! run to run.
//!
//! ## Schema Resolution
//!
//! `$ref`s are resolved from disk only:
//!
//! - `file://` URIs are read directly.
//! - Relative references in a schema without `$id` resolve against the
//!   engine's default base `json-schema:///` and are read relative to the
//!   directory that holds the root schema.
//! - Any other URI is looked up by its last path segment in that same
//!   directory; when no such file exists the schema fails to compile.
//!
//! The engine never makes a network request.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use modelspec_core::{InstancePath, Issue, SchemaError};

/// Base URI the engine assigns to a root schema that has no `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Retriever that serves `$ref` targets from the schema's own directory.
struct LocalSchemaRetriever {
    /// Directory holding the root schema.
    base_dir: PathBuf,
}

impl LocalSchemaRetriever {
    fn locate(&self, uri: &str) -> Option<PathBuf> {
        let uri = uri.split('#').next().unwrap_or(uri);

        if let Some(path) = uri.strip_prefix("file://") {
            return Some(PathBuf::from(path));
        }

        if let Some(relative) = uri.strip_prefix(DEFAULT_BASE_URI) {
            return Some(self.base_dir.join(relative));
        }

        let filename = uri.rsplit('/').next().filter(|name| !name.is_empty())?;
        let candidate = self.base_dir.join(filename);
        candidate.is_file().then_some(candidate)
    }
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let path = self.locate(uri_str).ok_or_else(|| {
            format!("cannot resolve {uri_str}: remote schema references are not fetched")
        })?;

        tracing::debug!(uri = uri_str, path = %path.display(), "resolving schema reference");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| format!("{} is not valid JSON: {e}", path.display()))?;
        Ok(value)
    }
}

/// One structural error reported by the schema engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location of the offending node in the validated document.
    pub path: InstancePath,
    /// Engine-provided description.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A compiled JSON Schema shared by every document in a run.
pub struct SchemaValidator {
    /// Absolute path of the schema file (or a label for in-memory schemas).
    schema_path: PathBuf,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_path", &self.schema_path)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Read, parse and compile the schema at `path`.
    ///
    /// The path is made absolute first so that relative `$ref`s resolve
    /// against the schema's real location.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`]. All of them are fatal to a run.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let read_err = |source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        };

        let schema_path = std::fs::canonicalize(path).map_err(read_err)?;
        let content = std::fs::read_to_string(&schema_path).map_err(read_err)?;
        let schema: Value =
            serde_json::from_str(&content).map_err(|source| SchemaError::Parse {
                path: schema_path.clone(),
                source,
            })?;

        let validator = Self::from_value(&schema, schema_path)?;
        tracing::info!(schema = %validator.schema_path.display(), "loaded schema");
        Ok(validator)
    }

    /// Compile an already-parsed schema. `schema_path` anchors relative
    /// `$ref`s (its parent directory) and labels errors.
    pub fn from_value(schema: &Value, schema_path: impl Into<PathBuf>) -> Result<Self, SchemaError> {
        let schema_path = schema_path.into();

        let found = match schema {
            Value::Object(_) | Value::Bool(_) => None,
            Value::Null => Some("null"),
            Value::Array(_) => Some("array"),
            Value::String(_) => Some("string"),
            Value::Number(_) => Some("number"),
        };
        if let Some(found) = found {
            return Err(SchemaError::NotASchema {
                path: schema_path,
                found,
            });
        }

        let base_dir = schema_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .with_retriever(LocalSchemaRetriever { base_dir })
            .build(schema)
            .map_err(|e| SchemaError::Compile {
                path: schema_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            schema_path,
            validator,
        })
    }

    /// Path of the compiled schema.
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Returns true when `instance` conforms to the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Every schema error for `instance`, sorted by instance path.
    pub fn violations(&self, instance: &Value) -> Vec<SchemaViolation> {
        let mut violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(instance)
            .map(|err| SchemaViolation {
                path: InstancePath::from_json_pointer(&err.instance_path.to_string(), instance),
                message: err.to_string(),
            })
            .collect();

        // Stable: equal paths keep engine order.
        violations.sort_by(|a, b| a.path.cmp(&b.path));
        violations
    }

    /// Validate `instance` and convert each error to an [`Issue`] for `file`.
    pub fn validate(&self, instance: &Value, file: &str) -> Vec<Issue> {
        if self.is_valid(instance) {
            return Vec::new();
        }
        self.violations(instance)
            .into_iter()
            .map(|v| {
                tracing::trace!(file, violation = %v, "schema violation");
                Issue::schema(file, &v.path, v.message)
            })
            .collect()
    }
}
