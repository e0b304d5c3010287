//! # Document Loading
//!
//! Reads a ModelSpec file and parses it into the generic JSON tree the
//! schema engine and the semantic rules operate on.
//!
//! The format is chosen by extension alone: `.json` (case-insensitive) is
//! JSON, anything else is YAML. YAML is parsed with `serde_yaml`, which only
//! builds plain data (no custom tags are executed). Merge keys (`<<`) are
//! applied before the tree is converted into the JSON data model.

use std::path::Path;

use serde_json::Value;

use modelspec_core::LoadError;

/// Input format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the parser for `path` from its extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Read `path` as UTF-8 and parse it according to its extension.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or one of the parse
/// variants if its content is malformed.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, DocumentFormat::from_path(path), path)
}

/// Parse already-read text. `path` is only used for error context.
pub fn parse_document(text: &str, format: DocumentFormat, path: &Path) -> Result<Value, LoadError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        DocumentFormat::Yaml => {
            let yaml_error = |source: serde_yaml::Error| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            };
            let mut yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(yaml_error)?;
            yaml.apply_merge().map_err(yaml_error)?;
            into_json(yaml).map_err(|reason| LoadError::YamlConversion {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

/// Move a merged YAML tree into the JSON data model.
///
/// Tags are dropped and the tagged value kept. Mapping keys go through
/// [`json_key`].
fn into_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => Value::Number(json_number(&n)?),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(into_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| Ok((json_key(k)?, into_json(v)?)))
                .collect::<Result<_, String>>()?,
        ),
        Yaml::Tagged(tagged) => into_json(tagged.value)?,
    })
}

fn json_number(n: &serde_yaml::Number) -> Result<serde_json::Number, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("cannot represent float {n} in JSON"))
}

/// JSON object key for a YAML mapping key: scalars print as YAML writes
/// them, a tag is looked through, collections are refused.
fn json_key(key: serde_yaml::Value) -> Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => json_key(tagged.value),
        other => Err(format!("unsupported YAML map key type: {other:?}")),
    }
}
