//! # Semantic Rules
//!
//! Cross-field checks that cannot be expressed in JSON Schema alone. Each
//! rule is independent, looks at the whole document and returns zero or
//! more issues. [`RuleSet`] holds rules in declaration order, which is also
//! the order of their issues in the report.
//!
//! Rules only run on documents whose top level is a mapping. Lists,
//! scalars and empty files are left to the schema.

use serde_json::{Map, Value};

use modelspec_core::{InstancePath, Issue};

/// A hand-written cross-field check.
pub trait SemanticRule: Send + Sync {
    /// Stable kebab-case identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Check `doc` (the top-level mapping of `file`).
    fn check(&self, doc: &Map<String, Value>, file: &str) -> Vec<Issue>;
}

/// Ordered collection of semantic rules.
pub struct RuleSet {
    rules: Vec<Box<dyn SemanticRule>>,
}

impl RuleSet {
    /// The rules shipped with the validator.
    pub fn builtin() -> Self {
        Self::empty().with_rule(VllmBatchLimit)
    }

    /// No rules at all; semantic checking disabled.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl SemanticRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Rule names in run order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule against `doc`. Non-mapping documents yield nothing.
    pub fn check(&self, doc: &Value, file: &str) -> Vec<Issue> {
        let Some(map) = doc.as_object() else {
            tracing::debug!(file, "top level is not a mapping; skipping semantic checks");
            return Vec::new();
        };

        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(map, file);
            if !found.is_empty() {
                tracing::debug!(file, rule = rule.name(), count = found.len(), "semantic rule fired");
            }
            issues.extend(found);
        }
        issues
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.names())
            .finish()
    }
}

/// Shared empty mapping for lookups that fall off the document.
fn empty_map() -> &'static Map<String, Value> {
    static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// Child mapping at `key`. Missing or non-mapping children read as empty.
fn child<'a>(map: &'a Map<String, Value>, key: &str) -> &'a Map<String, Value> {
    map.get(key).and_then(Value::as_object).unwrap_or(empty_map())
}

/// vLLM deployments must bound sequence length in the batch configuration.
///
/// When `spec.identity.model.framework` is exactly `"vllm"`,
/// `spec.runtime.batch.maxSequenceLengthTokens` must be present (any value).
#[derive(Debug, Clone, Copy, Default)]
pub struct VllmBatchLimit;

impl VllmBatchLimit {
    pub const FRAMEWORK: &'static str = "vllm";
    pub const FIELD: &'static str = "maxSequenceLengthTokens";
    pub const MESSAGE: &'static str = "Required for framework=vllm (semantic check).";
}

impl SemanticRule for VllmBatchLimit {
    fn name(&self) -> &'static str {
        "vllm-batch-limit"
    }

    fn check(&self, doc: &Map<String, Value>, file: &str) -> Vec<Issue> {
        let spec = child(doc, "spec");
        let framework = child(child(spec, "identity"), "model")
            .get("framework")
            .and_then(Value::as_str);

        if framework != Some(Self::FRAMEWORK) {
            return Vec::new();
        }

        let batch = child(child(spec, "runtime"), "batch");
        if batch.contains_key(Self::FIELD) {
            return Vec::new();
        }

        let path = InstancePath::root()
            .join("spec")
            .join("runtime")
            .join("batch")
            .join(Self::FIELD);
        vec![Issue::semantic(file, &path, Self::MESSAGE)]
    }
}
