//! # Validation Pipeline
//!
//! Drives one run: load the schema, discover files, then for each file in
//! order load → schema-validate → semantic-check, collecting every issue.
//! Per-file failures become issues; only schema loading can abort a run.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use modelspec_core::{Issue, IssueCounts};
use modelspec_schema::{load_document, RuleSet, SchemaValidator};

use crate::discover::discover_files;
use crate::report::{report, Outcome};

/// Everything a run needs, independent of how it was configured.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// JSON Schema file (JSON only).
    pub schema: PathBuf,
    /// Files and directories to validate.
    pub paths: Vec<PathBuf>,
    /// Run the semantic rules after schema validation.
    pub semantic: bool,
    /// Colour the report (set when stdout is a terminal).
    pub styled: bool,
}

impl ValidateOptions {
    pub fn new(schema: impl Into<PathBuf>, paths: Vec<PathBuf>) -> Self {
        Self {
            schema: schema.into(),
            paths,
            semantic: true,
            styled: false,
        }
    }

    /// The rule set implied by the `semantic` flag.
    pub fn rules(&self) -> RuleSet {
        if self.semantic {
            RuleSet::builtin()
        } else {
            RuleSet::empty()
        }
    }
}

/// Execute a full run and write the report to `out`.
///
/// # Errors
///
/// Fails only when the schema cannot be loaded or compiled, or when the
/// report cannot be written. No file is read in the first case.
pub fn run_validate(opts: &ValidateOptions, out: &mut impl Write) -> Result<Outcome> {
    let validator = SchemaValidator::from_file(&opts.schema)
        .with_context(|| format!("failed to load schema {}", opts.schema.display()))?;
    let rules = opts.rules();
    tracing::debug!(rules = ?rules.names(), "semantic rules");

    let files = discover_files(&opts.paths);
    tracing::info!(count = files.len(), "discovered files");

    let issues = collect_issues(&files, &validator, &rules);

    let counts = IssueCounts::tally(&issues);
    tracing::info!(
        files = files.len(),
        total = counts.total(),
        parse = counts.parse,
        schema = counts.schema,
        semantic = counts.semantic,
        "validation complete"
    );

    report(&issues, out, opts.styled).context("failed to write report")
}

/// Validate `files` in order and concatenate their issues.
pub fn collect_issues(files: &[PathBuf], validator: &SchemaValidator, rules: &RuleSet) -> Vec<Issue> {
    files
        .iter()
        .flat_map(|path| validate_file(path, validator, rules))
        .collect()
}

/// All issues for one file: a single parse issue, or the sorted schema
/// issues followed by semantic issues in rule order.
pub fn validate_file(path: &Path, validator: &SchemaValidator, rules: &RuleSet) -> Vec<Issue> {
    let file = path.display().to_string();
    tracing::debug!(file = %file, "validating");

    let doc = match load_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(file = %file, error = %e, "failed to load document");
            return vec![Issue::parse_error(file, e)];
        }
    };

    let mut issues = validator.validate(&doc, &file);
    issues.extend(rules.check(&doc, &file));
    for issue in &issues {
        tracing::trace!(%issue, "issue");
    }

    tracing::debug!(file = %file, count = issues.len(), "validated");
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelspec_core::IssueKind;
    use serde_json::json;

    fn write(path: &Path, contents: &str) {
        std::fs::write(path, contents).unwrap();
    }

    fn permissive() -> SchemaValidator {
        SchemaValidator::from_value(&json!({"type": "object"}), "/schemas/s.json").unwrap()
    }

    #[test]
    fn parse_failure_yields_single_root_issue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        write(&path, "spec: [unclosed\n");

        let issues = validate_file(&path, &permissive(), &RuleSet::builtin());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$");
        assert!(issues[0].message.starts_with("Parse error:"), "{}", issues[0].message);
        assert_eq!(issues[0].kind, IssueKind::Parse);
        assert_eq!(issues[0].file, path.display().to_string());
    }

    #[test]
    fn schema_issues_precede_semantic_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.yaml");
        write(
            &path,
            "spec:\n  identity:\n    model:\n      framework: vllm\n  runtime:\n    batch: {}\n",
        );
        let validator = SchemaValidator::from_value(
            &json!({"type": "object", "required": ["apiVersion"]}),
            "/schemas/s.json",
        )
        .unwrap();

        let kinds: Vec<IssueKind> = validate_file(&path, &validator, &RuleSet::builtin())
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, vec![IssueKind::Schema, IssueKind::Semantic]);
    }

    #[test]
    fn disabled_rules_leave_only_schema_issues() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        write(&path, r#"{"spec": {"identity": {"model": {"framework": "vllm"}}}}"#);

        let mut opts = ValidateOptions::new("/unused", vec![]);
        opts.semantic = false;
        assert!(validate_file(&path, &permissive(), &opts.rules()).is_empty());
    }

    #[test]
    fn collect_issues_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("b.yaml");
        let second = dir.path().join("a.yaml");
        write(&first, "- not an object\n");
        write(&second, "also: [broken\n");

        let issues = collect_issues(&[first.clone(), second.clone()], &permissive(), &RuleSet::builtin());
        let files: Vec<&str> = issues.iter().map(|i| i.file.as_str()).collect();
        assert_eq!(
            files,
            vec![first.to_str().unwrap(), second.to_str().unwrap()]
        );
    }

    #[test]
    fn options_default_to_semantic_checks() {
        let opts = ValidateOptions::new("schema.json", vec![PathBuf::from("models")]);
        assert!(opts.semantic);
        assert!(!opts.styled);
        assert_eq!(opts.rules().names(), vec!["vllm-batch-limit"]);
    }

    #[test]
    fn missing_schema_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ValidateOptions::new(dir.path().join("absent.json"), vec![dir.path().to_path_buf()]);
        let mut out = Vec::new();
        let err = run_validate(&opts, &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
        assert!(out.is_empty(), "nothing should be reported on a fatal error");
    }
}
