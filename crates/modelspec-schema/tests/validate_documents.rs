//! Integration test: validate the fixture ModelSpec documents against the
//! fixture schema (which pulls in `runtime.schema.json` through `$ref`) and
//! run the built-in semantic rules over them.

use std::path::PathBuf;

use modelspec_core::{Issue, IssueKind, LoadError};
use modelspec_schema::{load_document, RuleSet, SchemaValidator};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn validator() -> SchemaValidator {
    SchemaValidator::from_file(fixtures().join("modelspec.schema.json"))
        .expect("fixture schema should compile")
}

fn check(name: &str) -> Vec<Issue> {
    let path = fixtures().join("models").join(name);
    let doc = load_document(&path).unwrap_or_else(|e| panic!("failed to load {name}: {e}"));
    let mut issues = validator().validate(&doc, name);
    issues.extend(RuleSet::builtin().check(&doc, name));
    issues
}

#[test]
fn well_formed_vllm_model_is_clean() {
    let issues = check("llama-vllm.yaml");
    assert!(issues.is_empty(), "unexpected issues: {issues:#?}");
}

#[test]
fn vllm_model_without_sequence_limit_fails_semantic_check_only() {
    let issues = check("mistral-vllm-unbounded.yaml");
    assert_eq!(issues.len(), 1, "{issues:#?}");
    assert_eq!(issues[0].kind, IssueKind::Semantic);
    assert_eq!(issues[0].path, "$.spec.runtime.batch.maxSequenceLengthTokens");
}

#[test]
fn referenced_runtime_schema_is_enforced() {
    let issues = check("bert-triton.json");
    let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "$.spec.runtime.accelerators[1].count",
            "$.spec.runtime.accelerators[2]",
        ]
    );
    assert!(issues.iter().all(|i| i.kind == IssueKind::Schema));
    assert!(issues.iter().all(|i| i.file == "bert-triton.json"));
}

#[test]
fn broken_yaml_fails_to_load() {
    let err = load_document(&fixtures().join("models/broken.yml")).unwrap_err();
    assert!(matches!(err, LoadError::Yaml { .. }), "got: {err}");
    assert!(err.path().ends_with("broken.yml"));
}

#[test]
fn empty_document_fails_schema_but_skips_rules() {
    let doc = serde_json::Value::Null;
    let schema_issues = validator().validate(&doc, "empty.yaml");
    assert_eq!(schema_issues.len(), 1);
    assert_eq!(schema_issues[0].path, "$");
    assert!(RuleSet::builtin().check(&doc, "empty.yaml").is_empty());
}

#[test]
fn schema_errors_for_fixture_corpus_are_stable() {
    let validator = validator();
    let path = fixtures().join("models/bert-triton.json");
    let doc = load_document(&path).unwrap();
    let first = validator.violations(&doc);
    let second = validator.violations(&doc);
    assert_eq!(first, second);
}
