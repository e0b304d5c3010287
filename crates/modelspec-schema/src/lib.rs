//! # modelspec-schema — Loading, Schema Validation & Semantic Rules
//!
//! Everything that looks inside a ModelSpec document lives here.
//!
//! ## Document Loading (`load`)
//!
//! [`load_document`] reads one file and parses it into a generic
//! `serde_json::Value` tree: `.json` (any case) as JSON, everything else as
//! YAML. YAML is converted to the JSON data model so both formats validate
//! identically.
//!
//! ## Schema Validation (`validate`)
//!
//! [`SchemaValidator`] compiles one JSON Schema (Draft 2020-12) at startup
//! and validates any number of documents against it. Engine errors are
//! converted to [`modelspec_core::Issue`]s, sorted by instance path.
//!
//! ## Semantic Rules (`rules`)
//!
//! Cross-field checks that JSON Schema cannot express. Each rule implements
//! [`SemanticRule`]; [`RuleSet`] runs them in declaration order.
//!
//! ## Crate Policy
//!
//! - Depends only on `modelspec-core` internally.
//! - Schema `$ref` resolution never reaches the network.
//! - Per-document failures are returned as values; only schema loading can
//!   fail a run.

pub mod load;
pub mod rules;
pub mod validate;

pub use load::{load_document, parse_document, DocumentFormat};
pub use rules::{RuleSet, SemanticRule, VllmBatchLimit};
pub use validate::{SchemaValidator, SchemaViolation};
