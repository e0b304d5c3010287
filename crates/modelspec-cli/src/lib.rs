//! # modelspec-cli — ModelSpec Validation CLI
//!
//! Provides the `modelspec-validate` command:
//!
//! ```bash
//! modelspec-validate --schema schema/schema.json models/ extra/model.yaml
//! modelspec-validate --schema schema/schema.json models/ --no-semantic
//! ```
//!
//! ## Pipeline
//!
//! 1. [`discover`] expands directory arguments into document files.
//! 2. Each file is loaded, schema-validated and semantically checked by
//!    [`validate`], in discovery order.
//! 3. [`report`] prints the collected issues as a table (exit 1) or a
//!    success line (exit 0).
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; everything else is callable from
//!   tests through [`validate::run_validate`].
//! - No validation logic here; that belongs to `modelspec-schema`.
//! - Stdout carries only the report. Logs go to stderr.

pub mod discover;
pub mod report;
pub mod validate;

pub use report::Outcome;
pub use validate::{run_validate, ValidateOptions};
