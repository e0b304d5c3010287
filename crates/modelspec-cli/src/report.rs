//! # Issue Reporting
//!
//! Renders the issues collected over a whole run and decides the exit code.
//! With issues: a titled table (File, Path, Message) and exit 1. Without: a
//! single success line and exit 0.
//!
//! Colour is only applied when writing to a terminal, so piped output is
//! byte-identical across runs.

use std::io::Write;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use modelspec_core::Issue;

/// Title printed above the issue table.
pub const TABLE_TITLE: &str = "ModelSpec Validation Errors";

/// Line printed when no issues were found.
pub const SUCCESS_MESSAGE: &str = "✅ All ModelSpec files validated successfully.";

/// Final verdict of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No issues in any file.
    Passed,
    /// At least one issue.
    Failed,
}

impl Outcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
        }
    }
}

/// Render `issues` as a bordered table with a line between rows.
pub fn render_table(issues: &[Issue], styled: bool) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    if styled {
        table
            .enforce_styling()
            .set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.force_no_tty();
    }

    table.set_header(vec![
        header_cell("File", styled),
        header_cell("Path", styled),
        header_cell("Message", styled),
    ]);

    for issue in issues {
        let (file, path, message) = if styled {
            (
                Cell::new(&issue.file).add_attribute(Attribute::Bold),
                Cell::new(&issue.path).fg(Color::Cyan),
                Cell::new(&issue.message).fg(Color::Red),
            )
        } else {
            (
                Cell::new(&issue.file),
                Cell::new(&issue.path),
                Cell::new(&issue.message),
            )
        };
        table.add_row(vec![file, path, message]);
    }

    table.to_string()
}

fn header_cell(label: &str, styled: bool) -> Cell {
    let cell = Cell::new(label);
    if styled {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

/// Write the report for `issues` to `out` and return the run's outcome.
pub fn report(issues: &[Issue], out: &mut impl Write, styled: bool) -> std::io::Result<Outcome> {
    if issues.is_empty() {
        if styled {
            writeln!(out, "{}", SUCCESS_MESSAGE.green())?;
        } else {
            writeln!(out, "{SUCCESS_MESSAGE}")?;
        }
        return Ok(Outcome::Passed);
    }

    if styled {
        writeln!(out, "{}", TABLE_TITLE.italic())?;
    } else {
        writeln!(out, "{TABLE_TITLE}")?;
    }
    writeln!(out, "{}", render_table(issues, styled))?;
    Ok(Outcome::Failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelspec_core::InstancePath;

    fn sample() -> Vec<Issue> {
        vec![
            Issue::parse_error("models/broken.yaml", "invalid YAML: did not find expected key"),
            Issue::schema(
                "models/a.yaml",
                &InstancePath::root().join("spec").join("replicas"),
                "0 is less than the minimum of 1",
            ),
            Issue::semantic(
                "models/a.yaml",
                &InstancePath::root()
                    .join("spec")
                    .join("runtime")
                    .join("batch")
                    .join("maxSequenceLengthTokens"),
                "Required for framework=vllm (semantic check).",
            ),
        ]
    }

    fn render(issues: &[Issue]) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = report(issues, &mut out, false).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_run_prints_success_and_passes() {
        let (outcome, text) = render(&[]);
        assert_eq!(outcome, Outcome::Passed);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(text, format!("{SUCCESS_MESSAGE}\n"));
    }

    #[test]
    fn issues_print_table_and_fail() {
        let (outcome, text) = render(&sample());
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(text.starts_with(TABLE_TITLE));
        for column in ["File", "Path", "Message"] {
            assert!(text.contains(column), "missing column {column}:\n{text}");
        }
        assert!(text.contains("$.spec.runtime.batch.maxSequenceLengthTokens"));
        assert!(text.contains("Parse error: invalid YAML"));
        assert!(!text.contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn rows_follow_issue_order() {
        let (_, text) = render(&sample());
        let broken = text.find("models/broken.yaml").unwrap();
        let replicas = text.find("$.spec.replicas").unwrap();
        let batch = text.find("$.spec.runtime.batch").unwrap();
        assert!(broken < replicas && replicas < batch);
    }

    #[test]
    fn unstyled_output_has_no_escape_codes() {
        let (_, text) = render(&sample());
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render(&sample()).1, render(&sample()).1);
    }

    #[test]
    fn rows_are_separated_by_lines() {
        let table = render_table(&sample(), false);
        // Header separator plus one between each pair of rows.
        let separators = table.lines().filter(|l| l.starts_with('├') || l.starts_with('╞')).count();
        assert_eq!(separators, 3);
    }
}
