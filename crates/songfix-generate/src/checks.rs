use serde::Serialize;

use crate::errors::GenerationError;
use crate::identifiers::{SEQUENCE_EXTENSION, TABLE_EXTENSION};
use crate::model::{FixturePair, GenerateOptions};
use crate::output::fasta::{LINE_WIDTH, PAYLOAD_LEN};

/// Severity level for verification issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One problem found while re-reading a fixture pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub artifact: String,
    pub message: String,
}

/// Aggregated verification result.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub errors: Vec<VerificationIssue>,
    pub warnings: Vec<VerificationIssue>,
}

impl VerificationReport {
    /// Returns true when there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push_error(&mut self, code: &str, artifact: &str, message: impl Into<String>) {
        self.errors.push(VerificationIssue {
            severity: IssueSeverity::Error,
            code: code.to_string(),
            artifact: artifact.to_string(),
            message: message.into(),
        });
    }

    pub fn push_warning(&mut self, code: &str, artifact: &str, message: impl Into<String>) {
        self.warnings.push(VerificationIssue {
            severity: IssueSeverity::Warning,
            code: code.to_string(),
            artifact: artifact.to_string(),
            message: message.into(),
        });
    }

    /// Turn a report with errors into `GenerationError::InvalidFixture`.
    pub fn into_result(self) -> Result<Self, GenerationError> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(GenerationError::InvalidFixture(self))
        }
    }
}

/// Re-read both artifacts and check their shape and cross-references.
pub fn verify_pair(pair: &FixturePair, options: &GenerateOptions) -> VerificationReport {
    let mut report = VerificationReport::default();
    check_filenames(pair, &mut report);
    check_sequence(pair, &mut report);
    check_table(pair, options, &mut report);
    report
}

fn check_filenames(pair: &FixturePair, report: &mut VerificationReport) {
    let ids = &pair.identifiers;
    if pair.sequence.filename != ids.sequence_filename {
        report.push_error(
            "identifiers.sequence_filename",
            &pair.sequence.filename,
            format!("expected filename '{}'", ids.sequence_filename),
        );
    }
    if pair.table.filename != ids.table_filename {
        report.push_error(
            "identifiers.table_filename",
            &pair.table.filename,
            format!("expected filename '{}'", ids.table_filename),
        );
    }

    let sequence_stem = pair
        .sequence
        .filename
        .strip_suffix(&format!(".{SEQUENCE_EXTENSION}"));
    let table_stem = pair
        .table
        .filename
        .strip_suffix(&format!(".{TABLE_EXTENSION}"));
    match (sequence_stem, table_stem) {
        (Some(a), Some(b)) if a == b => {}
        _ => report.push_error(
            "filename.stem_mismatch",
            &pair.table.filename,
            format!(
                "'{}' and '{}' must differ only in extension",
                pair.sequence.filename, pair.table.filename
            ),
        ),
    }
}

fn check_sequence(pair: &FixturePair, report: &mut VerificationReport) {
    let artifact = pair.sequence.filename.as_str();
    let content = &pair.sequence.content;
    if !content.ends_with('\n') {
        report.push_error("sequence.unterminated", artifact, "missing trailing newline");
    }

    let mut lines = content.lines();
    let expected_header = format!(">{}", pair.identifiers.sequence_name);
    match lines.next() {
        Some(header) if header == expected_header => {}
        other => report.push_error(
            "sequence.header_mismatch",
            artifact,
            format!("expected '{expected_header}', found '{}'", other.unwrap_or_default()),
        ),
    }

    let payload: Vec<&str> = lines.collect();
    let wrapped = payload.iter().all(|line| line.len() == LINE_WIDTH);
    let total: usize = payload.iter().map(|line| line.len()).sum();
    if !wrapped || total != PAYLOAD_LEN {
        report.push_error(
            "sequence.payload_shape",
            artifact,
            format!(
                "expected {PAYLOAD_LEN} characters in {LINE_WIDTH}-column lines, found {} line(s) totalling {total}",
                payload.len()
            ),
        );
    }
    if payload
        .iter()
        .any(|line| !line.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')))
    {
        report.push_error(
            "sequence.alphabet",
            artifact,
            "payload contains non-nucleotide symbols",
        );
    }
}

fn check_table(pair: &FixturePair, options: &GenerateOptions, report: &mut VerificationReport) {
    let artifact = pair.table.filename.as_str();
    let content = &pair.table.content;
    let Some(body) = content.strip_suffix('\n') else {
        report.push_error("table.unterminated", artifact, "missing trailing newline");
        return;
    };

    // Verbatim separators make the rows unsplittable; the layout cannot be rechecked.
    if !pair.report.embedded_separators.is_empty() {
        for field in &pair.report.embedded_separators {
            report.push_warning(
                "table.embedded_separator",
                artifact,
                format!("field '{field}' contains a tab or newline; column layout not checked"),
            );
        }
        return;
    }

    let lines: Vec<&str> = body.split('\n').collect();
    let [header, row] = lines.as_slice() else {
        report.push_error(
            "table.line_count",
            artifact,
            format!("expected a header and one data row, found {} line(s)", lines.len()),
        );
        return;
    };

    let expected = pair.report.fields;
    let header_columns = columns(header, expected);
    let row_columns = columns(row, expected);
    if header_columns.len() != expected || row_columns.len() != expected {
        report.push_error(
            "table.column_count",
            artifact,
            format!(
                "expected {expected} column(s), header has {} and data row has {}",
                header_columns.len(),
                row_columns.len()
            ),
        );
        return;
    }

    let links = [
        (
            options.sequence_file_field.as_str(),
            pair.identifiers.sequence_filename.as_str(),
        ),
        (
            options.sequence_header_field.as_str(),
            pair.identifiers.sequence_name.as_str(),
        ),
    ];
    let mut linked = false;
    for (field, expected_value) in links {
        let Some(index) = header_columns.iter().position(|name| *name == field) else {
            continue;
        };
        linked = true;
        if row_columns[index] != expected_value {
            report.push_error(
                "table.broken_link",
                artifact,
                format!(
                    "column '{field}' is '{}', expected '{expected_value}'",
                    row_columns[index]
                ),
            );
        }
    }
    if !linked {
        report.push_warning(
            "table.unlinked",
            artifact,
            "table has no column referencing the sequence artifact",
        );
    }
}

fn columns(line: &str, expected: usize) -> Vec<&str> {
    if expected == 0 && line.is_empty() {
        Vec::new()
    } else {
        line.split('\t').collect()
    }
}
