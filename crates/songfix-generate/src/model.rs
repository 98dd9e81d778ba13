use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field that receives the sequence artifact's filename by default.
pub const DEFAULT_SEQUENCE_FILE_FIELD: &str = "fasta_file_name";
/// Field that receives the sequence name by default.
pub const DEFAULT_SEQUENCE_HEADER_FIELD: &str = "fasta_header_name";

/// Options for the fixture engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Table column that references the sequence artifact by filename.
    pub sequence_file_field: String,
    /// Table column that references the sequence record by header name.
    pub sequence_header_field: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            sequence_file_field: DEFAULT_SEQUENCE_FILE_FIELD.to_string(),
            sequence_header_field: DEFAULT_SEQUENCE_HEADER_FIELD.to_string(),
        }
    }
}

/// Identifiers shared by both artifacts of one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedIdentifiers {
    pub sequence_name: String,
    pub sequence_filename: String,
    pub table_filename: String,
}

/// A finished fixture file, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureArtifact {
    pub filename: String,
    pub content: String,
}

/// The two linked artifacts produced by one generation request.
#[derive(Debug, Clone, Serialize)]
pub struct FixturePair {
    pub identifiers: GeneratedIdentifiers,
    pub sequence: FixtureArtifact,
    pub table: FixtureArtifact,
    pub report: FixtureReport,
}

impl FixturePair {
    /// Artifacts in delivery order: sequence first, then table.
    pub fn artifacts(&self) -> [&FixtureArtifact; 2] {
        [&self.sequence, &self.table]
    }
}

/// Summary of how a table row was synthesized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureReport {
    pub schema: String,
    pub version: u32,
    pub fields: usize,
    pub rule_usage: BTreeMap<String, u64>,
    /// Fields whose name or value contains a tab or newline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_separators: Vec<String>,
}

impl FixtureReport {
    pub fn new(schema: impl Into<String>, version: u32) -> Self {
        Self {
            schema: schema.into(),
            version,
            fields: 0,
            rule_usage: BTreeMap::new(),
            embedded_separators: Vec::new(),
        }
    }

    pub fn record_rule(&mut self, rule: &str) {
        *self.rule_usage.entry(rule.to_string()).or_insert(0) += 1;
    }
}
