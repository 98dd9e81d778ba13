use chrono::NaiveDateTime;
use rand::RngCore;
use tracing::{info, warn};

use songfix_core::Schema;

use crate::checks::{VerificationReport, verify_pair};
use crate::errors::GenerationError;
use crate::generators::SynthesisContext;
use crate::identifiers::new_identifiers;
use crate::model::{FixtureArtifact, FixturePair, GenerateOptions};
use crate::output::{encode_sequence, encode_table_with_report};

/// Entry point for generating linked fixture pairs from a schema.
#[derive(Debug, Clone, Default)]
pub struct FixtureEngine {
    options: GenerateOptions,
}

impl FixtureEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate a sequence/table pair using thread-local entropy.
    pub fn generate(
        &self,
        schema: Option<&Schema>,
        now: NaiveDateTime,
    ) -> Result<FixturePair, GenerationError> {
        let mut rng = rand::rng();
        self.generate_with_rng(schema, now, &mut rng)
    }

    /// Generate a pair drawing all entropy from `rng`.
    ///
    /// Identifiers are derived once and shared by both encoders. No I/O.
    pub fn generate_with_rng(
        &self,
        schema: Option<&Schema>,
        now: NaiveDateTime,
        rng: &mut dyn RngCore,
    ) -> Result<FixturePair, GenerationError> {
        let schema = schema.ok_or(GenerationError::SchemaNotSelected)?;
        info!(
            schema = %schema.name,
            version = schema.version,
            fields = schema.fields.len(),
            "fixture generation started"
        );

        let identifiers = new_identifiers(&schema.name, schema.version, now, rng);
        let sequence = FixtureArtifact {
            filename: identifiers.sequence_filename.clone(),
            content: encode_sequence(&identifiers.sequence_name),
        };

        let ctx = SynthesisContext::new(
            &self.options,
            &identifiers.sequence_filename,
            &identifiers.sequence_name,
            now,
        );
        let encoded = encode_table_with_report(schema, &ctx, rng);
        let table = FixtureArtifact {
            filename: identifiers.table_filename.clone(),
            content: encoded.content,
        };

        info!(
            schema = %schema.name,
            version = schema.version,
            sequence_name = %identifiers.sequence_name,
            sequence_file = %sequence.filename,
            table_file = %table.filename,
            rules = ?encoded.report.rule_usage,
            "fixture generation completed"
        );

        Ok(FixturePair {
            identifiers,
            sequence,
            table,
            report: encoded.report,
        })
    }

    /// Check a pair's shape and cross-references, failing on errors.
    pub fn verify(&self, pair: &FixturePair) -> Result<VerificationReport, GenerationError> {
        let report = verify_pair(pair, &self.options);
        for issue in report.errors.iter().chain(&report.warnings) {
            warn!(
                code = %issue.code,
                artifact = %issue.artifact,
                severity = ?issue.severity,
                "{}",
                issue.message
            );
        }
        report.into_result()
    }
}
