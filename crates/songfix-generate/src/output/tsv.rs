use rand::RngCore;
use tracing::debug;

use songfix_core::Schema;

use crate::generators::{SynthesisContext, synthesize};
use crate::model::FixtureReport;

/// Encoded table plus the rules used to fill it.
#[derive(Debug, Clone)]
pub struct EncodedTable {
    pub content: String,
    pub report: FixtureReport,
}

/// Encode a header row and one data row, tab-separated, in declaration order.
///
/// Values are written verbatim. A schema without fields yields `"\n\n"`.
pub fn encode_table(schema: &Schema, ctx: &SynthesisContext<'_>, rng: &mut dyn RngCore) -> String {
    encode_table_with_report(schema, ctx, rng).content
}

/// Like [`encode_table`], also returning the rule tally and the fields whose
/// name or value embeds a tab or newline.
pub fn encode_table_with_report(
    schema: &Schema,
    ctx: &SynthesisContext<'_>,
    rng: &mut dyn RngCore,
) -> EncodedTable {
    let mut report = FixtureReport::new(&schema.name, schema.version);
    report.fields = schema.fields.len();

    let mut header = Vec::with_capacity(schema.fields.len());
    let mut row = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let value = synthesize(&field.name, &field.definition, ctx, rng);
        debug!(field = %field.name, rule = value.rule.as_str(), "field synthesized");
        report.record_rule(value.rule.as_str());
        if has_separator(&field.name) || has_separator(&value.text) {
            report.embedded_separators.push(field.name.clone());
        }
        header.push(field.name.as_str());
        row.push(value.text);
    }

    let content = format!("{}\n{}\n", header.join("\t"), row.join("\t"));
    EncodedTable { content, report }
}

fn has_separator(text: &str) -> bool {
    text.contains(['\t', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use songfix_core::{FieldDefinition, FieldType};

    use crate::model::GenerateOptions;

    fn encode(schema: &Schema) -> EncodedTable {
        let options = GenerateOptions::default();
        let now = NaiveDate::from_ymd_opt(2024, 12, 31)
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .expect("valid now");
        let ctx = SynthesisContext::new(&options, "s_1_20241231_235959.fasta", "s_v1_QQQQQ", now);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        encode_table_with_report(schema, &ctx, &mut rng)
    }

    #[test]
    fn empty_schema_yields_two_empty_lines() {
        assert_eq!(encode(&Schema::new("s", 1)).content, "\n\n");
    }

    #[test]
    fn columns_follow_declaration_order() {
        let schema = Schema::new("s", 1)
            .with_field("zeta", FieldDefinition::new(FieldType::Integer))
            .with_field("alpha", FieldDefinition::new(FieldType::Boolean))
            .with_field("fasta_header_name", FieldDefinition::new(FieldType::String));
        let encoded = encode(&schema);

        assert_eq!(encoded.content, "zeta\talpha\tfasta_header_name\n1\ttrue\ts_v1_QQQQQ\n");
        assert_eq!(encoded.report.fields, 3);
        assert_eq!(encoded.report.rule_usage.get("numeric"), Some(&1));
        assert_eq!(encoded.report.rule_usage.get("sequence_header"), Some(&1));
    }

    #[test]
    fn single_blank_value_keeps_two_lines() {
        let schema = Schema::new("s", 1)
            .with_field("sample_other", FieldDefinition::new(FieldType::String));
        assert_eq!(encode(&schema).content, "sample_other\n\n");
    }

    #[test]
    fn separators_inside_values_are_written_verbatim_and_reported() {
        let schema = Schema::new("s", 1)
            .with_field("site", FieldDefinition::new(FieldType::String).with_enum(["a\tb"]))
            .with_field("age", FieldDefinition::new(FieldType::Integer));
        let encoded = encode(&schema);

        assert_eq!(encoded.content, "site\tage\na\tb\t1\n");
        assert_eq!(encoded.report.embedded_separators, vec!["site".to_string()]);
    }
}
