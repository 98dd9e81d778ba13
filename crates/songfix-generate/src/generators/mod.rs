//! Field value synthesis.
//!
//! One schema field maps to one text value through a fixed priority chain:
//! linked reference fields, `_other` companions, enums, then the declared type.

pub mod date;

use chrono::NaiveDateTime;
use rand::RngCore;

use songfix_core::{FieldDefinition, FieldType};

use crate::model::GenerateOptions;

/// Suffix marking free-text companions of an enumerated choice.
pub const OTHER_SUFFIX: &str = "_other";
/// Placeholder used for text and untyped fields.
pub const PLACEHOLDER_TEXT: &str = "test value";
const NUMERIC_VALUE: &str = "1";
const BOOLEAN_VALUE: &str = "true";

/// Inputs shared by every field of one table row.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisContext<'a> {
    pub sequence_filename: &'a str,
    pub sequence_name: &'a str,
    pub now: NaiveDateTime,
    pub sequence_file_field: &'a str,
    pub sequence_header_field: &'a str,
}

impl<'a> SynthesisContext<'a> {
    pub fn new(
        options: &'a GenerateOptions,
        sequence_filename: &'a str,
        sequence_name: &'a str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            sequence_filename,
            sequence_name,
            now,
            sequence_file_field: &options.sequence_file_field,
            sequence_header_field: &options.sequence_header_field,
        }
    }
}

/// Rule that produced a synthesized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SynthesisRule {
    SequenceFile,
    SequenceHeader,
    OtherCompanion,
    Enum,
    Date,
    Text,
    Numeric,
    Boolean,
    Fallback,
}

impl SynthesisRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisRule::SequenceFile => "sequence_file",
            SynthesisRule::SequenceHeader => "sequence_header",
            SynthesisRule::OtherCompanion => "other_companion",
            SynthesisRule::Enum => "enum",
            SynthesisRule::Date => "date",
            SynthesisRule::Text => "text",
            SynthesisRule::Numeric => "numeric",
            SynthesisRule::Boolean => "boolean",
            SynthesisRule::Fallback => "fallback",
        }
    }
}

/// Value synthesized for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedValue {
    pub rule: SynthesisRule,
    pub text: String,
}

impl SynthesizedValue {
    fn new(rule: SynthesisRule, text: impl Into<String>) -> Self {
        Self {
            rule,
            text: text.into(),
        }
    }
}

/// Synthesize a value for `field_name`. First matching rule wins; never fails.
pub fn synthesize(
    field_name: &str,
    definition: &FieldDefinition,
    ctx: &SynthesisContext<'_>,
    rng: &mut dyn RngCore,
) -> SynthesizedValue {
    if field_name == ctx.sequence_file_field {
        return SynthesizedValue::new(SynthesisRule::SequenceFile, ctx.sequence_filename);
    }
    if field_name == ctx.sequence_header_field {
        return SynthesizedValue::new(SynthesisRule::SequenceHeader, ctx.sequence_name);
    }
    // Left blank: the companion enum value is never the literal "other".
    if field_name.ends_with(OTHER_SUFFIX) {
        return SynthesizedValue::new(SynthesisRule::OtherCompanion, "");
    }
    if let Some(literal) = definition.first_enum_literal() {
        return SynthesizedValue::new(SynthesisRule::Enum, literal);
    }

    match definition.field_type {
        FieldType::String if is_date_field(field_name, definition) => SynthesizedValue::new(
            SynthesisRule::Date,
            date::random_date_text(ctx.now, rng),
        ),
        FieldType::String => SynthesizedValue::new(SynthesisRule::Text, PLACEHOLDER_TEXT),
        FieldType::Integer | FieldType::Number => {
            SynthesizedValue::new(SynthesisRule::Numeric, NUMERIC_VALUE)
        }
        FieldType::Boolean => SynthesizedValue::new(SynthesisRule::Boolean, BOOLEAN_VALUE),
        FieldType::Other(_) => SynthesizedValue::new(SynthesisRule::Fallback, PLACEHOLDER_TEXT),
    }
}

fn is_date_field(field_name: &str, definition: &FieldDefinition) -> bool {
    definition.format.as_deref() == Some("date") || field_name.to_lowercase().contains("date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(field_name: &str, definition: FieldDefinition) -> SynthesizedValue {
        let options = GenerateOptions::default();
        let now = NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|date| date.and_hms_opt(3, 4, 5))
            .expect("valid now");
        let ctx = SynthesisContext::new(
            &options,
            "donor_2_20250102_030405.fasta",
            "donor_v2_AB12Z",
            now,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        synthesize(field_name, &definition, &ctx, &mut rng)
    }

    #[test]
    fn reference_fields_take_priority() {
        let enumerated = FieldDefinition::new(FieldType::String).with_enum(["X"]);
        let value = run("fasta_file_name", enumerated.clone());
        assert_eq!(value.rule, SynthesisRule::SequenceFile);
        assert_eq!(value.text, "donor_2_20250102_030405.fasta");

        let value = run("fasta_header_name", enumerated);
        assert_eq!(value.text, "donor_v2_AB12Z");
    }

    #[test]
    fn other_companions_are_blank_for_any_type() {
        for field_type in [FieldType::String, FieldType::Integer, FieldType::Boolean] {
            let value = run("status_other", FieldDefinition::new(field_type).with_enum(["A"]));
            assert_eq!(value.rule, SynthesisRule::OtherCompanion);
            assert_eq!(value.text, "");
        }
    }

    #[test]
    fn enum_picks_first_literal_regardless_of_type() {
        for field_type in [FieldType::Integer, FieldType::Other(None)] {
            let definition = FieldDefinition::new(field_type).with_enum(["A", "B", "C"]);
            assert_eq!(run("status", definition).text, "A");
        }
    }

    #[test]
    fn date_detection_uses_format_or_name() {
        let value = run("onset", FieldDefinition::new(FieldType::String).with_format("date"));
        assert_eq!(value.rule, SynthesisRule::Date);

        let value = run("Collection_DATE", FieldDefinition::new(FieldType::String));
        assert_eq!(value.rule, SynthesisRule::Date);

        // Only string fields are dated.
        let value = run("birth_date", FieldDefinition::new(FieldType::Integer));
        assert_eq!(value.text, "1");
    }

    #[test]
    fn type_dispatch_defaults() {
        assert_eq!(run("name", FieldDefinition::new(FieldType::String)).text, "test value");
        assert_eq!(run("age", FieldDefinition::new(FieldType::Integer)).text, "1");
        assert_eq!(run("ct", FieldDefinition::new(FieldType::Number)).text, "1");
        assert_eq!(run("consent", FieldDefinition::new(FieldType::Boolean)).text, "true");

        let fallback = run("blob", FieldDefinition::new(FieldType::Other(Some("array".into()))));
        assert_eq!(fallback.rule, SynthesisRule::Fallback);
        assert_eq!(fallback.text, "test value");
        assert_eq!(run("blob", FieldDefinition::new(FieldType::Other(None))).text, "test value");
    }
}
