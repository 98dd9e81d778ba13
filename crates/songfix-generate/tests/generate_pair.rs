use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use songfix_core::{FieldDefinition, FieldType, Schema, SchemaPage};
use songfix_generate::generators::{SynthesisContext, synthesize};
use songfix_generate::output::{encode_sequence, encode_table};
use songfix_generate::{
    Clock, FixedClock, FixtureEngine, GenerateOptions, GenerationError, verify_pair,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 30)
        .and_then(|date| date.and_hms_opt(16, 45, 12))
        .expect("valid now")
}

fn donor_schema() -> Schema {
    Schema::new("donor", 2)
        .with_field("age", FieldDefinition::new(FieldType::Integer))
        .with_field("consent", FieldDefinition::new(FieldType::Boolean))
        .with_field("sample_other", FieldDefinition::new(FieldType::String))
}

fn registry_schema() -> Schema {
    let json = r#"{
        "limit": 10, "offset": 0, "count": 1,
        "resultSet": [{
            "name": "covid",
            "version": 4,
            "createdAt": "2024-01-01T00:00:00Z",
            "options": {"fileTypes": ["fasta", "tsv"], "externalValidations": []},
            "schema": {"properties": {
                "submitter_id": {"type": "string"},
                "fasta_file_name": {"type": "string"},
                "fasta_header_name": {"type": "string"},
                "sample_collection_date": {"type": "string"},
                "host_age": {"type": "number"},
                "host_gender": {"type": "string", "enum": ["Female", "Male"]},
                "host_gender_other": {"type": "string"},
                "vaccinated": {"type": "boolean"},
                "extra": {}
            }}
        }]
    }"#;
    SchemaPage::from_json(json)
        .expect("registry page")
        .result_set
        .remove(0)
}

#[test]
fn donor_example_data_row() {
    let engine = FixtureEngine::default();
    let pair = engine
        .generate(Some(&donor_schema()), now())
        .expect("generate pair");

    assert_eq!(pair.table.content, "age\tconsent\tsample_other\n1\ttrue\t\n");
    assert_eq!(pair.sequence.filename, "donor_2_20250930_164512.fasta");
    assert_eq!(pair.table.filename, "donor_2_20250930_164512.tsv");
    assert!(pair.identifiers.sequence_name.starts_with("donor_v2_"));
    assert!(
        pair.sequence
            .content
            .starts_with(&format!(">{}\n", pair.identifiers.sequence_name))
    );
}

#[test]
fn registry_schema_produces_linked_pair() {
    let engine = FixtureEngine::default();
    let schema = registry_schema();
    let pair = engine
        .generate_with_rng(Some(&schema), now(), &mut ChaCha8Rng::seed_from_u64(21))
        .expect("generate pair");

    let lines: Vec<&str> = pair.table.content.lines().collect();
    assert_eq!(lines.len(), 2);
    let header: Vec<&str> = lines[0].split('\t').collect();
    let row: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(header.len(), schema.fields.len());
    assert_eq!(row.len(), schema.fields.len());

    assert_eq!(row[0], "test value");
    assert_eq!(row[1], pair.sequence.filename);
    assert_eq!(row[2], pair.identifiers.sequence_name);
    let date = NaiveDate::parse_from_str(row[3], "%Y-%m-%d").expect("collection date");
    assert!(date.year() >= 1925 && date <= now().date());
    assert_eq!(row[4], "1");
    assert_eq!(row[5], "Female");
    assert_eq!(row[6], "");
    assert_eq!(row[7], "true");
    assert_eq!(row[8], "test value");

    let report = verify_pair(&pair, &GenerateOptions::default());
    assert!(report.is_ok(), "{:?}", report.errors);
    assert!(report.warnings.is_empty());
    assert_eq!(pair.report.rule_usage.get("date"), Some(&1));
}

#[test]
fn consecutive_pairs_differ_in_sequence_name_only() {
    let engine = FixtureEngine::default();
    let clock = FixedClock::new(now());
    let schema = donor_schema();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let first = engine
        .generate_with_rng(Some(&schema), clock.now(), &mut rng)
        .expect("first pair");
    let second = engine
        .generate_with_rng(Some(&schema), clock.now(), &mut rng)
        .expect("second pair");

    assert_ne!(first.identifiers.sequence_name, second.identifiers.sequence_name);
    // Same wall-clock second: filenames collide and that is tolerated.
    assert_eq!(first.sequence.filename, second.sequence.filename);
    assert_eq!(first.table.filename, second.table.filename);
}

#[test]
fn table_encoding_is_stable_for_same_identifiers() {
    let schema = registry_schema();
    let options = GenerateOptions::default();
    let ctx = SynthesisContext::new(&options, "covid_4_x.fasta", "covid_v4_ABCDE", now());

    let a = encode_table(&schema, &ctx, &mut ChaCha8Rng::seed_from_u64(1));
    let b = encode_table(&schema, &ctx, &mut ChaCha8Rng::seed_from_u64(2));
    let header = |content: &str| content.lines().next().map(str::to_string);
    assert_eq!(header(&a), header(&b));

    // Only the date column may vary between draws.
    let strip_date = |content: &str| {
        content
            .lines()
            .nth(1)
            .map(|row| {
                row.split('\t')
                    .enumerate()
                    .filter(|(index, _)| *index != 3)
                    .map(|(_, value)| value.to_string())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    };
    assert_eq!(strip_date(&a), strip_date(&b));
}

#[test]
fn enum_and_other_rules_hold_for_any_type() {
    let options = GenerateOptions::default();
    let ctx = SynthesisContext::new(&options, "f.fasta", "n", now());
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    for field_type in [
        FieldType::String,
        FieldType::Integer,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Other(None),
    ] {
        let definition = FieldDefinition::new(field_type.clone()).with_enum(["A", "B", "C"]);
        assert_eq!(synthesize("status", &definition, &ctx, &mut rng).text, "A");
        assert_eq!(synthesize("status_other", &definition, &ctx, &mut rng).text, "");
    }
}

#[test]
fn sequence_artifact_shape() {
    let encoded = encode_sequence("covid_v4_ZZZZZ");
    let lines: Vec<&str> = encoded.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('>'));
    assert_eq!(lines[1].len(), 80);
    assert_eq!(lines[2].len(), 80);
    assert_eq!(format!("{}{}", lines[1], lines[2]), "ATGC".repeat(40));
}

#[test]
fn engine_reports_missing_schema() {
    let err = FixtureEngine::default()
        .generate(None, now())
        .expect_err("schema required");
    assert!(matches!(err, GenerationError::SchemaNotSelected));
    assert_eq!(err.to_string(), "no schema selected");
}

#[test]
fn tab_in_enum_literal_still_yields_a_deliverable_pair() {
    let schema = Schema::new("site", 1)
        .with_field("fasta_header_name", FieldDefinition::new(FieldType::String))
        .with_field(
            "site",
            FieldDefinition::new(FieldType::String).with_enum(["Cape Town\tZA"]),
        );
    let engine = FixtureEngine::default();
    let pair = engine
        .generate_with_rng(Some(&schema), now(), &mut ChaCha8Rng::seed_from_u64(8))
        .expect("pair");

    assert!(pair.table.content.ends_with("\tCape Town\tZA\n"));
    let report = engine.verify(&pair).expect("separators do not block delivery");
    assert_eq!(report.warnings[0].code, "table.embedded_separator");
}
