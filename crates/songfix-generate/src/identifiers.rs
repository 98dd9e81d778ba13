use chrono::NaiveDateTime;
use rand::{Rng, RngCore};

use crate::model::GeneratedIdentifiers;

const SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 5;

pub const SEQUENCE_EXTENSION: &str = "fasta";
pub const TABLE_EXTENSION: &str = "tsv";

/// Derive the identifiers shared by one fixture pair.
///
/// The random suffix only lowers collision odds between sequence names; two
/// calls within the same second still produce identical filenames.
pub fn new_identifiers(
    schema_name: &str,
    version: u32,
    now: NaiveDateTime,
    rng: &mut dyn RngCore,
) -> GeneratedIdentifiers {
    let suffix = random_suffix(rng);
    let token = timestamp_token(now);
    GeneratedIdentifiers {
        sequence_name: format!("{schema_name}_v{version}_{suffix}"),
        sequence_filename: format!("{schema_name}_{version}_{token}.{SEQUENCE_EXTENSION}"),
        table_filename: format!("{schema_name}_{version}_{token}.{TABLE_EXTENSION}"),
    }
}

/// Five symbols drawn uniformly, with replacement, from `A-Z0-9`.
pub fn random_suffix(rng: &mut dyn RngCore) -> String {
    (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())]))
        .collect()
}

/// `YYYYMMDD_HHMMSS`, whole seconds, no offset.
pub fn timestamp_token(now: NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}
