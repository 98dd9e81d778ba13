//! Artifact encoders.

pub mod fasta;
pub mod tsv;

pub use fasta::encode_sequence;
pub use tsv::{EncodedTable, encode_table, encode_table_with_report};
