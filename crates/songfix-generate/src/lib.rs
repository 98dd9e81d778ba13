//! Fixture generation engine for songfix.
//!
//! Given a registry schema, this crate derives shared identifiers, synthesizes
//! one plausible value per field, and encodes a FASTA sequence artifact plus a
//! TSV metadata artifact that references it.

pub mod checks;
pub mod clock;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod identifiers;
pub mod model;
pub mod output;

pub use checks::{VerificationReport, verify_pair};
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::FixtureEngine;
pub use errors::GenerationError;
pub use model::{
    FixtureArtifact, FixturePair, FixtureReport, GenerateOptions, GeneratedIdentifiers,
};
