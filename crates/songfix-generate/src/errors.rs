use thiserror::Error;

use crate::checks::VerificationReport;

/// Errors emitted by the fixture engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no schema selected")]
    SchemaNotSelected,
    #[error("generated fixture pair failed verification ({} error(s))", .0.errors.len())]
    InvalidFixture(VerificationReport),
}
