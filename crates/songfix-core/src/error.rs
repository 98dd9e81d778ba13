use thiserror::Error;

/// Core error type shared across songfix crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The registry document could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A schema violates catalog invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// Two schemas share the same `(name, version)` identity.
    #[error("duplicate schema: {name} v{version}")]
    DuplicateSchema { name: String, version: u32 },
}

/// Convenience alias for results returned by songfix crates.
pub type Result<T> = std::result::Result<T, Error>;
