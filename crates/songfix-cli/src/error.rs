use songfix_core::Error as CoreError;
use songfix_generate::GenerationError;
use thiserror::Error;

use crate::workspace::WorkspaceError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("schema not found: {name} (version {version})")]
    SchemaNotFound { name: String, version: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
