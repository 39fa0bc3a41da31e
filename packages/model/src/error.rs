use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    /// A block type tag outside the registry. This is a registry/schema
    /// mismatch, not a user error.
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
