//! Error types for the editor

use folio_model::{ModelError, ValidationReport};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    /// Export refused; the report lists every failing field
    #[error("Article has {} invalid field(s)", .0.errors.len())]
    Invalid(ValidationReport),

    #[error("A block is being dragged; finish or cancel the gesture first")]
    DragInProgress,

    #[error("No drag gesture in progress")]
    NoDragInProgress,

    #[error("Block {index} has no text lines")]
    NotALinesBlock { index: usize },
}
