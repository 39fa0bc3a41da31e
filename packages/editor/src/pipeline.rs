//! # Editing Pipeline
//!
//! Coordinates Mutate → Render for the live preview.
//!
//! The Pipeline manages:
//! - Applying mutations
//! - Re-rendering the preview pane
//! - Caching the last full preview

use crate::{Document, EditorError, Mutation};
use folio_compiler_html::{compile_preview, CompileOptions};

/// Manages the edit → preview pipeline
pub struct Pipeline {
    document: Document,
    options: CompileOptions,
    last_preview: Option<String>,
}

impl Pipeline {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            options: CompileOptions::default(),
            last_preview: None,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self.last_preview = None;
        self
    }

    /// Apply mutation and re-render the preview
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        let mutation_result = self.document.apply(mutation)?;

        let preview = compile_preview(&self.document.article().body, None, self.options.clone());
        let changed = self.last_preview.as_deref() != Some(preview.as_str());
        self.last_preview = Some(preview.clone());

        Ok(PipelineResult {
            version: mutation_result.version,
            preview,
            changed,
        })
    }

    /// Preview HTML with the block at `hidden` left out. The full preview is
    /// cached; previews with a hidden block are rendered on demand.
    pub fn preview(&mut self, hidden: Option<usize>) -> String {
        let body = &self.document.article().body;
        if hidden.is_some() {
            return compile_preview(body, hidden, self.options.clone());
        }

        self.last_preview
            .get_or_insert_with(|| compile_preview(body, None, self.options.clone()))
            .clone()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the document wholesale (e.g. after loading a file)
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.last_preview = None;
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineResult {
    pub version: u64,
    pub preview: String,
    /// False when the mutation did not change what the preview shows
    pub changed: bool,
}
