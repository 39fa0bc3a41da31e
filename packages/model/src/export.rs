//! # Export Format
//!
//! The exported artifact is the bare Article as pretty-printed JSON (two
//! space indentation), named `{id}.txt`. No envelope, no schema version.

use crate::{Article, ModelError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

impl ExportArtifact {
    pub const CONTENT_TYPE: &'static str = "text/plain;charset=utf-8";
}

impl Article {
    pub fn to_export_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_export_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn export_file_name(&self) -> String {
        format!("{}.txt", self.id)
    }

    /// Serialize without validating. Callers that gate on validation go
    /// through the editor's `Document::export`.
    pub fn to_export_artifact(&self) -> Result<ExportArtifact, ModelError> {
        Ok(ExportArtifact {
            file_name: self.export_file_name(),
            contents: self.to_export_json()?,
        })
    }
}
