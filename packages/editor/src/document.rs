//! # Document Handle
//!
//! A Document wraps the one Article being edited.
//!
//! Documents can be:
//! - **Memory-backed**: created in the editor or from a JSON string
//! - **File-backed**: loaded from an exported `{id}.txt` file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Validate → Export
//!   ↓      ↓        ↓         ↓
//! JSON Mutations  Report   {id}.txt
//! ```

use crate::{EditorError, Mutation, MutationResult};
use folio_model::{validate_article, Article, ExportArtifact, ValidationReport};
use std::path::{Path, PathBuf};

/// Editable article
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file (if loaded from disk)
    pub path: Option<PathBuf>,

    /// Current version number (increments on each applied mutation)
    pub version: u64,

    article: Article,
}

impl Document {
    pub fn new(article: Article) -> Self {
        Self {
            path: None,
            version: 0,
            article,
        }
    }

    /// Parse an exported article
    pub fn from_json(text: &str) -> Result<Self, EditorError> {
        Ok(Self::new(Article::from_export_json(text)?))
    }

    /// Load an exported article from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut document = Self::from_json(&text)?;
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Apply a mutation. A rejected mutation leaves the article and the
    /// version untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        mutation.apply(&mut self.article)?;
        self.version += 1;

        tracing::debug!(version = self.version, ?mutation, "applied mutation");

        Ok(MutationResult {
            version: self.version,
        })
    }

    pub fn validate(&self) -> ValidationReport {
        validate_article(&self.article)
    }

    /// Build the `{id}.txt` artifact. Refused while any field is invalid.
    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        let report = self.validate();
        if !report.is_valid() {
            tracing::info!(
                id = %self.article.id,
                errors = report.errors.len(),
                "export refused, article has invalid fields"
            );
            return Err(EditorError::Invalid(report));
        }

        let artifact = self.article.to_export_artifact()?;
        tracing::info!(file = %artifact.file_name, "exported article");
        Ok(artifact)
    }

    /// Export into `dir`, returning the written path
    pub fn save_export(&self, dir: impl AsRef<Path>) -> Result<PathBuf, EditorError> {
        let artifact = self.export()?;
        let path = dir.as_ref().join(&artifact.file_name);
        std::fs::write(&path, artifact.contents)?;
        Ok(path)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Article::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetaField;
    use folio_model::BlockKind;

    #[test]
    fn test_version_increments_only_on_success() {
        let mut doc = Document::default();

        doc.apply(Mutation::AppendBlock {
            kind: BlockKind::Divider,
        })
        .unwrap();
        assert_eq!(doc.version, 1);

        assert!(doc.apply(Mutation::RemoveBlock { index: 5 }).is_err());
        assert_eq!(doc.version, 1);
    }

    #[test]
    fn test_export_refused_when_invalid() {
        let doc = Document::default();
        match doc.export() {
            Err(EditorError::Invalid(report)) => assert!(!report.is_valid()),
            other => panic!("Expected invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::default();
        for (field, value) in [
            (MetaField::Id, "salon"),
            (MetaField::Title, "Salon guide"),
            (MetaField::Description, "How to start"),
            (MetaField::CoverImage, "https://hotcakeapp.com/cover.png"),
        ] {
            doc.apply(Mutation::SetMeta {
                field,
                value: value.to_string(),
            })
            .unwrap();
        }

        let path = doc.save_export(dir.path()).unwrap();
        assert!(path.ends_with("salon.txt"));

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.article(), doc.article());
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    }
}
