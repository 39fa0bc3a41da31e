//! # Article Mutations
//!
//! High-level semantic operations on an article.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one user gesture
//! 2. **Validated**: Structural preconditions (indices, variant) are checked
//!    before anything changes; a rejected mutation leaves the article intact
//! 3. **Type-stable**: No mutation changes the type tag of an existing block
//!
//! ## Mutation Semantics
//!
//! ### MoveBlock
//! - Single-element list move, not a swap
//! - Relative order of all other blocks is preserved
//!
//! ### CommitLines
//! - Atomic replacement of a block's text lines with the editor's draft
//! - Blank lines are accepted here and reported by validation
//!
//! ### SetEntryField / SetMeta
//! - Image sources and the cover image are URL-entry fields: an invalid URL
//!   is rejected and the article keeps its previous value

use crate::block_list::move_element;
use folio_model::{
    default_block, default_hypertext, default_image, default_link, is_valid_url, Article, Block,
    BlockKind, Category, FieldPath,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a registry default of `kind` to the end of the body
    AppendBlock { kind: BlockKind },

    /// Remove the block at `index`; later blocks shift down by one
    RemoveBlock { index: usize },

    /// Move the block at `from` so it ends up at `to`
    MoveBlock { from: usize, to: usize },

    /// Set a scalar article field
    SetMeta { field: MetaField, value: String },

    /// Set the article category
    SetCategory { category: Category },

    /// Edit the payload of one block
    EditBlock { index: usize, edit: BlockEdit },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MetaField {
    Id,
    Title,
    Description,
    CoverImage,
    /// Empty value clears the field
    ForeignUrl,
}

/// Payload edits, checked against the block's variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BlockEdit {
    /// `tag` blocks
    SetTagCategory { category: Category },

    /// Replace the text lines (headings, body, callout, lists)
    CommitLines { lines: Vec<String> },

    /// Append a placeholder entry (body hypertext, image, hyperlink)
    AppendEntry,

    RemoveEntry { entry: usize },

    SetEntryField {
        entry: usize,
        field: EntryField,
        value: String,
    },

    /// `callout` call-to-action
    SetCta { field: CtaField, value: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    Keyword,
    Href,
    Src,
    Alt,
    Title,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CtaField {
    Text,
    Action,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block index {index} out of range (body has {len} blocks)")]
    BlockIndexOutOfRange { index: usize, len: usize },

    #[error("Entry {entry} out of range for block {index} ({len} entries)")]
    EntryIndexOutOfRange { index: usize, entry: usize, len: usize },

    #[error("Line {line} out of range for block {index} ({len} lines)")]
    LineIndexOutOfRange { index: usize, line: usize, len: usize },

    #[error("Edit '{edit}' does not apply to a {kind} block")]
    IncompatibleEdit { kind: BlockKind, edit: &'static str },

    #[error("Invalid URL for {path}: {value:?}")]
    InvalidUrl { path: String, value: String },
}

impl BlockEdit {
    fn name(&self) -> &'static str {
        match self {
            BlockEdit::SetTagCategory { .. } => "setTagCategory",
            BlockEdit::CommitLines { .. } => "commitLines",
            BlockEdit::AppendEntry => "appendEntry",
            BlockEdit::RemoveEntry { .. } => "removeEntry",
            BlockEdit::SetEntryField { .. } => "setEntryField",
            BlockEdit::SetCta { .. } => "setCta",
        }
    }
}

impl Mutation {
    /// Apply mutation to the article with validation
    pub fn apply(&self, article: &mut Article) -> Result<(), MutationError> {
        self.validate(article)?;

        match self {
            Mutation::AppendBlock { kind } => {
                article.body.push(default_block(*kind));
                Ok(())
            }

            Mutation::RemoveBlock { index } => {
                article.body.remove(*index);
                Ok(())
            }

            Mutation::MoveBlock { from, to } => move_element(&mut article.body, *from, *to),

            Mutation::SetMeta { field, value } => {
                Self::apply_set_meta(article, *field, value);
                Ok(())
            }

            Mutation::SetCategory { category } => {
                article.category = *category;
                Ok(())
            }

            Mutation::EditBlock { index, edit } => {
                Self::apply_edit(&mut article.body[*index], *index, edit)
            }
        }
    }

    fn apply_set_meta(article: &mut Article, field: MetaField, value: &str) {
        let value = value.to_string();
        match field {
            MetaField::Id => article.id = value,
            MetaField::Title => article.title = value,
            MetaField::Description => article.meta.description = value,
            MetaField::CoverImage => article.meta.cover_image = value,
            MetaField::ForeignUrl => {
                article.foreign_url = if value.is_empty() { None } else { Some(value) };
            }
        }
    }

    fn apply_edit(block: &mut Block, index: usize, edit: &BlockEdit) -> Result<(), MutationError> {
        let kind = block.kind();
        let incompatible = || MutationError::IncompatibleEdit {
            kind,
            edit: edit.name(),
        };

        match edit {
            BlockEdit::SetTagCategory { category } => match block {
                Block::Tag { content } => {
                    *content = *category;
                    Ok(())
                }
                _ => Err(incompatible()),
            },

            BlockEdit::CommitLines { lines } => {
                let content = block.lines_mut().ok_or_else(incompatible)?;
                *content = lines.clone();
                Ok(())
            }

            BlockEdit::AppendEntry => match block {
                Block::Body { hypertext, .. } => {
                    hypertext.get_or_insert_with(Vec::new).push(default_hypertext());
                    Ok(())
                }
                Block::Image { content } => {
                    content.push(default_image());
                    Ok(())
                }
                Block::Hyperlink { content } => {
                    content.push(default_link());
                    Ok(())
                }
                _ => Err(incompatible()),
            },

            BlockEdit::RemoveEntry { entry } => {
                let len = entry_count(block).ok_or_else(incompatible)?;
                if *entry >= len {
                    return Err(MutationError::EntryIndexOutOfRange {
                        index,
                        entry: *entry,
                        len,
                    });
                }
                match block {
                    Block::Body {
                        hypertext: Some(list),
                        ..
                    } => {
                        list.remove(*entry);
                    }
                    Block::Image { content } => {
                        content.remove(*entry);
                    }
                    Block::Hyperlink { content } => {
                        content.remove(*entry);
                    }
                    _ => return Err(incompatible()),
                }
                Ok(())
            }

            BlockEdit::SetEntryField {
                entry,
                field,
                value,
            } => {
                let len = entry_count(block).ok_or_else(incompatible)?;
                if *entry >= len {
                    return Err(MutationError::EntryIndexOutOfRange {
                        index,
                        entry: *entry,
                        len,
                    });
                }

                let value = value.clone();
                match (block, field) {
                    (Block::Body { hypertext: Some(list), .. }, EntryField::Keyword) => {
                        list[*entry].keyword = value
                    }
                    (Block::Body { hypertext: Some(list), .. }, EntryField::Href) => {
                        list[*entry].href = value
                    }
                    (Block::Image { content }, EntryField::Src) => {
                        if !is_valid_url(&value) {
                            return Err(MutationError::InvalidUrl {
                                path: entry_path(index, "content", *entry, "src"),
                                value,
                            });
                        }
                        content[*entry].src = value
                    }
                    (Block::Image { content }, EntryField::Alt) => content[*entry].alt = value,
                    (Block::Hyperlink { content }, EntryField::Title) => {
                        content[*entry].title = value
                    }
                    (Block::Hyperlink { content }, EntryField::Href) => {
                        content[*entry].href = value
                    }
                    _ => return Err(incompatible()),
                }
                Ok(())
            }

            BlockEdit::SetCta { field, value } => match block {
                Block::Callout { cta, .. } => {
                    match field {
                        CtaField::Text => cta.text = value.clone(),
                        CtaField::Action => cta.action = value.clone(),
                    }
                    Ok(())
                }
                _ => Err(incompatible()),
            },
        }
    }

    /// Validate without applying
    pub fn validate(&self, article: &Article) -> Result<(), MutationError> {
        let len = article.body.len();
        let check_index = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(MutationError::BlockIndexOutOfRange { index, len })
            }
        };

        match self {
            Mutation::AppendBlock { .. } | Mutation::SetCategory { .. } => Ok(()),

            Mutation::RemoveBlock { index } => check_index(*index),

            Mutation::MoveBlock { from, to } => {
                check_index(*from)?;
                check_index(*to)
            }

            Mutation::SetMeta { field, value } => match field {
                MetaField::CoverImage if !is_valid_url(value) => Err(MutationError::InvalidUrl {
                    path: FieldPath::root().key("meta").key("coverImage").to_string(),
                    value: value.clone(),
                }),
                _ => Ok(()),
            },

            Mutation::EditBlock { index, .. } => check_index(*index),
        }
    }
}

/// Number of entries in the block's repeatable list, if it has one.
fn entry_count(block: &Block) -> Option<usize> {
    match block {
        Block::Body { hypertext, .. } => Some(hypertext.as_ref().map_or(0, Vec::len)),
        Block::Image { content } => Some(content.len()),
        Block::Hyperlink { content } => Some(content.len()),
        _ => None,
    }
}

fn entry_path(index: usize, list: &'static str, entry: usize, field: &'static str) -> String {
    FieldPath::root()
        .key("body")
        .index(index)
        .key(list)
        .index(entry)
        .key(field)
        .to_string()
}

/// Result of applying a mutation
#[derive(Debug, Clone, Serialize)]
pub struct MutationResult {
    /// New version number
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with(kinds: &[BlockKind]) -> Article {
        let mut article = Article::with_id("test");
        for kind in kinds {
            article.body.push(default_block(*kind));
        }
        article
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::EditBlock {
            index: 2,
            edit: BlockEdit::SetEntryField {
                entry: 0,
                field: EntryField::Href,
                value: "https://hotcakeapp.com".to_string(),
            },
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json["type"], "editBlock");
        assert_eq!(json["edit"]["op"], "setEntryField");

        let deserialized: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_append_block_json_uses_type_tag() {
        let json = r#"{ "type": "appendBlock", "kind": "list-dot" }"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();
        assert_eq!(
            mutation,
            Mutation::AppendBlock {
                kind: BlockKind::ListDot
            }
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range_index() {
        let article = article_with(&[BlockKind::H1]);
        let mutation = Mutation::RemoveBlock { index: 1 };

        assert_eq!(
            mutation.validate(&article),
            Err(MutationError::BlockIndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_edit_must_match_variant() {
        let mut article = article_with(&[BlockKind::Divider]);
        let mutation = Mutation::EditBlock {
            index: 0,
            edit: BlockEdit::CommitLines {
                lines: vec!["x".to_string()],
            },
        };

        let err = mutation.apply(&mut article).unwrap_err();
        assert!(matches!(
            err,
            MutationError::IncompatibleEdit {
                kind: BlockKind::Divider,
                ..
            }
        ));
        assert_eq!(article.body[0], Block::Divider);
    }

    #[test]
    fn test_hypertext_append_creates_list() {
        let mut article = article_with(&[BlockKind::Body]);
        Mutation::EditBlock {
            index: 0,
            edit: BlockEdit::AppendEntry,
        }
        .apply(&mut article)
        .unwrap();

        match &article.body[0] {
            Block::Body { hypertext, .. } => assert_eq!(hypertext.as_ref().unwrap().len(), 1),
            other => panic!("Expected body block, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_image_src_is_rejected_without_change() {
        let mut article = article_with(&[BlockKind::Image]);
        let before = article.clone();

        let err = Mutation::EditBlock {
            index: 0,
            edit: BlockEdit::SetEntryField {
                entry: 0,
                field: EntryField::Src,
                value: "not a url".to_string(),
            },
        }
        .apply(&mut article)
        .unwrap_err();

        assert!(matches!(err, MutationError::InvalidUrl { ref path, .. } if path == "body.0.content.0.src"));
        assert_eq!(article, before);
    }

    #[test]
    fn test_foreign_url_cleared_by_empty_value() {
        let mut article = Article::new();
        article.foreign_url = Some("https://a.example".to_string());

        Mutation::SetMeta {
            field: MetaField::ForeignUrl,
            value: String::new(),
        }
        .apply(&mut article)
        .unwrap();

        assert!(article.foreign_url.is_none());
    }
}
