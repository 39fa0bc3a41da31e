//! # Blocks
//!
//! One renderable unit of an article body, keyed by its `type` tag.
//!
//! The tag is fixed for the lifetime of a block. Changing the type of a
//! block means removing it and appending a new one; there is no mutation
//! that turns one variant into another.

use crate::{Category, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block variant with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "tag")]
    Tag { content: Category },

    #[serde(rename = "h1")]
    H1 { content: Vec<String> },

    #[serde(rename = "h2")]
    H2 { content: Vec<String> },

    #[serde(rename = "h3")]
    H3 { content: Vec<String> },

    #[serde(rename = "body")]
    Body {
        content: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hypertext: Option<Vec<Hypertext>>,
    },

    #[serde(rename = "image")]
    Image { content: Vec<ImageSource> },

    #[serde(rename = "callout")]
    Callout {
        content: Vec<String>,
        cta: CallToAction,
    },

    #[serde(rename = "divider")]
    Divider,

    #[serde(rename = "hyperlink")]
    Hyperlink { content: Vec<Link> },

    #[serde(rename = "list-decimal")]
    ListDecimal { content: Vec<String> },

    #[serde(rename = "list-dot")]
    ListDot { content: Vec<String> },
}

/// Inline link substitution inside a `body` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypertext {
    pub keyword: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    /// Target URL of the call-to-action button
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub href: String,
}

/// The bare type tag of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Tag,
    H1,
    H2,
    H3,
    Body,
    Image,
    Callout,
    Divider,
    Hyperlink,
    ListDecimal,
    ListDot,
}

impl BlockKind {
    /// Registry order (also the add-block picker order).
    pub const ALL: [BlockKind; 11] = [
        BlockKind::Tag,
        BlockKind::H1,
        BlockKind::H2,
        BlockKind::H3,
        BlockKind::Body,
        BlockKind::Image,
        BlockKind::Callout,
        BlockKind::Divider,
        BlockKind::Hyperlink,
        BlockKind::ListDecimal,
        BlockKind::ListDot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Tag => "tag",
            BlockKind::H1 => "h1",
            BlockKind::H2 => "h2",
            BlockKind::H3 => "h3",
            BlockKind::Body => "body",
            BlockKind::Image => "image",
            BlockKind::Callout => "callout",
            BlockKind::Divider => "divider",
            BlockKind::Hyperlink => "hyperlink",
            BlockKind::ListDecimal => "list-decimal",
            BlockKind::ListDot => "list-dot",
        }
    }

    /// Header label shown above a block in the editing drawer.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Whether the block's primary payload is an editable list of text lines.
    pub fn has_text_lines(&self) -> bool {
        matches!(
            self,
            BlockKind::H1
                | BlockKind::H2
                | BlockKind::H3
                | BlockKind::Body
                | BlockKind::Callout
                | BlockKind::ListDecimal
                | BlockKind::ListDot
        )
    }
}

impl FromStr for BlockKind {
    type Err = ModelError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownBlockType(tag.to_string()))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Tag { .. } => BlockKind::Tag,
            Block::H1 { .. } => BlockKind::H1,
            Block::H2 { .. } => BlockKind::H2,
            Block::H3 { .. } => BlockKind::H3,
            Block::Body { .. } => BlockKind::Body,
            Block::Image { .. } => BlockKind::Image,
            Block::Callout { .. } => BlockKind::Callout,
            Block::Divider => BlockKind::Divider,
            Block::Hyperlink { .. } => BlockKind::Hyperlink,
            Block::ListDecimal { .. } => BlockKind::ListDecimal,
            Block::ListDot { .. } => BlockKind::ListDot,
        }
    }

    /// Text lines of the block, for variants that carry them.
    pub fn lines(&self) -> Option<&[String]> {
        match self {
            Block::H1 { content }
            | Block::H2 { content }
            | Block::H3 { content }
            | Block::Body { content, .. }
            | Block::Callout { content, .. }
            | Block::ListDecimal { content }
            | Block::ListDot { content } => Some(content),
            Block::Tag { .. } | Block::Image { .. } | Block::Divider | Block::Hyperlink { .. } => {
                None
            }
        }
    }

    pub fn lines_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Block::H1 { content }
            | Block::H2 { content }
            | Block::H3 { content }
            | Block::Body { content, .. }
            | Block::Callout { content, .. }
            | Block::ListDecimal { content }
            | Block::ListDot { content } => Some(content),
            Block::Tag { .. } | Block::Image { .. } | Block::Divider | Block::Hyperlink { .. } => {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_round_trips_through_tag() {
        for kind in BlockKind::ALL {
            let parsed: BlockKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "quote".parse::<BlockKind>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownBlockType(tag) if tag == "quote"));
    }

    #[test]
    fn test_divider_serializes_without_payload() {
        let json = serde_json::to_value(&Block::Divider).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "divider" }));
    }

    #[test]
    fn test_body_without_hypertext_omits_field() {
        let block = Block::Body {
            content: vec!["Hello".to_string()],
            hypertext: None,
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "body", "content": ["Hello"] }));
    }

    #[test]
    fn test_list_tag_uses_kebab_case() {
        let json = r#"{ "type": "list-decimal", "content": ["one", "two"] }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind(), BlockKind::ListDecimal);
        assert_eq!(block.kind().label(), "LIST-DECIMAL");
    }

    #[test]
    fn test_lines_accessor() {
        let block = Block::Hyperlink { content: vec![] };
        assert!(block.lines().is_none());

        let mut block = Block::H2 {
            content: vec!["Title".to_string()],
        };
        block.lines_mut().unwrap().push("Second".to_string());
        assert_eq!(block.lines().unwrap().len(), 2);
    }
}
