//! # Block Type Registry
//!
//! Default payloads for newly appended blocks. Every default satisfies the
//! article invariants: non-blank text lines and absolute URLs.

use crate::{Block, BlockKind, CallToAction, Category, Hypertext, ImageSource, Link, ModelError};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://hotcakeapp.com/assets/images/image-placeholder.png";
pub const PLACEHOLDER_LINK_URL: &str = "https://hotcakeapp.com";

/// Structurally valid default block for a type.
pub fn default_block(kind: BlockKind) -> Block {
    match kind {
        BlockKind::Tag => Block::Tag {
            content: Category::School,
        },
        BlockKind::H1 => Block::H1 {
            content: lines(&["This is a heading"]),
        },
        BlockKind::H2 => Block::H2 {
            content: lines(&["This is a heading"]),
        },
        BlockKind::H3 => Block::H3 {
            content: lines(&["This is a heading"]),
        },
        BlockKind::Body => Block::Body {
            content: lines(&["This is body text"]),
            hypertext: None,
        },
        BlockKind::Image => Block::Image {
            content: vec![ImageSource {
                src: PLACEHOLDER_IMAGE_URL.to_string(),
                alt: "This is an image".to_string(),
            }],
        },
        BlockKind::Callout => Block::Callout {
            content: lines(&["This is a call-out"]),
            cta: CallToAction {
                text: "This is a call-out".to_string(),
                action: PLACEHOLDER_LINK_URL.to_string(),
            },
        },
        BlockKind::Divider => Block::Divider,
        BlockKind::Hyperlink => Block::Hyperlink {
            content: vec![Link {
                title: "This is a hyperlink".to_string(),
                href: PLACEHOLDER_LINK_URL.to_string(),
            }],
        },
        BlockKind::ListDecimal => Block::ListDecimal {
            content: lines(&["List item 1", "List item 2"]),
        },
        BlockKind::ListDot => Block::ListDot {
            content: lines(&["List item 1", "List item 2"]),
        },
    }
}

/// Default block for a raw type tag. An unknown tag is a registry mismatch
/// and must reach the caller as an error, never as an empty block.
pub fn default_block_for_tag(tag: &str) -> Result<Block, ModelError> {
    Ok(default_block(tag.parse()?))
}

/// Line appended by the text-lines control.
pub fn default_line() -> String {
    "New line".to_string()
}

pub fn default_hypertext() -> Hypertext {
    Hypertext {
        keyword: "keyword".to_string(),
        href: PLACEHOLDER_LINK_URL.to_string(),
    }
}

pub fn default_image() -> ImageSource {
    ImageSource {
        src: PLACEHOLDER_IMAGE_URL.to_string(),
        alt: "Image description".to_string(),
    }
}

pub fn default_link() -> Link {
    Link {
        title: "Website title".to_string(),
        href: PLACEHOLDER_LINK_URL.to_string(),
    }
}

fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_has_requested_kind() {
        for kind in BlockKind::ALL {
            assert_eq!(default_block(kind).kind(), kind);
        }
    }

    #[test]
    fn test_default_for_unknown_tag_fails() {
        assert!(matches!(
            default_block_for_tag("carousel"),
            Err(ModelError::UnknownBlockType(_))
        ));
    }

    #[test]
    fn test_list_defaults_have_two_lines() {
        let block = default_block_for_tag("list-dot").unwrap();
        assert_eq!(block.lines().unwrap().len(), 2);
    }
}
