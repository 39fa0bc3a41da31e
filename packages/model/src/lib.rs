//! # Folio Model
//!
//! Article document model for the Folio editor.
//!
//! ```text
//! Article
//!  ├─ id / title / category
//!  ├─ meta { description, coverImage }
//!  └─ body: [Block]   (render order)
//! ```
//!
//! `Block` is the single declaration of the closed set of block variants.
//! The renderer and the editor dispatcher both match on it exhaustively, so
//! adding a variant is a compile error everywhere it has not been handled.

mod article;
mod block;
mod category;
mod error;
mod export;
mod registry;
mod validation;
mod visitor;

pub use article::{Article, ArticleMeta};
pub use block::{Block, BlockKind, CallToAction, Hypertext, ImageSource, Link};
pub use category::Category;
pub use error::ModelError;
pub use export::ExportArtifact;
pub use registry::{
    default_block, default_block_for_tag, default_hypertext, default_image, default_line,
    default_link, PLACEHOLDER_IMAGE_URL, PLACEHOLDER_LINK_URL,
};
pub use validation::{
    is_blank, is_valid_url, validate_article, validate_lines, FieldError, FieldPath,
    PathSegment, ValidationReport, INVALID_URL, REQUIRED,
};
pub use visitor::{walk_article, walk_block, Visitor};
