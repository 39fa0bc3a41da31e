//! # Folio Editor
//!
//! Editing engine for Folio articles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Article, Block, validation           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Apply mutations with validation          │
//! │  - Block list ordering and drag gestures    │
//! │  - Text line drafts                         │
//! │  - Per-block form controls                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Article → preview HTML       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Article is source of truth**: preview HTML and form controls are
//!    derived views
//! 2. **Validation is data**: invalid fields are reported, never thrown;
//!    only export is gated on them
//! 3. **Type-stable blocks**: an edit never changes a block's type
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Document, EditSession, Mutation};
//! use folio_model::BlockKind;
//!
//! let mut session = EditSession::new("local", Document::load("salon.txt")?);
//!
//! session.open_picker();
//! session.apply(Mutation::AppendBlock { kind: BlockKind::Divider })?;
//!
//! let html = session.preview();
//! let artifact = session.export()?;
//! ```

mod array_field;
mod block_list;
mod dispatcher;
mod document;
mod errors;
mod mutations;
mod pipeline;
mod session;

pub use array_field::{LineOp, LinesDraft};
pub use block_list::{move_element, DragGesture};
pub use dispatcher::{article_editor, block_editor, ArticleEditor, BlockEditor, Control, SelectOption};
pub use document::Document;
pub use errors::EditorError;
pub use mutations::{
    BlockEdit, CtaField, EntryField, MetaField, Mutation, MutationError, MutationResult,
};
pub use pipeline::{Pipeline, PipelineResult};
pub use session::EditSession;
