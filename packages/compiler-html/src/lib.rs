//! # Folio HTML Compiler
//!
//! Read-only rendering of article blocks: the live preview pane, the
//! add-block picker samples, the meta preview card and standalone pages.
//! Rendering is pure; nothing here mutates the article.

mod compiler;
mod hypertext;
mod picker;


pub use compiler::{
    compile_article, compile_block, compile_meta_card, compile_preview, compile_raw_article,
    CompileError, CompileOptions,
};
pub use hypertext::{substitute_hypertext, Segment};
pub use picker::{compile_picker, PickerEntry};
