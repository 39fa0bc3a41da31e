//! Add-block picker entries: every registered block type rendered with its
//! default content as a representative sample.

use crate::compiler::{compile_block, CompileOptions};
use folio_model::{default_block, BlockKind};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PickerEntry {
    pub kind: BlockKind,
    pub label: String,
    pub html: String,
}

pub fn compile_picker(options: CompileOptions) -> Vec<PickerEntry> {
    BlockKind::ALL
        .into_iter()
        .map(|kind| PickerEntry {
            kind,
            label: kind.label(),
            html: compile_block(&default_block(kind), options.clone()),
        })
        .collect()
}
