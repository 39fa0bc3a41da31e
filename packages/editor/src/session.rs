//! # Edit Session
//!
//! One author's editing state: the document behind its preview pipeline,
//! the block-type picker, and an optional drag gesture.
//!
//! While a block is being dragged no block may be appended, removed or
//! reordered except by ending the gesture, and the preview leaves the
//! dragged block out.

use crate::array_field::{LineOp, LinesDraft};
use crate::block_list::DragGesture;
use crate::dispatcher::{article_editor, ArticleEditor};
use crate::{Document, EditorError, Mutation, MutationError, Pipeline, PipelineResult};
use folio_compiler_html::{compile_meta_card, CompileOptions};
use folio_model::{Article, ExportArtifact, ValidationReport};

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    pipeline: Pipeline,
    picker_open: bool,
    drag: Option<DragGesture>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            pipeline: Pipeline::new(document),
            picker_open: false,
            drag: None,
        }
    }

    pub fn document(&self) -> &Document {
        self.pipeline.document()
    }

    pub fn article(&self) -> &Article {
        self.pipeline.document().article()
    }

    /// Apply a mutation from the client
    pub fn apply(&mut self, mutation: Mutation) -> Result<PipelineResult, EditorError> {
        if self.drag.is_some() && changes_order(&mutation) {
            return Err(EditorError::DragInProgress);
        }

        let closes_picker = matches!(mutation, Mutation::AppendBlock { .. });
        let result = self.pipeline.apply_mutation(mutation)?;
        if closes_picker {
            self.picker_open = false;
        }
        Ok(result)
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Index of the block being dragged
    pub fn dragging(&self) -> Option<usize> {
        self.drag.map(|gesture| gesture.source)
    }

    pub fn start_drag(&mut self, index: usize) -> Result<(), EditorError> {
        if self.drag.is_some() {
            return Err(EditorError::DragInProgress);
        }
        let len = self.article().body.len();
        if index >= len {
            return Err(MutationError::BlockIndexOutOfRange { index, len }.into());
        }

        tracing::debug!(session = %self.id, index, "drag started");
        self.drag = Some(DragGesture::new(index));
        Ok(())
    }

    /// Drop the dragged block over `over`. Returns the pipeline result when
    /// the drop moved a block.
    pub fn end_drag(&mut self, over: Option<usize>) -> Result<Option<PipelineResult>, EditorError> {
        let gesture = self.drag.take().ok_or(EditorError::NoDragInProgress)?;

        match gesture.resolve(over) {
            Some((from, to)) => {
                tracing::debug!(session = %self.id, from, to, "drag dropped");
                let result = self.pipeline.apply_mutation(Mutation::MoveBlock { from, to })?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    /// Returns false when no gesture was active
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Fresh draft of a block's text lines
    pub fn lines_draft(&self, index: usize) -> Result<LinesDraft, EditorError> {
        let body = &self.article().body;
        let block = body.get(index).ok_or(MutationError::BlockIndexOutOfRange {
            index,
            len: body.len(),
        })?;
        LinesDraft::for_block(index, block).ok_or(EditorError::NotALinesBlock { index })
    }

    /// Apply one line op through a draft and commit it. Ops that leave the
    /// draft unchanged (removing the only line) return `None`; an op on a
    /// line the block does not have is an error.
    pub fn apply_line_op(
        &mut self,
        index: usize,
        op: LineOp,
    ) -> Result<Option<PipelineResult>, EditorError> {
        let mut draft = self.lines_draft(index)?;
        if !draft.apply(op)? {
            return Ok(None);
        }
        self.apply(draft.commit()).map(Some)
    }

    pub fn validate(&self) -> ValidationReport {
        self.document().validate()
    }

    pub fn editor(&self) -> ArticleEditor {
        article_editor(self.article(), &self.validate(), self.dragging())
    }

    pub fn preview(&mut self) -> String {
        let hidden = self.dragging();
        self.pipeline.preview(hidden)
    }

    pub fn meta_card(&self) -> String {
        compile_meta_card(self.article(), CompileOptions::default())
    }

    pub fn export(&self) -> Result<ExportArtifact, EditorError> {
        self.document().export()
    }
}

fn changes_order(mutation: &Mutation) -> bool {
    matches!(
        mutation,
        Mutation::AppendBlock { .. } | Mutation::RemoveBlock { .. } | Mutation::MoveBlock { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::BlockKind;

    fn session_with(kinds: &[BlockKind]) -> EditSession {
        let mut session = EditSession::new("test", Document::default());
        for kind in kinds {
            session.apply(Mutation::AppendBlock { kind: *kind }).unwrap();
        }
        session
    }

    #[test]
    fn test_append_closes_picker() {
        let mut session = session_with(&[]);
        session.open_picker();
        assert!(session.picker_open());

        session
            .apply(Mutation::AppendBlock {
                kind: BlockKind::Tag,
            })
            .unwrap();
        assert!(!session.picker_open());
    }

    #[test]
    fn test_remove_rejected_while_dragging() {
        let mut session = session_with(&[BlockKind::H1, BlockKind::H2]);
        session.start_drag(0).unwrap();

        let err = session.apply(Mutation::RemoveBlock { index: 1 }).unwrap_err();
        assert!(matches!(err, EditorError::DragInProgress));
        assert_eq!(session.article().body.len(), 2);
    }

    #[test]
    fn test_second_drag_rejected() {
        let mut session = session_with(&[BlockKind::H1, BlockKind::H2]);
        session.start_drag(0).unwrap();
        assert!(matches!(session.start_drag(1), Err(EditorError::DragInProgress)));
    }

    #[test]
    fn test_cancel_restores_preview() {
        let mut session = session_with(&[BlockKind::Divider]);
        session.start_drag(0).unwrap();
        assert!(!session.preview().contains("block-divider"));

        assert!(session.cancel_drag());
        assert!(session.preview().contains("block-divider"));
        assert!(!session.cancel_drag());
    }

    #[test]
    fn test_end_drag_without_gesture() {
        let mut session = session_with(&[BlockKind::H1]);
        assert!(matches!(
            session.end_drag(Some(0)),
            Err(EditorError::NoDragInProgress)
        ));
    }

    #[test]
    fn test_line_op_on_lineless_block() {
        let mut session = session_with(&[BlockKind::Divider]);
        assert!(matches!(
            session.apply_line_op(0, LineOp::Append),
            Err(EditorError::NotALinesBlock { index: 0 })
        ));
    }
}
