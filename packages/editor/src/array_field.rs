//! # Text Line Drafts
//!
//! Local editing state for a block's `content` lines. The draft always
//! keeps at least one line: removing the last remaining line does nothing.
//! Nothing reaches the article until [`LinesDraft::commit`] produces the
//! replacing mutation.

use crate::mutations::{BlockEdit, Mutation, MutationError};
use folio_model::{default_line, is_blank, Block, REQUIRED};
use serde::{Deserialize, Serialize};

/// One edit to a line list, as sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum LineOp {
    Append,
    Remove { line: usize },
    Edit { line: usize, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinesDraft {
    index: usize,
    lines: Vec<String>,
    committed: Vec<String>,
}

impl LinesDraft {
    /// Draft for the block at `index`, or `None` if it carries no text lines.
    pub fn for_block(index: usize, block: &Block) -> Option<Self> {
        let lines = block.lines()?.to_vec();
        Some(Self {
            index,
            committed: lines.clone(),
            lines,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn append(&mut self) {
        self.lines.push(default_line());
    }

    pub fn can_remove(&self) -> bool {
        self.lines.len() > 1
    }

    /// Remove one line. Returns false when nothing was removed.
    pub fn remove(&mut self, line: usize) -> bool {
        if !self.can_remove() || line >= self.lines.len() {
            return false;
        }
        self.lines.remove(line);
        true
    }

    /// Replace one line's text. Returns false for an unknown line.
    pub fn edit(&mut self, line: usize, value: impl Into<String>) -> bool {
        match self.lines.get_mut(line) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Per-line error messages; blank lines are required.
    pub fn line_errors(&self) -> Vec<Option<&'static str>> {
        self.lines
            .iter()
            .map(|line| is_blank(line).then_some(REQUIRED))
            .collect()
    }

    /// Apply a client op. Returns `Ok(false)` when the draft did not change
    /// and an error when the op names a line the draft does not have.
    pub fn apply(&mut self, op: LineOp) -> Result<bool, MutationError> {
        match op {
            LineOp::Append => {
                self.append();
                Ok(true)
            }
            LineOp::Remove { line } => {
                self.check_line(line)?;
                Ok(self.remove(line))
            }
            LineOp::Edit { line, value } => {
                self.check_line(line)?;
                Ok(self.edit(line, value))
            }
        }
    }

    fn check_line(&self, line: usize) -> Result<(), MutationError> {
        if line < self.lines.len() {
            Ok(())
        } else {
            Err(MutationError::LineIndexOutOfRange {
                index: self.index,
                line,
                len: self.lines.len(),
            })
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.lines != self.committed
    }

    /// Mutation that writes the draft back into the article.
    pub fn commit(&mut self) -> Mutation {
        self.committed = self.lines.clone();
        Mutation::EditBlock {
            index: self.index,
            edit: BlockEdit::CommitLines {
                lines: self.lines.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{default_block, BlockKind};

    fn draft(lines: &[&str]) -> LinesDraft {
        let block = Block::ListDot {
            content: lines.iter().map(|l| l.to_string()).collect(),
        };
        LinesDraft::for_block(0, &block).unwrap()
    }

    #[test]
    fn test_no_draft_for_lineless_blocks() {
        assert!(LinesDraft::for_block(0, &Block::Divider).is_none());
        assert!(LinesDraft::for_block(0, &default_block(BlockKind::Image)).is_none());
        assert!(LinesDraft::for_block(0, &default_block(BlockKind::Callout)).is_some());
    }

    #[test]
    fn test_last_line_cannot_be_removed() {
        let mut draft = draft(&["only"]);
        assert!(!draft.can_remove());
        assert!(!draft.remove(0));
        assert_eq!(draft.lines(), &["only".to_string()]);
    }

    #[test]
    fn test_remove_shifts_later_lines() {
        let mut draft = draft(&["a", "b", "c"]);
        assert!(draft.remove(0));
        assert_eq!(draft.lines(), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_append_uses_placeholder() {
        let mut draft = draft(&["a"]);
        draft.append();
        assert_eq!(draft.lines()[1], default_line());
        assert!(draft.is_dirty());
    }

    #[test]
    fn test_blank_line_reports_required() {
        let mut draft = draft(&["a", "b"]);
        draft.edit(1, "   ");
        assert_eq!(draft.line_errors(), vec![None, Some(REQUIRED)]);
    }

    #[test]
    fn test_op_on_missing_line_is_an_error() {
        let mut two = draft(&["a", "b"]);
        assert_eq!(
            two.apply(LineOp::Edit {
                line: 2,
                value: "x".to_string()
            }),
            Err(MutationError::LineIndexOutOfRange {
                index: 0,
                line: 2,
                len: 2
            })
        );
        assert!(two.apply(LineOp::Remove { line: 7 }).is_err());
        assert!(!two.is_dirty());

        let mut single = draft(&["only"]);
        assert_eq!(single.apply(LineOp::Remove { line: 0 }), Ok(false));
        assert!(single.apply(LineOp::Remove { line: 1 }).is_err());
    }

    #[test]
    fn test_commit_builds_mutation_and_clears_dirty() {
        let mut draft = draft(&["a"]);
        draft.edit(0, "changed");
        let mutation = draft.commit();

        assert!(!draft.is_dirty());
        assert_eq!(
            mutation,
            Mutation::EditBlock {
                index: 0,
                edit: BlockEdit::CommitLines {
                    lines: vec!["changed".to_string()]
                }
            }
        );
    }
}
