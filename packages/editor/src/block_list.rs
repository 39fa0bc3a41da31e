//! # Block List Controller
//!
//! Ordering primitives for the article body and the drag-to-reorder
//! gesture. A gesture names the block being dragged; the preview leaves
//! that block out until the gesture ends or is cancelled.

use crate::mutations::MutationError;

/// Move one element so it ends up at `to`, shifting the elements in
/// between by one. Everything else keeps its relative order.
pub fn move_element<T>(seq: &mut Vec<T>, from: usize, to: usize) -> Result<(), MutationError> {
    let len = seq.len();
    for index in [from, to] {
        if index >= len {
            return Err(MutationError::BlockIndexOutOfRange { index, len });
        }
    }

    if from != to {
        let item = seq.remove(from);
        seq.insert(to, item);
    }
    Ok(())
}

/// An in-progress drag of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    pub source: usize,
}

impl DragGesture {
    pub fn new(source: usize) -> Self {
        Self { source }
    }

    /// The move this gesture resolves to when dropped over `over`.
    /// Dropping outside the list or onto the source itself is a no-op.
    pub fn resolve(self, over: Option<usize>) -> Option<(usize, usize)> {
        match over {
            Some(to) if to != self.source => Some((self.source, to)),
            _ => None,
        }
    }
}
