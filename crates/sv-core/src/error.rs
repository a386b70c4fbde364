//! Error taxonomy shared by the core model and the editor.
//!
//! Every condition is local and recoverable: the caller (usually the UI
//! layer) decides whether to surface it or ignore it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("node index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("cannot delete the last remaining node")]
    CannotDeleteLastNode,

    #[error("path is already closed")]
    AlreadyClosed,

    #[error("path is already open")]
    AlreadyOpen,

    /// Every node id of the sequence's counter has been handed out.
    #[error("node ids exhausted")]
    IdsExhausted,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    /// Malformed SVG path data.
    #[error("path data parse error: {0}")]
    Parse(String),

    /// Binary element list could not be encoded or decoded.
    #[error("element codec error: {0}")]
    Codec(String),
}

impl PathError {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
