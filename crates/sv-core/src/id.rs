use crate::error::PathError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable identifier for a node in a `NodeSequence`.
///
/// Allocated from the owning sequence's counter and never reused within it.
/// Commands carry the id of the node they recreate, so a node deleted and
/// restored by undo keeps its identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator owned by a node sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) fn allocate(&mut self) -> Result<NodeId, PathError> {
        let id = NodeId(self.next);
        self.next = self.next.checked_add(1).ok_or(PathError::IdsExhausted)?;
        Ok(id)
    }

    /// Make sure ids restored from commands are never handed out again.
    pub(crate) fn reserve(&mut self, id: NodeId) -> Result<(), PathError> {
        if id.0 >= self.next {
            self.next = id.0.checked_add(1).ok_or(PathError::IdsExhausted)?;
        }
        Ok(())
    }
}
