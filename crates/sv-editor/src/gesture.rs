//! Drag gesture coalescing.
//!
//! A drag moves a node on every pointer frame but must leave exactly one
//! undo step behind. `DragGesture` keeps the transient state for that: which
//! node is held (by id, so the gesture survives index shifts), where it
//! started, and the pointer offset from its centre.

use crate::commands::Command;
use sv_core::error::PathError;
use sv_core::id::NodeId;
use sv_core::model::{NodeSequence, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    node: NodeId,
    origin: Point,
    /// Pointer position minus node position at grab time.
    offset: Point,
}

impl DragGesture {
    /// Grab the node at `index` with the pointer at `pointer`.
    pub fn begin(seq: &NodeSequence, index: usize, pointer: Point) -> Result<Self, PathError> {
        let node = seq.node(index)?;
        Ok(Self {
            node: node.id,
            origin: node.position,
            offset: pointer.delta(node.position),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Position of the node before the drag started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    fn index(&self, seq: &NodeSequence) -> Result<usize, PathError> {
        seq.index_of(self.node)
            .ok_or(PathError::InvalidInput("dragged node no longer exists"))
    }

    /// Follow the pointer. Returns the node's new position.
    pub fn update(&self, seq: &mut NodeSequence, pointer: Point) -> Result<Point, PathError> {
        let index = self.index(seq)?;
        let position = pointer.delta(self.offset);
        seq.set_position(index, position)?;
        Ok(position)
    }

    /// End the drag. Yields the single `MoveNode` command covering the whole
    /// gesture, or `None` if the node ended where it started.
    pub fn finish(self, seq: &NodeSequence) -> Result<Option<Command>, PathError> {
        let index = self.index(seq)?;
        let to = seq.node(index)?.position;
        if to == self.origin {
            return Ok(None);
        }
        Ok(Some(Command::MoveNode {
            index,
            from: self.origin,
            to,
        }))
    }

    /// Abandon the drag and put the node back where it was.
    pub fn cancel(self, seq: &mut NodeSequence) -> Result<(), PathError> {
        let index = self.index(seq)?;
        seq.set_position(index, self.origin)
    }
}
