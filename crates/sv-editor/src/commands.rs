//! Undo/Redo command stack.
//!
//! Every structural edit is recorded as a reversible `Command` holding
//! indices and values only, never node references: a node removed by one
//! step and restored by the next is a new value carrying the same `NodeId`.
//!
//! The stack is a single list with a cursor. Entries below the cursor can be
//! undone, entries at or above it can be redone, and recording a new command
//! after an undo discards the redo branch.

use sv_core::error::PathError;
use sv_core::model::{Node, NodeSequence, Point};

/// One reversible edit against `(nodes, closed)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveNode {
        index: usize,
        from: Point,
        to: Point,
    },
    /// `corner` is the flag after the edit.
    ToggleCorner { index: usize, corner: bool },
    /// `endpoints` holds the flags of the resulting first and last node
    /// before an open path forces them to corners.
    InsertNode {
        index: usize,
        node: Node,
        endpoints: Endpoints,
    },
    /// See `InsertNode` for `endpoints`.
    DeleteNode {
        index: usize,
        node: Node,
        endpoints: Endpoints,
    },
    /// Corner flags of the endpoints before closing.
    ClosePath { first_corner: bool, last_corner: bool },
    /// `index` becomes the new start; the flags belong to the nodes that
    /// become the new first and last, before opening.
    OpenPath {
        index: usize,
        first_corner: bool,
        last_corner: bool,
    },
}

/// Corner flags of the first and last node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub first: bool,
    pub last: bool,
}

impl Endpoints {
    /// Flags of the first and last node once a node flagged `corner` is
    /// inserted at `index`.
    pub fn after_insert(seq: &NodeSequence, index: usize, corner: bool) -> Self {
        let len = seq.len();
        let flag = |i: usize| seq.get(i).map_or(corner, |n| n.corner);
        Self {
            first: if index == 0 { corner } else { flag(0) },
            last: if index >= len { corner } else { flag(len - 1) },
        }
    }

    /// Flags of the first and last node once the node at `index` is gone.
    pub fn after_remove(seq: &NodeSequence, index: usize) -> Self {
        let len = seq.len();
        let flag = |i: usize| seq.get(i).is_some_and(|n| n.corner);
        let first = usize::from(index == 0);
        let last = len.saturating_sub(if index + 1 == len { 2 } else { 1 });
        Self {
            first: flag(first),
            last: flag(last),
        }
    }
}

/// Nodes created or removed by applying one step.
///
/// A created node is a fresh value; callers that keep per-node state
/// outside the core (input bindings, views) re-attach it here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Applied {
    pub created: Option<Node>,
    pub removed: Option<Node>,
}

impl Applied {
    fn created(node: Node) -> Self {
        Self {
            created: Some(node),
            removed: None,
        }
    }

    fn removed(node: Node) -> Self {
        Self {
            created: None,
            removed: Some(node),
        }
    }
}

impl Command {
    /// Apply the edit.
    pub fn redo(&self, seq: &mut NodeSequence) -> Result<Applied, PathError> {
        match *self {
            Command::MoveNode { index, to, .. } => {
                seq.set_position(index, to)?;
                Ok(Applied::default())
            }
            Command::ToggleCorner { index, corner } => {
                seq.set_corner(index, corner)?;
                Ok(Applied::default())
            }
            Command::InsertNode { index, node, .. } => {
                seq.insert(index, node)?;
                seq.normalize_endpoints();
                Ok(Applied::created(*seq.node(index)?))
            }
            Command::DeleteNode { index, .. } => {
                let removed = seq.remove(index)?;
                seq.normalize_endpoints();
                Ok(Applied::removed(removed))
            }
            Command::ClosePath { .. } => {
                set_endpoint_corners(seq, false, false)?;
                seq.set_closed(true);
                Ok(Applied::default())
            }
            Command::OpenPath { index, .. } => {
                seq.rotate_left(index);
                seq.set_closed(false);
                set_endpoint_corners(seq, true, true)?;
                Ok(Applied::default())
            }
        }
    }

    /// Reverse the edit. Exact inverse of `redo` on `(nodes, closed)`.
    pub fn undo(&self, seq: &mut NodeSequence) -> Result<Applied, PathError> {
        match *self {
            Command::MoveNode { index, from, .. } => {
                seq.set_position(index, from)?;
                Ok(Applied::default())
            }
            Command::ToggleCorner { index, corner } => {
                seq.set_corner(index, !corner)?;
                Ok(Applied::default())
            }
            Command::InsertNode {
                index, endpoints, ..
            } => {
                set_endpoint_corners(seq, endpoints.first, endpoints.last)?;
                seq.remove(index).map(Applied::removed)
            }
            Command::DeleteNode {
                index,
                node,
                endpoints,
            } => {
                set_endpoint_corners(seq, endpoints.first, endpoints.last)?;
                seq.insert(index, node)?;
                Ok(Applied::created(node))
            }
            Command::ClosePath {
                first_corner,
                last_corner,
            } => {
                seq.set_closed(false);
                set_endpoint_corners(seq, first_corner, last_corner)?;
                Ok(Applied::default())
            }
            Command::OpenPath {
                index,
                first_corner,
                last_corner,
            } => {
                set_endpoint_corners(seq, first_corner, last_corner)?;
                seq.rotate_right(index);
                seq.set_closed(true);
                Ok(Applied::default())
            }
        }
    }

    /// Short label for undo/redo menu items.
    pub fn description(&self) -> &'static str {
        match self {
            Command::MoveNode { .. } => "Move",
            Command::ToggleCorner { .. } => "Toggle",
            Command::InsertNode { .. } => "Duplicate",
            Command::DeleteNode { .. } => "Delete",
            Command::ClosePath { .. } => "Close",
            Command::OpenPath { .. } => "Open",
        }
    }
}

/// Set first and last corner flags. With a single node the first flag wins.
fn set_endpoint_corners(seq: &mut NodeSequence, first: bool, last: bool) -> Result<(), PathError> {
    if seq.is_empty() {
        return Ok(());
    }
    let last_index = seq.len() - 1;
    seq.set_corner(last_index, last)?;
    seq.set_corner(0, first)
}

/// Linear undo history with a cursor.
#[derive(Debug, Clone, Default)]
pub struct CommandStack {
    entries: Vec<Command>,
    cursor: usize,
    /// Maximum number of entries kept; 0 keeps everything.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_depth,
        }
    }

    /// Push an already-applied command, discarding any redo branch.
    pub fn record(&mut self, command: Command) {
        if self.cursor < self.entries.len() {
            log::debug!(
                "discarding {} redo entries",
                self.entries.len() - self.cursor
            );
            self.entries.truncate(self.cursor);
        }
        self.entries.push(command);
        if self.max_depth > 0 && self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
    }

    /// Reverse the command just below the cursor.
    pub fn undo(&mut self, seq: &mut NodeSequence) -> Result<Applied, PathError> {
        if self.cursor == 0 {
            return Err(PathError::NothingToUndo);
        }
        let applied = self.entries[self.cursor - 1].undo(seq)?;
        self.cursor -= 1;
        Ok(applied)
    }

    /// Re-apply the command at the cursor.
    pub fn redo(&mut self, seq: &mut NodeSequence) -> Result<Applied, PathError> {
        let Some(command) = self.entries.get(self.cursor) else {
            return Err(PathError::NothingToRedo);
        };
        let applied = command.redo(seq)?;
        self.cursor += 1;
        Ok(applied)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    pub fn undo_description(&self) -> Option<&'static str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(Command::description)
    }

    pub fn redo_description(&self) -> Option<&'static str> {
        self.entries.get(self.cursor).map(Command::description)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
