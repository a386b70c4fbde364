//! Editing session: the single owner of a path being edited.
//!
//! `PathEditor` holds the node sequence, the compiled elements, the undo
//! history, and any drag in progress. Every successful edit goes through
//! one path: apply, record, recompile, notify. Observers see the compiled
//! elements after each change and are told about nodes that appear or
//! disappear so they can bind or drop per-node state.

use crate::actions::{EditAction, available_actions, can_close, can_toggle};
use crate::commands::{Applied, Command, CommandStack};
use crate::config::EditorConfig;
use crate::gesture::DragGesture;
use crate::ops;
use smallvec::SmallVec;
use sv_core::codec::encode_elements;
use sv_core::emitter::emit_path_data;
use sv_core::error::PathError;
use sv_core::model::{Node, NodeSequence, PathElement, Point};
use sv_core::parser::parse_path_data;

/// Receives change notifications from a `PathEditor`.
pub trait PathObserver {
    /// The compiled path changed.
    fn path_changed(&mut self, elements: &[PathElement]);

    /// A node entered the sequence (insert, duplicate, undo of delete).
    fn node_attached(&mut self, _node: &Node) {}

    /// A node left the sequence (delete, undo of insert).
    fn node_detached(&mut self, _node: &Node) {}
}

pub struct PathEditor {
    seq: NodeSequence,
    elements: Vec<PathElement>,
    history: CommandStack,
    drag: Option<DragGesture>,
    config: EditorConfig,
    observer: Option<Box<dyn PathObserver>>,
}

impl PathEditor {
    /// Start with an empty path.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_sequence(NodeSequence::new(), config)
    }

    /// Start from an initial element list, e.g. a captured stroke.
    pub fn from_elements(elements: &[PathElement], config: EditorConfig) -> Result<Self, PathError> {
        let seq = NodeSequence::from_elements(elements, config.implicit_point_tolerance)?;
        Ok(Self::with_sequence(seq, config))
    }

    /// Start from an SVG `d` attribute value.
    pub fn from_svg(path_data: &str, config: EditorConfig) -> Result<Self, PathError> {
        let elements = parse_path_data(path_data)?;
        Self::from_elements(&elements, config)
    }

    /// Start from an existing node sequence. The ends of an open sequence
    /// are stored as corners.
    pub fn with_sequence(mut seq: NodeSequence, config: EditorConfig) -> Self {
        seq.normalize_endpoints();
        let mut editor = Self {
            seq,
            elements: Vec::new(),
            history: CommandStack::new(config.max_undo_depth),
            drag: None,
            config,
            observer: None,
        };
        editor.recompile();
        editor
    }

    /// Install the observer. It is told about every existing node, then
    /// receives the current path.
    pub fn set_observer(&mut self, mut observer: Box<dyn PathObserver>) {
        for node in self.seq.nodes() {
            observer.node_attached(node);
        }
        observer.path_changed(&self.elements);
        self.observer = Some(observer);
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn sequence(&self) -> &NodeSequence {
        &self.seq
    }

    pub fn nodes(&self) -> &[Node] {
        self.seq.nodes()
    }

    pub fn is_closed(&self) -> bool {
        self.seq.is_closed()
    }

    /// The compiled path as of the last change.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&'static str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&'static str> {
        self.history.redo_description()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn available_actions(&self, index: usize) -> SmallVec<[EditAction; 4]> {
        available_actions(&self.seq, index)
    }

    pub fn to_svg(&self) -> String {
        emit_path_data(&self.elements)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, PathError> {
        encode_elements(&self.elements)
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    pub fn move_node(&mut self, index: usize, to: Point) -> Result<(), PathError> {
        self.edit(|seq| ops::move_node(seq, index, to))
    }

    pub fn toggle_corner(&mut self, index: usize) -> Result<(), PathError> {
        self.edit(|seq| ops::toggle_corner(seq, index))
    }

    pub fn insert_node(&mut self, index: usize, position: Point, corner: bool) -> Result<(), PathError> {
        self.edit(|seq| ops::insert_node(seq, index, position, corner))
    }

    /// Copy the node at `index`, shifted by the configured offset, and place
    /// the copy right after it.
    pub fn duplicate_node(&mut self, index: usize) -> Result<(), PathError> {
        let offset = self.config.duplicate_offset;
        self.edit(|seq| ops::duplicate_node(seq, index, offset))
    }

    pub fn delete_node(&mut self, index: usize) -> Result<(), PathError> {
        self.edit(|seq| ops::delete_node(seq, index))
    }

    pub fn close_path(&mut self) -> Result<(), PathError> {
        self.edit(ops::close_path)
    }

    pub fn open_path(&mut self, index: usize) -> Result<(), PathError> {
        self.edit(|seq| ops::open_path(seq, index))
    }

    /// Run a menu action against the node at `index`.
    pub fn perform(&mut self, action: EditAction, index: usize) -> Result<(), PathError> {
        match action {
            EditAction::Close => {
                if !self.seq.is_closed() && !can_close(&self.seq, index) {
                    return Err(PathError::InvalidInput("close starts from an endpoint"));
                }
                self.close_path()
            }
            EditAction::Open => self.open_path(index),
            EditAction::Toggle => {
                if self.seq.get(index).is_some() && !can_toggle(&self.seq, index) {
                    return Err(PathError::InvalidInput(
                        "the ends of an open path are always corners",
                    ));
                }
                self.toggle_corner(index)
            }
            EditAction::Duplicate => self.duplicate_node(index),
            EditAction::Delete => self.delete_node(index),
        }
    }

    fn edit<F>(&mut self, op: F) -> Result<(), PathError>
    where
        F: FnOnce(&mut NodeSequence) -> Result<Command, PathError>,
    {
        self.cancel_drag();
        match op(&mut self.seq) {
            Ok(command) => {
                log::debug!("edit: {}", command.description());
                let applied = applied_by(&command, &self.seq);
                self.history.record(command);
                self.changed(applied);
                Ok(())
            }
            Err(err) => {
                log::warn!("edit rejected: {err}");
                Err(err)
            }
        }
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Grab the node at `index`. A drag already in progress is cancelled.
    pub fn begin_drag(&mut self, index: usize, pointer: Point) -> Result<(), PathError> {
        self.cancel_drag();
        let gesture = DragGesture::begin(&self.seq, index, pointer)?;
        log::trace!("drag begin {} at {:?}", gesture.node(), gesture.origin());
        self.drag = Some(gesture);
        Ok(())
    }

    /// Move the held node to follow the pointer. Recompiles and notifies,
    /// but records nothing.
    pub fn drag_to(&mut self, pointer: Point) -> Result<(), PathError> {
        let Some(gesture) = self.drag else {
            return Err(PathError::InvalidInput("no drag in progress"));
        };
        let position = gesture.update(&mut self.seq, pointer)?;
        log::trace!("drag {} -> {:?}", gesture.node(), position);
        self.changed(Applied::default());
        Ok(())
    }

    /// Release the held node. Records a single move if it ended somewhere
    /// new and returns whether it did.
    pub fn end_drag(&mut self) -> Result<bool, PathError> {
        let Some(gesture) = self.drag.take() else {
            return Err(PathError::InvalidInput("no drag in progress"));
        };
        match gesture.finish(&self.seq)? {
            Some(command) => {
                log::debug!("drag committed: {command:?}");
                self.history.record(command);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Abandon the drag in progress, if any, putting the node back.
    pub fn cancel_drag(&mut self) {
        let Some(gesture) = self.drag.take() else {
            return;
        };
        log::debug!("drag cancelled, restoring {}", gesture.node());
        match gesture.cancel(&mut self.seq) {
            Ok(()) => self.changed(Applied::default()),
            Err(err) => log::warn!("could not restore dragged node: {err}"),
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Result<(), PathError> {
        self.cancel_drag();
        let applied = self.history.undo(&mut self.seq)?;
        log::debug!("undo, cursor at {}", self.history.cursor());
        self.changed(applied);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), PathError> {
        self.cancel_drag();
        let applied = self.history.redo(&mut self.seq)?;
        log::debug!("redo, cursor at {}", self.history.cursor());
        self.changed(applied);
        Ok(())
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn recompile(&mut self) {
        self.elements = if self.seq.is_empty() {
            Vec::new()
        } else {
            match self.seq.compile() {
                Ok(elements) => elements,
                Err(err) => {
                    log::warn!("compile failed: {err}");
                    Vec::new()
                }
            }
        };
    }

    fn changed(&mut self, applied: Applied) {
        self.recompile();
        if let Some(observer) = self.observer.as_mut() {
            if let Some(node) = &applied.removed {
                observer.node_detached(node);
            }
            if let Some(node) = &applied.created {
                observer.node_attached(node);
            }
            observer.path_changed(&self.elements);
        }
    }
}

/// Nodes a freshly applied command created or removed.
fn applied_by(command: &Command, seq: &NodeSequence) -> Applied {
    match *command {
        Command::InsertNode { index, .. } => Applied {
            created: seq.get(index).copied(),
            removed: None,
        },
        Command::DeleteNode { node, .. } => Applied {
            created: None,
            removed: Some(node),
        },
        _ => Applied::default(),
    }
}

impl Default for PathEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for PathEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathEditor")
            .field("seq", &self.seq)
            .field("history", &self.history)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
