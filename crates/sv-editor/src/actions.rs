//! Per-node capability queries.
//!
//! The UI asks which edits make sense for the node it is about to show a
//! menu for; the core answers from the node sequence alone and leaves the
//! presentation to the caller.

use smallvec::SmallVec;
use sv_core::model::NodeSequence;

/// A structural edit the user can pick for a selected node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Close,
    Open,
    Toggle,
    Duplicate,
    Delete,
}

impl EditAction {
    /// Menu title.
    pub fn label(self) -> &'static str {
        match self {
            EditAction::Close => "Close",
            EditAction::Open => "Open",
            EditAction::Toggle => "Toggle",
            EditAction::Duplicate => "Duplicate",
            EditAction::Delete => "Delete",
        }
    }
}

/// Closing is offered from either end of an open path.
pub fn can_close(seq: &NodeSequence, index: usize) -> bool {
    !seq.is_closed() && index < seq.len() && seq.is_endpoint(index)
}

/// Any node of a closed path can become the start of the opened path.
pub fn can_open(seq: &NodeSequence, index: usize) -> bool {
    seq.is_closed() && index < seq.len()
}

/// Endpoints of an open path are always corners, so toggling them is moot.
pub fn can_toggle(seq: &NodeSequence, index: usize) -> bool {
    index < seq.len() && (seq.is_closed() || !seq.is_endpoint(index))
}

pub fn can_duplicate(seq: &NodeSequence, index: usize) -> bool {
    index < seq.len()
}

pub fn can_delete(seq: &NodeSequence, index: usize) -> bool {
    index < seq.len() && seq.len() > 1
}

/// Actions available for the node at `index`, in menu order.
/// Empty when `index` is out of range.
pub fn available_actions(seq: &NodeSequence, index: usize) -> SmallVec<[EditAction; 4]> {
    let mut actions = SmallVec::new();
    if can_close(seq, index) {
        actions.push(EditAction::Close);
    } else if can_open(seq, index) {
        actions.push(EditAction::Open);
    }
    if can_toggle(seq, index) {
        actions.push(EditAction::Toggle);
    }
    if can_duplicate(seq, index) {
        actions.push(EditAction::Duplicate);
    }
    if can_delete(seq, index) {
        actions.push(EditAction::Delete);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_core::model::Point;

    fn line(len: usize, closed: bool) -> NodeSequence {
        NodeSequence::from_points(
            (0..len).map(|i| (Point::new(i as f32 * 10.0, 0.0), true)),
            closed,
        )
        .unwrap()
    }

    #[test]
    fn open_endpoint_offers_close() {
        let seq = line(3, false);
        assert_eq!(
            available_actions(&seq, 0).as_slice(),
            &[EditAction::Close, EditAction::Duplicate, EditAction::Delete]
        );
        assert_eq!(
            available_actions(&seq, 2).as_slice(),
            &[EditAction::Close, EditAction::Duplicate, EditAction::Delete]
        );
    }

    #[test]
    fn open_interior_offers_toggle() {
        let seq = line(3, false);
        assert_eq!(
            available_actions(&seq, 1).as_slice(),
            &[EditAction::Toggle, EditAction::Duplicate, EditAction::Delete]
        );
    }

    #[test]
    fn closed_path_offers_open_everywhere() {
        let seq = line(3, true);
        for index in 0..3 {
            assert_eq!(
                available_actions(&seq, index).as_slice(),
                &[
                    EditAction::Open,
                    EditAction::Toggle,
                    EditAction::Duplicate,
                    EditAction::Delete
                ]
            );
        }
    }

    #[test]
    fn single_node_cannot_be_deleted() {
        let seq = line(1, false);
        assert!(!can_delete(&seq, 0));
        assert_eq!(
            available_actions(&seq, 0).as_slice(),
            &[EditAction::Close, EditAction::Duplicate]
        );
    }

    #[test]
    fn out_of_range_has_no_actions() {
        let seq = line(2, false);
        assert!(available_actions(&seq, 5).is_empty());
    }

    #[test]
    fn labels() {
        assert_eq!(EditAction::Duplicate.label(), "Duplicate");
        assert_eq!(EditAction::Open.label(), "Open");
    }
}
