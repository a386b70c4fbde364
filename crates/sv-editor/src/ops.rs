//! Structural edit operations.
//!
//! Each operation validates its preconditions, applies the edit to the node
//! sequence, and returns the `Command` that reverses it. Nothing here
//! recompiles the path or touches the undo stack; `PathEditor` does both.

use crate::commands::{Command, Endpoints};
use sv_core::error::PathError;
use sv_core::model::{NodeSequence, Point};

/// Set the position of the node at `index`.
pub fn move_node(seq: &mut NodeSequence, index: usize, to: Point) -> Result<Command, PathError> {
    let from = seq.node(index)?.position;
    let command = Command::MoveNode { index, from, to };
    command.redo(seq)?;
    Ok(command)
}

/// Flip the corner flag of the node at `index`. The ends of an open path
/// stay corners.
pub fn toggle_corner(seq: &mut NodeSequence, index: usize) -> Result<Command, PathError> {
    let corner = !seq.node(index)?.corner;
    if !seq.is_closed() && seq.is_endpoint(index) {
        return Err(PathError::InvalidInput(
            "the ends of an open path are always corners",
        ));
    }
    let command = Command::ToggleCorner { index, corner };
    command.redo(seq)?;
    Ok(command)
}

/// Insert a fresh node at `index` (0 ≤ index ≤ len).
pub fn insert_node(
    seq: &mut NodeSequence,
    index: usize,
    position: Point,
    corner: bool,
) -> Result<Command, PathError> {
    if index > seq.len() {
        return Err(PathError::out_of_range(index, seq.len()));
    }
    let node = seq.new_node(position, corner)?;
    let command = Command::InsertNode {
        index,
        node,
        endpoints: Endpoints::after_insert(seq, index, corner),
    };
    command.redo(seq)?;
    Ok(command)
}

/// Insert a copy of the node at `index` right after it, shifted by `offset`.
pub fn duplicate_node(
    seq: &mut NodeSequence,
    index: usize,
    offset: Point,
) -> Result<Command, PathError> {
    let source = *seq.node(index)?;
    insert_node(
        seq,
        index + 1,
        source.position.translate(offset.x, offset.y),
        source.corner,
    )
}

/// Remove the node at `index`. At least one node always remains.
pub fn delete_node(seq: &mut NodeSequence, index: usize) -> Result<Command, PathError> {
    let node = *seq.node(index)?;
    if seq.len() <= 1 {
        return Err(PathError::CannotDeleteLastNode);
    }
    let command = Command::DeleteNode {
        index,
        node,
        endpoints: Endpoints::after_remove(seq, index),
    };
    command.redo(seq)?;
    Ok(command)
}

/// Close an open path. The former endpoints become ordinary seam nodes.
pub fn close_path(seq: &mut NodeSequence) -> Result<Command, PathError> {
    if seq.is_closed() {
        return Err(PathError::AlreadyClosed);
    }
    let (Some(first), Some(last)) = (seq.first(), seq.last()) else {
        return Err(PathError::InvalidInput("cannot close an empty path"));
    };
    let command = Command::ClosePath {
        first_corner: first.corner,
        last_corner: last.corner,
    };
    command.redo(seq)?;
    Ok(command)
}

/// Open a closed path so that the node at `index` becomes its start.
pub fn open_path(seq: &mut NodeSequence, index: usize) -> Result<Command, PathError> {
    if !seq.is_closed() {
        return Err(PathError::AlreadyOpen);
    }
    let first_corner = seq.node(index)?.corner;
    let last_index = (index + seq.len() - 1) % seq.len();
    let last_corner = seq.node(last_index)?.corner;
    let command = Command::OpenPath {
        index,
        first_corner,
        last_corner,
    };
    command.redo(seq)?;
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sv_core::model::PathElement;

    fn corner_smooth_corner() -> NodeSequence {
        NodeSequence::from_points(
            [
                (Point::new(0.0, 0.0), true),
                (Point::new(10.0, 0.0), false),
                (Point::new(20.0, 0.0), true),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn toggle_turns_smooth_into_corner() {
        let mut seq = corner_smooth_corner();
        toggle_corner(&mut seq, 1).unwrap();
        assert_eq!(
            seq.compile().unwrap(),
            vec![
                PathElement::Move(Point::new(0.0, 0.0)),
                PathElement::Line(Point::new(10.0, 0.0)),
                PathElement::Line(Point::new(20.0, 0.0)),
            ]
        );
    }

    #[test]
    fn delete_middle_leaves_straight_line() {
        let mut seq = corner_smooth_corner();
        delete_node(&mut seq, 1).unwrap();
        assert_eq!(
            seq.compile().unwrap(),
            vec![
                PathElement::Move(Point::new(0.0, 0.0)),
                PathElement::Line(Point::new(20.0, 0.0)),
            ]
        );
    }

    #[test]
    fn open_endpoints_cannot_be_toggled() {
        let mut seq = corner_smooth_corner();
        assert!(matches!(
            toggle_corner(&mut seq, 0),
            Err(PathError::InvalidInput(_))
        ));
        assert!(toggle_corner(&mut seq, 2).is_err());
        close_path(&mut seq).unwrap();
        toggle_corner(&mut seq, 0).unwrap();
        assert!(seq.nodes()[0].corner);
    }

    #[test]
    fn deleting_an_end_promotes_its_neighbour_to_corner() {
        let mut seq = NodeSequence::from_points(
            [
                (Point::new(0.0, 0.0), true),
                (Point::new(10.0, 10.0), false),
                (Point::new(20.0, 0.0), false),
                (Point::new(30.0, 0.0), true),
            ],
            false,
        )
        .unwrap();
        delete_node(&mut seq, 3).unwrap();
        assert!(seq.nodes()[2].corner);

        insert_node(&mut seq, 3, Point::new(30.0, 0.0), true).unwrap();
        assert_eq!(
            seq.compile().unwrap(),
            vec![
                PathElement::Move(Point::new(0.0, 0.0)),
                PathElement::QuadCurve {
                    ctrl: Point::new(10.0, 10.0),
                    to: Point::new(20.0, 0.0)
                },
                PathElement::Line(Point::new(30.0, 0.0)),
            ]
        );
    }

    #[test]
    fn inserting_a_smooth_node_at_an_end_stores_a_corner() {
        let mut seq = corner_smooth_corner();
        insert_node(&mut seq, 0, Point::new(-10.0, 0.0), false).unwrap();
        insert_node(&mut seq, 4, Point::new(30.0, 0.0), false).unwrap();
        let flags: Vec<bool> = seq.nodes().iter().map(|n| n.corner).collect();
        assert_eq!(flags, vec![true, true, false, true, true]);
    }

    #[test]
    fn non_finite_targets_are_rejected() {
        let mut seq = corner_smooth_corner();
        let before = seq.clone();
        assert!(move_node(&mut seq, 1, Point::new(f32::NAN, 0.0)).is_err());
        assert!(insert_node(&mut seq, 1, Point::new(0.0, f32::INFINITY), true).is_err());
        assert!(duplicate_node(&mut seq, 2, Point::new(f32::INFINITY, 0.0)).is_err());
        assert_eq!(seq, before);
    }

    #[test]
    fn cannot_delete_last_node() {
        let mut seq = NodeSequence::from_points([(Point::ZERO, true)], false).unwrap();
        assert_eq!(delete_node(&mut seq, 0), Err(PathError::CannotDeleteLastNode));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut seq = corner_smooth_corner();
        let before = seq.clone();
        assert_eq!(
            move_node(&mut seq, 3, Point::ZERO),
            Err(PathError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(toggle_corner(&mut seq, 7).is_err());
        assert!(insert_node(&mut seq, 4, Point::ZERO, true).is_err());
        assert!(delete_node(&mut seq, 3).is_err());
        assert_eq!(seq, before);
    }

    #[test]
    fn insert_at_end_is_allowed() {
        let mut seq = corner_smooth_corner();
        insert_node(&mut seq, 3, Point::new(30.0, 0.0), true).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.nodes()[3].position, Point::new(30.0, 0.0));
    }

    #[test]
    fn duplicate_inserts_after_source_with_offset() {
        let mut seq = corner_smooth_corner();
        let cmd = duplicate_node(&mut seq, 1, Point::new(44.0, 0.0)).unwrap();
        assert!(matches!(cmd, Command::InsertNode { index: 2, .. }));
        let copy = seq.nodes()[2];
        assert_eq!(copy.position, Point::new(54.0, 0.0));
        assert!(!copy.corner);
        assert_ne!(copy.id, seq.nodes()[1].id);
    }

    #[test]
    fn close_twice_fails() {
        let mut seq = corner_smooth_corner();
        close_path(&mut seq).unwrap();
        assert!(seq.is_closed());
        assert!(!seq.nodes()[0].corner);
        assert!(!seq.nodes()[2].corner);
        assert_eq!(close_path(&mut seq), Err(PathError::AlreadyClosed));
    }

    #[test]
    fn open_requires_closed_path() {
        let mut seq = corner_smooth_corner();
        assert_eq!(open_path(&mut seq, 0), Err(PathError::AlreadyOpen));
    }

    #[test]
    fn open_rotates_tapped_node_to_start() {
        let mut seq = corner_smooth_corner();
        close_path(&mut seq).unwrap();
        let tapped = seq.nodes()[1].id;
        open_path(&mut seq, 1).unwrap();
        assert!(!seq.is_closed());
        assert_eq!(seq.nodes()[0].id, tapped);
        assert!(seq.nodes()[0].corner);
        assert!(seq.last().unwrap().corner);
    }

    #[test]
    fn close_then_open_at_start_restores_elements() {
        let mut seq = corner_smooth_corner();
        let original = seq.compile().unwrap();
        close_path(&mut seq).unwrap();
        open_path(&mut seq, 0).unwrap();
        assert_eq!(seq.compile().unwrap(), original);
    }
}
