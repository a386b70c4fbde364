//! Node sequence ↔ path elements.
//!
//! `compile` is the smoothing pass that turns editable nodes into renderable
//! segments. Corner nodes become on-curve endpoints; a smooth node becomes
//! the control point of a quadratic segment whose endpoint is either the next
//! corner or the midpoint to the next smooth node. Closed paths wrap the last
//! node around to the first so the seam is as smooth as any other join.
//!
//! `decompile` reverses the process for an initial element list, dropping
//! implicit midpoints and the seam segment so no redundant nodes appear.

use crate::error::PathError;
use crate::model::{Node, NodeSequence, PathElement, Point};

/// Squared distance under which an on-curve point counts as the implicit
/// midpoint of two control points.
pub const DEFAULT_IMPLICIT_POINT_TOLERANCE: f32 = 1.0;

/// Compile nodes into path elements.
///
/// Open paths treat their first and last node as corners whatever their
/// stored flag says. Closed paths end with `PathElement::Close`.
///
/// # Errors
/// `PathError::InvalidInput` if `nodes` is empty.
pub fn compile(nodes: &[Node], closed: bool) -> Result<Vec<PathElement>, PathError> {
    let (first, last) = match (nodes.first(), nodes.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(PathError::InvalidInput(
                "cannot compile an empty node sequence",
            ));
        }
    };
    let last_index = nodes.len() - 1;
    let is_corner = |index: usize, node: &Node| {
        node.corner || (!closed && (index == 0 || index == last_index))
    };
    let first_corner = is_corner(0, &first);

    let mut elements = Vec::with_capacity(nodes.len() + 2);
    // Control point of the pending smooth predecessor.
    let mut prev: Option<Point> = None;

    for (index, node) in nodes.iter().enumerate() {
        let pt = node.position;

        if index == 0 {
            if closed && !first_corner {
                let start = if last.corner {
                    last.position
                } else {
                    last.position.midpoint(pt)
                };
                elements.push(PathElement::Move(start));
                prev = Some(pt);
            } else {
                elements.push(PathElement::Move(pt));
                prev = None;
            }
            continue;
        }

        let closing = closed && index == last_index;

        if is_corner(index, node) {
            elements.push(match prev.take() {
                Some(ctrl) => PathElement::QuadCurve { ctrl, to: pt },
                None => PathElement::Line(pt),
            });
            if closing && first_corner {
                elements.push(PathElement::Line(first.position));
            }
        } else {
            if let Some(ctrl) = prev {
                elements.push(PathElement::QuadCurve {
                    ctrl,
                    to: ctrl.midpoint(pt),
                });
            }
            prev = Some(pt);
            if closing {
                let to = if first_corner {
                    first.position
                } else {
                    pt.midpoint(first.position)
                };
                elements.push(PathElement::QuadCurve { ctrl: pt, to });
            }
        }
    }

    if closed {
        elements.push(PathElement::Close);
    }

    log::trace!(
        "compiled {} nodes (closed: {closed}) into {} elements",
        nodes.len(),
        elements.len()
    );
    Ok(elements)
}

/// Rebuild a node sequence from a single-subpath element list.
///
/// Move and line endpoints become corners, quadratic control points become
/// smooth nodes, and a quadratic endpoint becomes a corner unless it sits
/// within `tolerance` (squared distance) of the midpoint between its control
/// point and the next one. For closed paths the segment that returns to the
/// start point is the seam and contributes no endpoint of its own.
///
/// # Errors
/// `PathError::InvalidInput` for an empty list, a list that does not start
/// with `Move`, a second `Move`, or a `Close` that is not last.
pub fn decompile(elements: &[PathElement], tolerance: f32) -> Result<NodeSequence, PathError> {
    let start = match elements.first() {
        Some(PathElement::Move(p)) => *p,
        Some(_) => return Err(PathError::InvalidInput("path must start with a move")),
        None => return Err(PathError::InvalidInput("empty element list")),
    };
    let closed = elements.len() > 1 && matches!(elements.last(), Some(PathElement::Close));
    let body = &elements[1..elements.len() - usize::from(closed)];

    for element in body {
        match element {
            PathElement::Move(_) => {
                return Err(PathError::InvalidInput("multiple subpaths are not supported"));
            }
            PathElement::Close => {
                return Err(PathError::InvalidInput("close must be the last element"));
            }
            _ => {}
        }
    }

    let near = |a: Point, b: Point| a.distance_squared(b) <= tolerance;

    let seam = if closed {
        body.last()
            .and_then(PathElement::end_point)
            .filter(|end| near(*end, start))
            .map(|_| body.len() - 1)
    } else {
        None
    };

    // A closed path whose first node is smooth starts on the seam midpoint,
    // which is not a node.
    let implicit_start = seam.is_some()
        && match (body.first(), body.last()) {
            (
                Some(PathElement::QuadCurve { ctrl: first_ctrl, .. }),
                Some(PathElement::QuadCurve { ctrl: last_ctrl, .. }),
            ) => body.len() > 1 && near(start, last_ctrl.midpoint(*first_ctrl)),
            _ => false,
        };

    let mut seq = NodeSequence::new();
    if !implicit_start {
        seq.push(start, true)?;
    }

    for (index, element) in body.iter().enumerate() {
        let is_seam = seam == Some(index);
        match *element {
            PathElement::Line(pt) => {
                if !is_seam {
                    seq.push(pt, true)?;
                }
            }
            PathElement::QuadCurve { ctrl, to } => {
                seq.push(ctrl, false)?;
                if is_seam {
                    continue;
                }
                let implicit = match body.get(index + 1) {
                    Some(PathElement::QuadCurve { ctrl: next, .. }) => {
                        near(to, ctrl.midpoint(*next))
                    }
                    _ => false,
                };
                if !implicit {
                    seq.push(to, true)?;
                }
            }
            PathElement::Move(_) | PathElement::Close => {}
        }
    }

    seq.set_closed(closed);
    log::debug!(
        "decompiled {} elements into {} nodes (closed: {closed})",
        elements.len(),
        seq.len()
    );
    Ok(seq)
}
