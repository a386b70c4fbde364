//! Core data model for editable vector paths.
//!
//! Two representations live side by side:
//!
//! - `PathElement`: the renderable curve vocabulary (move, line, quadratic
//!   curve, close) consumed by the rendering layer and the path-data codecs.
//! - `NodeSequence`: the editable representation, an ordered list of anchor
//!   nodes plus an open/closed flag. Corner nodes are on-curve anchors; smooth
//!   nodes are quadratic control points, and two consecutive smooth nodes
//!   imply an on-curve point at their midpoint.
//!
//! `compile` turns the second into the first; `decompile` goes back.

use crate::error::PathError;
use crate::id::{IdAllocator, NodeId};
use serde::{Deserialize, Serialize};

// ─── Geometry ────────────────────────────────────────────────────────────

/// A 2D point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn translate(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Vector from `other` to `self`.
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn approx_eq(self, other: Point, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node positions must be finite so the path data written for them parses
/// back.
fn check_finite(position: Point) -> Result<(), PathError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(PathError::InvalidInput("node coordinates must be finite"))
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

// ─── Path elements ───────────────────────────────────────────────────────

/// One segment of a renderable path.
///
/// A well-formed sequence starts with exactly one `Move`, contains no further
/// `Move`, and ends with `Close` iff the path is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    Move(Point),
    Line(Point),
    QuadCurve { ctrl: Point, to: Point },
    Close,
}

impl PathElement {
    /// The on-curve point this element ends at. `Close` has none of its own.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathElement::Move(p) | PathElement::Line(p) => Some(p),
            PathElement::QuadCurve { to, .. } => Some(to),
            PathElement::Close => None,
        }
    }

    pub fn control_point(&self) -> Option<Point> {
        match *self {
            PathElement::QuadCurve { ctrl, .. } => Some(ctrl),
            _ => None,
        }
    }

    /// Same kind and points equal within `epsilon`.
    pub fn approx_eq(&self, other: &PathElement, epsilon: f32) -> bool {
        match (self, other) {
            (PathElement::Move(a), PathElement::Move(b))
            | (PathElement::Line(a), PathElement::Line(b)) => a.approx_eq(*b, epsilon),
            (
                PathElement::QuadCurve { ctrl: c1, to: t1 },
                PathElement::QuadCurve { ctrl: c2, to: t2 },
            ) => c1.approx_eq(*c2, epsilon) && t1.approx_eq(*t2, epsilon),
            (PathElement::Close, PathElement::Close) => true,
            _ => false,
        }
    }
}

/// Element-wise `approx_eq` over two sequences of equal length.
pub fn elements_approx_eq(a: &[PathElement], b: &[PathElement], epsilon: f32) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.approx_eq(y, epsilon))
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// An editable anchor: either an on-curve corner or a smooth control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub corner: bool,
}

/// The ordered node list plus the closed flag, owned by one editing session.
///
/// Mutators are index based and bounds checked; they never recompile.
/// Equality compares nodes and the closed flag only, not the id allocator.
#[derive(Debug, Clone, Default)]
pub struct NodeSequence {
    nodes: Vec<Node>,
    closed: bool,
    ids: IdAllocator,
}

impl PartialEq for NodeSequence {
    fn eq(&self, other: &Self) -> bool {
        self.closed == other.closed && self.nodes == other.nodes
    }
}

impl NodeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an open or closed sequence from `(position, corner)` pairs.
    /// Stored flags are kept as given; see [`Self::normalize_endpoints`].
    ///
    /// # Errors
    /// `InvalidInput` for a non-finite position.
    pub fn from_points<I>(points: I, closed: bool) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = (Point, bool)>,
    {
        let mut seq = Self::new();
        for (position, corner) in points {
            seq.push(position, corner)?;
        }
        seq.closed = closed;
        Ok(seq)
    }

    /// Rebuild a sequence from a compiled element list.
    /// See [`crate::compile::decompile`].
    pub fn from_elements(elements: &[PathElement], tolerance: f32) -> Result<Self, PathError> {
        crate::compile::decompile(elements, tolerance)
    }

    /// Compile to renderable elements.
    pub fn compile(&self) -> Result<Vec<PathElement>, PathError> {
        crate::compile::compile(&self.nodes, self.closed)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Bounds-checked access that reports `IndexOutOfRange`.
    pub fn node(&self, index: usize) -> Result<&Node, PathError> {
        self.nodes
            .get(index)
            .ok_or(PathError::out_of_range(index, self.nodes.len()))
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Whether `index` is the first or last node.
    pub fn is_endpoint(&self, index: usize) -> bool {
        !self.nodes.is_empty() && (index == 0 || index == self.nodes.len() - 1)
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Create a node with a fresh id without inserting it.
    pub fn new_node(&mut self, position: Point, corner: bool) -> Result<Node, PathError> {
        check_finite(position)?;
        Ok(Node {
            id: self.ids.allocate()?,
            position,
            corner,
        })
    }

    /// Append a fresh node and return its id.
    pub fn push(&mut self, position: Point, corner: bool) -> Result<NodeId, PathError> {
        let node = self.new_node(position, corner)?;
        self.nodes.push(node);
        Ok(node.id)
    }

    /// Insert `node` at `index` (0 ≤ index ≤ len), keeping its id.
    pub fn insert(&mut self, index: usize, node: Node) -> Result<(), PathError> {
        if index > self.nodes.len() {
            return Err(PathError::out_of_range(index, self.nodes.len()));
        }
        check_finite(node.position)?;
        self.ids.reserve(node.id)?;
        self.nodes.insert(index, node);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Node, PathError> {
        self.node(index)?;
        Ok(self.nodes.remove(index))
    }

    pub fn set_position(&mut self, index: usize, position: Point) -> Result<(), PathError> {
        check_finite(position)?;
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(PathError::out_of_range(index, len))?;
        node.position = position;
        Ok(())
    }

    pub fn set_corner(&mut self, index: usize, corner: bool) -> Result<(), PathError> {
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(PathError::out_of_range(index, len))?;
        node.corner = corner;
        Ok(())
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Store the corner flag on both ends of an open path, where `compile`
    /// forces it anyway. Closed paths are left alone.
    pub fn normalize_endpoints(&mut self) {
        if self.closed {
            return;
        }
        if let Some(first) = self.nodes.first_mut() {
            first.corner = true;
        }
        if let Some(last) = self.nodes.last_mut() {
            last.corner = true;
        }
    }

    /// Rotate so the node at `mid` becomes index 0. No-op when empty.
    pub fn rotate_left(&mut self, mid: usize) {
        if !self.nodes.is_empty() {
            let mid = mid % self.nodes.len();
            self.nodes.rotate_left(mid);
        }
    }

    /// Inverse of `rotate_left`.
    pub fn rotate_right(&mut self, k: usize) {
        if !self.nodes.is_empty() {
            let k = k % self.nodes.len();
            self.nodes.rotate_right(k);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 4.0);
        assert_eq!(a.midpoint(b), Point::new(5.0, 2.0));
        assert_eq!(a.distance_squared(b), 116.0);
        assert_eq!(b.delta(a), b);
    }

    #[test]
    fn close_has_no_end_point() {
        assert_eq!(PathElement::Close.end_point(), None);
        let q = PathElement::QuadCurve {
            ctrl: Point::new(1.0, 1.0),
            to: Point::new(2.0, 0.0),
        };
        assert_eq!(q.end_point(), Some(Point::new(2.0, 0.0)));
        assert_eq!(q.control_point(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn approx_eq_requires_same_kind() {
        let p = Point::new(1.0, 2.0);
        assert!(!PathElement::Move(p).approx_eq(&PathElement::Line(p), 0.1));
        assert!(PathElement::Line(p).approx_eq(&PathElement::Line(Point::new(1.05, 2.0)), 0.1));
    }

    #[test]
    fn insert_out_of_range_is_rejected() {
        let mut seq = NodeSequence::new();
        let node = seq.new_node(Point::ZERO, true).unwrap();
        assert_eq!(
            seq.insert(1, node),
            Err(PathError::IndexOutOfRange { index: 1, len: 0 })
        );
        assert!(seq.insert(0, node).is_ok());
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn rotate_round_trip() {
        let mut seq = NodeSequence::from_points(
            (0..4).map(|i| (Point::new(i as f32, 0.0), true)),
            true,
        )
        .unwrap();
        let before = seq.clone();
        seq.rotate_left(3);
        assert_eq!(seq.nodes()[0].position, Point::new(3.0, 0.0));
        seq.rotate_right(3);
        assert_eq!(seq, before);
    }

    #[test]
    fn equality_ignores_allocator_state() {
        let mut a = NodeSequence::from_points([(Point::ZERO, true)], false).unwrap();
        let b = a.clone();
        let extra = a.new_node(Point::ZERO, false).unwrap();
        a.insert(1, extra).unwrap();
        a.remove(1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn restored_id_is_not_reallocated() {
        let mut seq = NodeSequence::new();
        let restored = Node {
            id: NodeId::from_raw(5),
            position: Point::ZERO,
            corner: true,
        };
        seq.insert(0, restored).unwrap();
        let fresh = seq.push(Point::new(1.0, 1.0), true).unwrap();
        assert_ne!(fresh, restored.id);
        assert_eq!(seq.index_of(fresh), Some(1));
    }

    #[test]
    fn insert_with_exhausted_id_is_rejected() {
        let mut seq = NodeSequence::from_points([(Point::ZERO, true)], false).unwrap();
        let foreign = Node {
            id: NodeId::from_raw(u32::MAX),
            position: Point::new(1.0, 1.0),
            corner: true,
        };
        assert_eq!(seq.insert(1, foreign), Err(PathError::IdsExhausted));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut seq = NodeSequence::from_points([(Point::ZERO, true)], false).unwrap();
        assert!(seq.push(Point::new(f32::NAN, 0.0), true).is_err());
        assert!(seq.set_position(0, Point::new(0.0, f32::INFINITY)).is_err());
        let bad = [(Point::new(f32::NEG_INFINITY, 0.0), true)];
        assert!(NodeSequence::from_points(bad, false).is_err());
        assert_eq!(seq.nodes()[0].position, Point::ZERO);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn normalize_touches_open_endpoints_only() {
        let flags = |seq: &NodeSequence| -> Vec<bool> { seq.nodes().iter().map(|n| n.corner).collect() };
        let points = (0..3).map(|i| (Point::new(i as f32, 0.0), false));

        let mut open = NodeSequence::from_points(points.clone(), false).unwrap();
        open.normalize_endpoints();
        assert_eq!(flags(&open), vec![true, false, true]);

        let mut closed = NodeSequence::from_points(points, true).unwrap();
        closed.normalize_endpoints();
        assert_eq!(flags(&closed), vec![false, false, false]);
    }
}
