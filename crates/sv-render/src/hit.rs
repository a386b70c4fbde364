//! Hit testing: canvas point → node lookup.
//!
//! Nodes are drawn as discs of a fixed radius in path order, so later nodes
//! sit on top and win ties.

use kurbo::Rect;
use sv_core::id::NodeId;
use sv_core::model::{Node, Point};

/// Find the topmost node whose disc of `radius` contains `(px, py)`.
/// Returns `None` if the point misses every node.
pub fn hit_test_node(nodes: &[Node], px: f32, py: f32, radius: f32) -> Option<NodeId> {
    let target = Point::new(px, py);
    let hit = nodes
        .iter()
        .rev()
        .find(|n| n.position.distance_squared(target) <= radius * radius)
        .map(|n| n.id);
    log::trace!("hit test ({px}, {py}) -> {hit:?}");
    hit
}

/// All nodes whose centre lies inside `rect`, in path order.
/// Used for marquee selection.
pub fn hit_test_rect(nodes: &[Node], rect: Rect) -> Vec<NodeId> {
    let rect = rect.abs();
    nodes
        .iter()
        .filter(|n| rect.contains(kurbo::Point::new(n.position.x as f64, n.position.y as f64)))
        .map(|n| n.id)
        .collect()
}
