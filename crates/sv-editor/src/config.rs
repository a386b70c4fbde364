//! Editor configuration.

use serde::Deserialize;
use sv_core::DEFAULT_IMPLICIT_POINT_TOLERANCE;
use sv_core::model::Point;

/// Tunables for a `PathEditor`.
///
/// Every field has a default, so a JSON config only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo entries kept before the oldest is dropped. 0 = unbounded.
    /// Default: **256**.
    pub max_undo_depth: usize,

    /// Offset of a duplicated node from its source. Default: two node radii
    /// to the right, **(44, 0)**.
    pub duplicate_offset: Point,

    /// Radius of a node's grab handle, for hit testing. Default: **22**.
    pub node_radius: f32,

    /// Squared distance under which a quadratic endpoint is treated as the
    /// implicit midpoint when importing elements. Default: **1.0**.
    pub implicit_point_tolerance: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: 256,
            duplicate_offset: Point::new(44.0, 0.0),
            node_radius: 22.0,
            implicit_point_tolerance: DEFAULT_IMPLICIT_POINT_TOLERANCE,
        }
    }
}

impl EditorConfig {
    /// Load from a JSON object; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
