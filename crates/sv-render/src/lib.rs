pub mod hit;
pub mod shape;

pub use hit::{hit_test_node, hit_test_rect};
pub use shape::{bounding_box, control_polygon, distance_to_path, to_bez_path};
