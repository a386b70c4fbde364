pub mod codec;
pub mod compile;
pub mod emitter;
pub mod error;
pub mod id;
pub mod model;
pub mod parser;

pub use compile::{DEFAULT_IMPLICIT_POINT_TOLERANCE, compile, decompile};
pub use emitter::emit_path_data;
pub use error::PathError;
pub use id::NodeId;
pub use model::*;
pub use parser::parse_path_data;
