pub mod actions;
pub mod commands;
pub mod config;
pub mod editor;
pub mod gesture;
pub mod ops;

pub use actions::{EditAction, available_actions};
pub use commands::{Command, CommandStack};
pub use config::EditorConfig;
pub use editor::{PathEditor, PathObserver};
pub use gesture::DragGesture;
