//! Kinema runtime
//!
//! Loads file documents into artboards. Each artboard owns a scene graph and
//! exposes its timeline animations and state machines by index and by name;
//! hosts instantiate playheads or state machines from them and drive them
//! frame by frame.

pub mod artboard;
pub mod data;
pub mod error;
pub mod file;

pub use artboard::Artboard;
pub use data::{parse_file_json, ArtboardData, ComponentData, FileData};
pub use error::FileError;
pub use file::{load_file_json, File};
