pub mod editor;
pub mod gesture;
pub mod input;
pub mod persistence;
pub mod selection;
pub mod shortcuts;
pub mod tools;

pub use editor::{Editor, EditorEvent};
pub use gesture::{Gesture, Mode};
pub use input::{InputEvent, Modifiers, PointerTarget};
pub use persistence::{ExportFile, ExportSink, KeyValueStore, MemoryStore};
pub use selection::{PropertyError, PropertyField, PropertyView};
pub use tools::ToolKind;
