pub mod config;
pub mod document;
pub mod geometry;
pub mod id;
pub mod layers;
pub mod model;
pub mod snapshot;

pub use config::{EditorConfig, MIN_SIZE};
pub use document::Document;
pub use geometry::{DragBounds, Handle, Surface};
pub use id::NodeId;
pub use layers::LayerEntry;
pub use model::*;
pub use snapshot::{NodeRecord, Snapshot, SnapshotError};
