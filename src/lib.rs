pub mod config;
pub mod dom;
pub mod errors;
pub mod events;
pub mod location;
pub mod position;
pub mod render;
pub mod snapshot;
pub mod view;

pub use config::ViewConfig;
pub use errors::ViewError;
pub use position::Position;
pub use render::Renderer;
pub use snapshot::{Snapshot, SnapshotHandle, SnapshotSource};
pub use view::*;

/// Default capacity for event channels created by the crate.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
