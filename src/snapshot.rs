use crate::dom::{ElementHandle, ScrollRoot};
use std::sync::Arc;

/// Shared handle to an immutable snapshot.
pub type SnapshotHandle = Arc<dyn Snapshot>;

/// Immutable representation of a document's renderable content at one point
/// in time. Snapshots are constructed by the host (or a navigation layer on
/// top of it) and referenced by a renderer for the duration of one render.
pub trait Snapshot: Send + Sync {
    /// Resolves an anchor identifier to the addressable element in the live
    /// document, if one exists.
    fn element_for_anchor(&self, anchor: &str) -> Option<ElementHandle>;
}

/// Source of the snapshot describing the *current* live content. The view
/// asks for a fresh snapshot on every anchor lookup, so scroll targets always
/// resolve against what is rendered right now, not against the snapshot that
/// produced it.
pub trait SnapshotSource: Send + Sync {
    /// Returns a snapshot of the current live content.
    fn current_snapshot(&self) -> SnapshotHandle;

    /// Returns the document's top-level scroll container. Used as the default
    /// scroll root for views built over this source.
    fn viewport(&self) -> Arc<dyn ScrollRoot>;
}
