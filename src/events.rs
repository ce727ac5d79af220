//! View lifecycle events.
//!
//! Hosts that prefer an event stream over implementing [`ViewDelegate`]
//! directly can hang a [`BroadcastDelegate`] on a view: every delegate
//! callback is republished as a [`ViewEvent`] on a broadcast channel that
//! any number of receivers can subscribe to.

use crate::snapshot::SnapshotHandle;
use crate::view::{ViewDelegate, ViewId};
use crate::DEFAULT_CHANNEL_CAPACITY;
use tokio::sync::broadcast;

/// Events emitted by a [`View`](crate::View) over its render lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    // ****************************************
    // ** Render lifecycle
    /// A render is about to mutate the document
    WillRenderSnapshot { view_id: ViewId, is_preview: bool },
    /// The document mutation for a render has completed
    RenderedSnapshot { view_id: ViewId, is_preview: bool },
    /// A render request produced no visual change
    Invalidated { view_id: ViewId },
}

/// A [`ViewDelegate`] that republishes lifecycle callbacks onto a
/// [`broadcast`] channel. Events are fire-and-forget: sending to a channel
/// with no live receivers is not an error.
pub struct BroadcastDelegate {
    view_id: ViewId,
    event_tx: broadcast::Sender<ViewEvent>,
}

impl BroadcastDelegate {
    /// Creates a delegate for the given view with its own event channel.
    pub fn new(view_id: ViewId) -> Self {
        let (event_tx, _first_rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self { view_id, event_tx }
    }

    /// Creates a delegate publishing onto an existing channel, so several
    /// views can share one event stream.
    pub fn with_sender(view_id: ViewId, event_tx: broadcast::Sender<ViewEvent>) -> Self {
        Self { view_id, event_tx }
    }

    /// Subscribe to the event stream. Only events sent from this point on
    /// are received.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.event_tx.subscribe()
    }

    /// Clone of the underlying sender, for wiring further views or taps.
    pub fn sender(&self) -> broadcast::Sender<ViewEvent> {
        self.event_tx.clone()
    }
}

impl ViewDelegate for BroadcastDelegate {
    fn view_will_render_snapshot(&self, _snapshot: SnapshotHandle, is_preview: bool) {
        let _ = self.event_tx.send(ViewEvent::WillRenderSnapshot {
            view_id: self.view_id,
            is_preview,
        });
    }

    fn view_rendered_snapshot(&self, _snapshot: SnapshotHandle, is_preview: bool) {
        let _ = self.event_tx.send(ViewEvent::RenderedSnapshot {
            view_id: self.view_id,
            is_preview,
        });
    }

    fn view_invalidated(&self) {
        let _ = self.event_tx.send(ViewEvent::Invalidated {
            view_id: self.view_id,
        });
    }
}
