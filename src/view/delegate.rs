use crate::snapshot::SnapshotHandle;

/// Observer of a view's render lifecycle, implemented by the owning
/// controller. All callbacks are synchronous and fire on the same logical
/// thread as the render that caused them; a callback that calls back into
/// [`View::render`](crate::View::render) observes the in-progress render and
/// gets [`ViewError::RenderInProgress`](crate::errors::ViewError).
pub trait ViewDelegate: Send + Sync {
    /// Called strictly before any document mutation for this render.
    fn view_will_render_snapshot(&self, snapshot: SnapshotHandle, is_preview: bool);

    /// Called strictly after the mutation for this render has completed.
    fn view_rendered_snapshot(&self, snapshot: SnapshotHandle, is_preview: bool);

    /// Called when a render request produced no visual change. The controller
    /// should reconsider its state, e.g. treat the navigation as not applied.
    fn view_invalidated(&self);
}
