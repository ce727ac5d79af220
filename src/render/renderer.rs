use crate::snapshot::SnapshotHandle;

/// One-shot render strategy, bound to exactly one target snapshot.
///
/// A renderer is created per render attempt, consumed exactly once by
/// [`View::render`](crate::View::render), and discarded afterward. The view
/// drives the three lifecycle hooks in order but does not inspect or
/// constrain what mutation [`render`](Renderer::render) performs; deciding
/// *what* changes is entirely the renderer's concern.
///
/// All hooks are suspension points: a renderer is free to await transition
/// or animation completion inside them. No other render can begin on the
/// same view until every hook has resolved.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    /// Whether this is a provisional render, performed before the navigation
    /// has been confirmed.
    fn is_preview(&self) -> bool;

    /// Precomputed decision whether a mutation should occur at all. A
    /// renderer may be constructed for a transition that turns out to
    /// require no visual change.
    fn should_render(&self) -> bool;

    /// The snapshot this renderer transitions the document toward.
    fn new_snapshot(&self) -> SnapshotHandle;

    /// Preparation before the delegate is notified and any mutation happens.
    async fn prepare_to_render(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Performs the document mutation. This is where the bulk of the
    /// asynchronous work happens.
    async fn render(&mut self) -> anyhow::Result<()>;

    /// Teardown after the delegate has observed the rendered snapshot.
    async fn finish_rendering(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
