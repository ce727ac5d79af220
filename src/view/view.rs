use crate::config::ViewConfig;
use crate::dom::{Element, ElementHandle, ScrollRoot, ATTR_TABINDEX};
use crate::errors::ViewError;
use crate::position::Position;
use crate::render::renderer::Renderer;
use crate::snapshot::SnapshotSource;
use crate::view::delegate::ViewDelegate;
use crate::view::state::{ActiveRender, RenderState};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// A unique identifier for a [`View`].
///
/// Internally, a `ViewId` is a wrapper around a [`Uuid`], ensuring global
/// uniqueness for each view the host creates. `ViewId` implements common
/// traits such as `Copy`, `Clone`, `Eq`, `Hash`, and ordering traits, so it
/// can be freely duplicated, compared, sorted, or used as a key in hash maps.
///
/// **Note:** The use of [`Uuid`] is an implementation detail and may change
/// in the future without notice. Always treat `ViewId` as an opaque handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Create a new unique `ViewId` using a random UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ViewId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Temporarily places an element in the focus order so it can receive
/// programmatic focus, and takes it back out when dropped. The `-1` tab stop
/// keeps the element out of the natural tab order, so the page's focus
/// semantics are unchanged once the guard is gone, even if focusing failed.
struct TempTabIndex<'a> {
    element: &'a ElementHandle,
}

impl<'a> TempTabIndex<'a> {
    fn new(element: &'a ElementHandle) -> Self {
        element.set_attribute(ATTR_TABINDEX, "-1");
        Self { element }
    }
}

impl Drop for TempTabIndex<'_> {
    fn drop(&mut self) {
        self.element.remove_attribute(ATTR_TABINDEX);
    }
}

/// Render orchestrator for one live document.
///
/// A `View` sits between the host (which supplies a [`Renderer`] per
/// navigation) and two collaborators it drives: the renderer, which performs
/// the actual document mutation, and the [`ViewDelegate`], which observes
/// lifecycle transitions. The view itself never decides *what* to mutate; it
/// enforces the mutual-exclusion contract (one render at a time), sequences
/// the lifecycle notifications, and restores scroll position and focus after
/// a transition.
pub struct View {
    /// ID of the view
    pub view_id: ViewId,

    /// Root element of the live document this view renders into
    root: ElementHandle,
    /// Delegate observing render lifecycle transitions
    delegate: Arc<dyn ViewDelegate>,
    /// Source of the current live content's snapshot
    source: Arc<dyn SnapshotSource>,
    /// Scroll container for position restoration
    scroll_root: Arc<dyn ScrollRoot>,

    /// Render state (the single-active-renderer slot)
    state: Arc<Mutex<RenderState>>,
    /// Configuration for this view
    config: ViewConfig,
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("view_id", &self.view_id)
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl View {
    /// Returns a builder for assembling a view.
    pub fn builder() -> ViewBuilder {
        ViewBuilder::new()
    }

    /// Returns whether a render is currently in flight.
    pub fn is_rendering(&self) -> bool {
        matches!(*self.state.lock().unwrap(), RenderState::Rendering { .. })
    }

    /// Renders the given renderer's snapshot into the live document.
    ///
    /// Fails with [`ViewError::RenderInProgress`] when another render is in
    /// flight; a second render request before the first completed is a
    /// contract violation, never queued or dropped. A renderer that declines
    /// to render (its [`should_render`](Renderer::should_render) is false)
    /// causes no mutation and no state transition; the delegate is told via
    /// [`view_invalidated`](ViewDelegate::view_invalidated) instead.
    ///
    /// # Errors
    ///
    /// Errors raised by the renderer's hooks propagate to the caller
    /// verbatim, after the render slot has been released.
    pub async fn render<R: Renderer>(&self, mut renderer: R) -> Result<(), ViewError> {
        // The exclusion contract applies before the should-render branch, so
        // a no-op render issued mid-render fails the same way.
        if self.is_rendering() {
            return Err(ViewError::RenderInProgress);
        }

        if !renderer.should_render() {
            log::debug!("View[{}]: renderer declined to render, invalidating", self.view_id);
            self.invalidate();
            return Ok(());
        }

        let is_preview = renderer.is_preview();
        let guard = ActiveRender::acquire(&self.state, is_preview)?;

        let result = self.render_snapshot(&mut renderer, is_preview).await;

        // The slot is released before any hook error reaches the caller.
        drop(guard);
        result?;

        Ok(())
    }

    async fn render_snapshot<R: Renderer>(
        &self,
        renderer: &mut R,
        is_preview: bool,
    ) -> anyhow::Result<()> {
        let snapshot = renderer.new_snapshot();

        self.mark_preview(is_preview);
        renderer.prepare_to_render().await?;

        self.delegate.view_will_render_snapshot(snapshot.clone(), is_preview);
        renderer.render().await?;
        self.delegate.view_rendered_snapshot(snapshot, is_preview);

        renderer.finish_rendering().await?;

        Ok(())
    }

    /// Notifies the delegate that the current render request produced no
    /// visual change and the owning controller should reconsider its state.
    pub fn invalidate(&self) {
        self.delegate.view_invalidated();
    }

    /// Toggle the preview marker on the root element. A boolean attribute:
    /// present (empty) while the content is provisional, absent otherwise.
    fn mark_preview(&self, is_preview: bool) {
        if is_preview {
            self.root.set_attribute(&self.config.preview_attribute, "");
        } else {
            self.root.remove_attribute(&self.config.preview_attribute);
        }
    }

    /// Scrolls to the element addressed by `anchor` in the current live
    /// content and moves focus to it. When no element matches, scrolls the
    /// scroll root back to the origin; a missing anchor is a designed
    /// fallback, not an error.
    pub fn scroll_to_anchor(&self, anchor: &str) {
        match self.source.current_snapshot().element_for_anchor(anchor) {
            Some(element) => {
                self.scroll_to_element(&element);
                self.focus_element(&element);
            }
            None => {
                log::debug!(
                    "View[{}]: no element for anchor {:?}, falling back to origin",
                    self.view_id,
                    anchor
                );
                self.scroll_to_position(Position::ORIGIN);
            }
        }
    }

    /// Scrolls the element into the visible viewport.
    pub fn scroll_to_element(&self, element: &ElementHandle) {
        element.scroll_into_view();
    }

    /// Scrolls the view's scroll root to the given absolute offset.
    pub fn scroll_to_position(&self, position: Position) {
        self.scroll_root.scroll_to(position);
    }

    /// Moves keyboard focus to the element, best-effort. Elements that cannot
    /// receive focus are skipped silently. Elements outside the focus order
    /// get a temporary `tabindex` for the duration of the call, so headings
    /// and containers can take focus without permanently altering the page's
    /// tab order.
    pub fn focus_element(&self, element: &ElementHandle) {
        if !element.is_focusable() {
            log::debug!("View[{}]: element cannot receive focus, skipping", self.view_id);
            return;
        }

        if element.has_attribute(ATTR_TABINDEX) {
            element.focus();
            return;
        }

        let _temporary = TempTabIndex::new(element);
        element.focus();
    }
}

/// Builder for creating a new [`View`].
pub struct ViewBuilder {
    view_id: Option<ViewId>,
    root: Option<ElementHandle>,
    delegate: Option<Arc<dyn ViewDelegate>>,
    source: Option<Arc<dyn SnapshotSource>>,
    scroll_root: Option<Arc<dyn ScrollRoot>>,
    config: ViewConfig,
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self {
            view_id: None,
            root: None,
            delegate: None,
            source: None,
            scroll_root: None,
            config: ViewConfig::default(),
        }
    }

    /// Pin the view's id. If not set, a fresh one is generated. Useful for
    /// hosts that keep views deterministic across sessions.
    pub fn id(mut self, view_id: ViewId) -> Self {
        self.view_id = Some(view_id);
        self
    }

    /// Root element of the live document.
    pub fn root(mut self, root: ElementHandle) -> Self {
        self.root = Some(root);
        self
    }

    /// Delegate observing the render lifecycle.
    pub fn delegate(mut self, delegate: Arc<dyn ViewDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Source of the current live content's snapshot.
    pub fn source(mut self, source: Arc<dyn SnapshotSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Override the scroll root. Defaults to the source's viewport; a view
    /// scoped to a sub-container supplies that container here.
    pub fn scroll_root(mut self, scroll_root: Arc<dyn ScrollRoot>) -> Self {
        self.scroll_root = Some(scroll_root);
        self
    }

    pub fn config(mut self, config: ViewConfig) -> Self {
        self.config = config;
        self
    }

    /// Assembles the view.
    ///
    /// # Errors
    ///
    /// Fails when the root element, delegate, or document source is missing.
    pub fn build(self) -> Result<View, ViewError> {
        let root = self.root.ok_or(ViewError::MissingRoot)?;
        let delegate = self.delegate.ok_or(ViewError::MissingDelegate)?;
        let source = self.source.ok_or(ViewError::MissingDocument)?;
        let scroll_root = self.scroll_root.unwrap_or_else(|| source.viewport());

        Ok(View {
            view_id: self.view_id.unwrap_or_else(ViewId::new),
            root,
            delegate,
            source,
            scroll_root,
            state: Arc::new(Mutex::new(RenderState::Idle)),
            config: self.config,
        })
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::in_memory::{InMemoryDocument, InMemorySnapshot};
    use crate::snapshot::SnapshotHandle;
    use anyhow::anyhow;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    /// Shared call log, written by delegates and renderers alike so ordering
    /// across both can be asserted.
    type CallLog = Arc<Mutex<Vec<String>>>;

    struct RecordingDelegate {
        log: CallLog,
    }

    impl ViewDelegate for RecordingDelegate {
        fn view_will_render_snapshot(&self, _snapshot: SnapshotHandle, is_preview: bool) {
            self.log.lock().unwrap().push(format!("will:{is_preview}"));
        }

        fn view_rendered_snapshot(&self, _snapshot: SnapshotHandle, is_preview: bool) {
            self.log.lock().unwrap().push(format!("rendered:{is_preview}"));
        }

        fn view_invalidated(&self) {
            self.log.lock().unwrap().push("invalidated".to_string());
        }
    }

    /// Renderer whose hooks can be parked on oneshot gates and whose mutation
    /// step writes to the shared log.
    struct GateRenderer {
        snapshot: SnapshotHandle,
        log: CallLog,
        preview: bool,
        render_needed: bool,
        prepare_gate: Option<oneshot::Receiver<()>>,
        render_gate: Option<oneshot::Receiver<()>>,
        fail_render: bool,
    }

    impl GateRenderer {
        fn new(snapshot: SnapshotHandle, log: CallLog) -> Self {
            Self {
                snapshot,
                log,
                preview: false,
                render_needed: true,
                prepare_gate: None,
                render_gate: None,
                fail_render: false,
            }
        }
    }

    impl Renderer for GateRenderer {
        fn is_preview(&self) -> bool {
            self.preview
        }

        fn should_render(&self) -> bool {
            self.render_needed
        }

        fn new_snapshot(&self) -> SnapshotHandle {
            self.snapshot.clone()
        }

        async fn prepare_to_render(&mut self) -> anyhow::Result<()> {
            if let Some(gate) = self.prepare_gate.take() {
                let _ = gate.await;
            }
            Ok(())
        }

        async fn render(&mut self) -> anyhow::Result<()> {
            if let Some(gate) = self.render_gate.take() {
                let _ = gate.await;
            }
            if self.fail_render {
                return Err(anyhow!("boom"));
            }
            self.log.lock().unwrap().push("mutate".to_string());
            Ok(())
        }
    }

    fn harness() -> (Arc<InMemoryDocument>, View, CallLog) {
        let doc = InMemoryDocument::new();
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let view = View::builder()
            .root(doc.root())
            .delegate(Arc::new(RecordingDelegate { log: log.clone() }))
            .source(doc.clone())
            .build()
            .unwrap();

        (doc, view, log)
    }

    fn empty_snapshot() -> SnapshotHandle {
        InMemorySnapshot::from_elements(vec![])
    }

    #[tokio::test]
    async fn declined_render_invalidates_without_mutation() {
        let (_doc, view, log) = harness();

        let mut renderer = GateRenderer::new(empty_snapshot(), log.clone());
        renderer.render_needed = false;

        view.render(renderer).await.unwrap();

        assert!(!view.is_rendering());
        assert_eq!(*log.lock().unwrap(), vec!["invalidated"]);
    }

    #[tokio::test]
    async fn delegate_brackets_the_mutation() {
        let (_doc, view, log) = harness();

        view.render(GateRenderer::new(empty_snapshot(), log.clone()))
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["will:false", "mutate", "rendered:false"]
        );
        assert!(!view.is_rendering());
    }

    #[tokio::test]
    async fn second_render_fails_while_first_is_suspended() {
        let (_doc, view, log) = harness();

        let (release, gate) = oneshot::channel();
        let mut first = GateRenderer::new(empty_snapshot(), log.clone());
        first.render_gate = Some(gate);

        let mut in_flight = Box::pin(view.render(first));
        assert!(futures::poll!(in_flight.as_mut()).is_pending());
        assert!(view.is_rendering());

        let second = GateRenderer::new(empty_snapshot(), log.clone());
        let err = view.render(second).await.unwrap_err();
        assert!(matches!(err, ViewError::RenderInProgress));

        // A declined render mid-flight fails the same way, it is not treated
        // as a harmless no-op.
        let mut declined = GateRenderer::new(empty_snapshot(), log.clone());
        declined.render_needed = false;
        let err = view.render(declined).await.unwrap_err();
        assert!(matches!(err, ViewError::RenderInProgress));

        release.send(()).unwrap();
        in_flight.await.unwrap();
        assert!(!view.is_rendering());
    }

    #[tokio::test]
    async fn concurrency_error_while_suspended_in_prepare() {
        let (_doc, view, log) = harness();

        let (release, gate) = oneshot::channel();
        let mut first = GateRenderer::new(empty_snapshot(), log.clone());
        first.prepare_gate = Some(gate);

        let mut in_flight = Box::pin(view.render(first));
        assert!(futures::poll!(in_flight.as_mut()).is_pending());

        let err = view
            .render(GateRenderer::new(empty_snapshot(), log.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::RenderInProgress));

        // The delegate has not been notified yet while prepare is parked.
        assert!(log.lock().unwrap().is_empty());

        release.send(()).unwrap();
        in_flight.await.unwrap();
    }

    #[tokio::test]
    async fn hook_failure_releases_the_slot_and_propagates() {
        let (_doc, view, log) = harness();

        let mut failing = GateRenderer::new(empty_snapshot(), log.clone());
        failing.fail_render = true;

        let err = view.render(failing).await.unwrap_err();
        assert!(matches!(err, ViewError::Renderer(_)));
        assert!(!view.is_rendering());

        // The failed render announced itself but never completed.
        assert_eq!(*log.lock().unwrap(), vec!["will:false"]);

        // The slot is usable again.
        log.lock().unwrap().clear();
        view.render(GateRenderer::new(empty_snapshot(), log.clone()))
            .await
            .unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["will:false", "mutate", "rendered:false"]
        );
    }

    #[tokio::test]
    async fn preview_marker_follows_the_renderer() {
        let (doc, view, log) = harness();
        let attr = ViewConfig::default().preview_attribute;

        let mut preview = GateRenderer::new(empty_snapshot(), log.clone());
        preview.preview = true;
        view.render(preview).await.unwrap();
        assert!(doc.root().has_attribute(&attr));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["will:true", "mutate", "rendered:true"]
        );

        view.render(GateRenderer::new(empty_snapshot(), log.clone()))
            .await
            .unwrap();
        assert!(!doc.root().has_attribute(&attr));
    }

    #[tokio::test]
    async fn missing_anchor_scrolls_to_origin_without_focus() {
        let (doc, view, _log) = harness();

        doc.viewport().scroll_to(Position::new(0.0, 900.0));
        view.scroll_to_anchor("missing-id");

        assert_eq!(doc.scroll_offset(), Position::ORIGIN);
    }

    #[tokio::test]
    async fn present_anchor_scrolls_into_view_and_focuses() {
        let (doc, view, _log) = harness();

        let heading = doc.create_element("h2");
        heading.set_attribute("id", "section-2");
        doc.append(heading.clone());

        doc.viewport().scroll_to(Position::new(0.0, 900.0));
        view.scroll_to_anchor("section-2");

        assert_eq!(heading.scroll_into_view_calls(), 1);
        assert!(heading.is_focused());
        // The found-anchor path never touches the scroll root.
        assert_eq!(doc.scroll_offset(), Position::new(0.0, 900.0));
    }

    #[tokio::test]
    async fn temporary_tabindex_is_removed_after_focus() {
        let (doc, view, _log) = harness();

        let heading = doc.create_element("h2");
        assert!(!heading.has_attribute(ATTR_TABINDEX));

        view.focus_element(&(heading.clone() as ElementHandle));

        assert!(heading.is_focused());
        assert!(!heading.has_attribute(ATTR_TABINDEX));
    }

    #[tokio::test]
    async fn explicit_tabindex_is_left_alone() {
        let (doc, view, _log) = harness();

        let link = doc.create_element("a");
        link.set_attribute(ATTR_TABINDEX, "0");

        view.focus_element(&(link.clone() as ElementHandle));

        assert!(link.is_focused());
        assert_eq!(link.attribute(ATTR_TABINDEX).as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn unfocusable_element_is_skipped_silently() {
        let (doc, view, _log) = harness();

        let script = doc.create_element("script");
        view.focus_element(&(script.clone() as ElementHandle));

        assert!(!script.is_focused());
        assert!(!script.has_attribute(ATTR_TABINDEX));
    }

    #[tokio::test]
    async fn scroll_to_position_targets_the_scroll_root() {
        let (doc, view, _log) = harness();

        view.scroll_to_position(Position::new(16.0, 320.0));
        assert_eq!(doc.scroll_offset(), Position::new(16.0, 320.0));
    }

    #[test]
    fn builder_requires_its_collaborators() {
        let doc = InMemoryDocument::new();
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let delegate: Arc<dyn ViewDelegate> = Arc::new(RecordingDelegate { log });

        let err = View::builder().build().unwrap_err();
        assert!(matches!(err, ViewError::MissingRoot));

        let err = View::builder().root(doc.root()).build().unwrap_err();
        assert!(matches!(err, ViewError::MissingDelegate));

        let err = View::builder()
            .root(doc.root())
            .delegate(delegate.clone())
            .build()
            .unwrap_err();
        assert!(matches!(err, ViewError::MissingDocument));

        let view = View::builder()
            .root(doc.root())
            .delegate(delegate)
            .source(doc.clone())
            .id(ViewId::from(uuid::Uuid::nil()))
            .build()
            .unwrap();
        assert_eq!(view.view_id, ViewId::from(uuid::Uuid::nil()));
    }
}
