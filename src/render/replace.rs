use crate::dom::in_memory::{InMemoryDocument, InMemorySnapshot};
use crate::render::renderer::Renderer;
use crate::snapshot::SnapshotHandle;
use std::sync::Arc;

/// Renderer for the in-memory document that replaces the whole document
/// content with the target snapshot's elements. No diffing is performed.
pub struct ReplaceRenderer {
    document: Arc<InMemoryDocument>,
    snapshot: Arc<InMemorySnapshot>,

    /// Marks this render as provisional (see [`Renderer::is_preview`]).
    pub preview: bool,
    /// Precomputed decision whether the swap should happen at all.
    pub render_needed: bool,
}

impl ReplaceRenderer {
    /// Creates a renderer that swaps `document`'s content to `snapshot`.
    /// Defaults to a non-preview render that performs the swap.
    pub fn new(document: Arc<InMemoryDocument>, snapshot: Arc<InMemorySnapshot>) -> Self {
        Self {
            document,
            snapshot,
            preview: false,
            render_needed: true,
        }
    }
}

impl Renderer for ReplaceRenderer {
    fn is_preview(&self) -> bool {
        self.preview
    }

    fn should_render(&self) -> bool {
        self.render_needed
    }

    fn new_snapshot(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    async fn render(&mut self) -> anyhow::Result<()> {
        self.document.set_children(self.snapshot.elements());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::snapshot::SnapshotSource;

    #[tokio::test]
    async fn render_swaps_document_content() {
        let doc = InMemoryDocument::new();
        doc.append(doc.create_element("p"));

        let heading = doc.create_element("h1");
        heading.set_attribute("id", "top");
        let snapshot = InMemorySnapshot::from_elements(vec![heading]);

        let mut renderer = ReplaceRenderer::new(doc.clone(), snapshot);
        assert!(renderer.should_render());
        assert!(!renderer.is_preview());

        renderer.render().await.unwrap();

        let children = doc.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag(), "h1");
        assert!(doc.current_snapshot().element_for_anchor("top").is_some());
    }
}
