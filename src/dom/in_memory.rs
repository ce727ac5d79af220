//! In-memory document for headless hosts and tests. Models the small DOM
//! surface the view touches: a flat list of elements under a root, a single
//! focus slot, and a scrollable viewport. No layout, no nesting.

use crate::dom::{Element, ElementHandle, ScrollRoot};
use crate::position::Position;
use crate::snapshot::{Snapshot, SnapshotHandle, SnapshotSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Element kinds that can never receive focus, not even programmatically.
const INERT_TAGS: &[&str] = &["head", "link", "meta", "script", "style", "template", "title"];

/// The document-wide focus slot, shared by every element created from the
/// same document. Holds the id of the focused element, if any.
type FocusSlot = Arc<RwLock<Option<Uuid>>>;

/// A single element in an [`InMemoryDocument`].
pub struct InMemoryElement {
    id: Uuid,
    tag: String,
    attributes: RwLock<HashMap<String, String>>,
    focus: FocusSlot,
    scroll_calls: AtomicUsize,
}

impl InMemoryElement {
    fn new(tag: &str, focus: FocusSlot) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            tag: tag.to_ascii_lowercase(),
            attributes: RwLock::new(HashMap::new()),
            focus,
            scroll_calls: AtomicUsize::new(0),
        })
    }

    /// Tag name of the element (lowercased).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns whether this element currently holds the document focus.
    pub fn is_focused(&self) -> bool {
        *self.focus.read().unwrap() == Some(self.id)
    }

    /// Number of times this element was scrolled into view.
    pub fn scroll_into_view_calls(&self) -> usize {
        self.scroll_calls.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for InMemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryElement")
            .field("tag", &self.tag)
            .field("id", &self.id)
            .finish()
    }
}

impl Element for InMemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.read().unwrap().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .write()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.attributes.write().unwrap().remove(name);
    }

    fn scroll_into_view(&self) {
        self.scroll_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn focus(&self) {
        if !self.is_focusable() {
            return;
        }
        *self.focus.write().unwrap() = Some(self.id);
    }

    fn is_focusable(&self) -> bool {
        !INERT_TAGS.contains(&self.tag.as_str())
    }
}

/// Scrollable viewport of an [`InMemoryDocument`]. Only tracks the offset.
pub struct InMemoryViewport {
    offset: RwLock<Position>,
}

impl InMemoryViewport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            offset: RwLock::new(Position::ORIGIN),
        })
    }

    /// Current scroll offset of the viewport.
    pub fn offset(&self) -> Position {
        *self.offset.read().unwrap()
    }
}

impl ScrollRoot for InMemoryViewport {
    fn scroll_to(&self, position: Position) {
        *self.offset.write().unwrap() = position;
    }
}

/// Headless document: a root element with a flat list of children, a shared
/// focus slot, and a scrollable viewport.
pub struct InMemoryDocument {
    root: Arc<InMemoryElement>,
    children: RwLock<Vec<Arc<InMemoryElement>>>,
    viewport: Arc<InMemoryViewport>,
    focus: FocusSlot,
}

impl InMemoryDocument {
    /// Creates an empty document with a `body` root.
    pub fn new() -> Arc<Self> {
        let focus: FocusSlot = Arc::new(RwLock::new(None));

        Arc::new(Self {
            root: InMemoryElement::new("body", focus.clone()),
            children: RwLock::new(Vec::new()),
            viewport: InMemoryViewport::new(),
            focus,
        })
    }

    /// Creates a detached element that shares this document's focus slot.
    /// Attach it with [`append`](Self::append) or via a snapshot swap.
    pub fn create_element(&self, tag: &str) -> Arc<InMemoryElement> {
        InMemoryElement::new(tag, self.focus.clone())
    }

    /// Appends an element to the document content.
    pub fn append(&self, element: Arc<InMemoryElement>) {
        self.children.write().unwrap().push(element);
    }

    /// Replaces the document content with the given elements.
    pub fn set_children(&self, elements: Vec<Arc<InMemoryElement>>) {
        *self.children.write().unwrap() = elements;
    }

    /// Current document content.
    pub fn children(&self) -> Vec<Arc<InMemoryElement>> {
        self.children.read().unwrap().clone()
    }

    /// The document's root element.
    pub fn root(&self) -> ElementHandle {
        self.root.clone()
    }

    /// The document's viewport.
    pub fn viewport(&self) -> Arc<InMemoryViewport> {
        self.viewport.clone()
    }

    /// Current scroll offset of the document viewport.
    pub fn scroll_offset(&self) -> Position {
        self.viewport.offset()
    }

    /// Clears the document focus.
    pub fn blur(&self) {
        *self.focus.write().unwrap() = None;
    }
}

impl SnapshotSource for InMemoryDocument {
    fn current_snapshot(&self) -> SnapshotHandle {
        InMemorySnapshot::from_elements(self.children())
    }

    fn viewport(&self) -> Arc<dyn ScrollRoot> {
        self.viewport.clone()
    }
}

/// Immutable snapshot of a document's content. Anchors follow the usual HTML
/// rules: an element's `id` attribute, or the `name` attribute of an `a` tag.
pub struct InMemorySnapshot {
    elements: Vec<Arc<InMemoryElement>>,
    anchors: HashMap<String, Arc<InMemoryElement>>,
}

impl InMemorySnapshot {
    /// Builds a snapshot over the given elements, indexing their anchors.
    /// The first element claiming an anchor wins.
    pub fn from_elements(elements: Vec<Arc<InMemoryElement>>) -> Arc<Self> {
        let mut anchors = HashMap::new();

        for element in &elements {
            if let Some(id) = element.attribute("id") {
                anchors.entry(id).or_insert_with(|| element.clone());
            }
            if element.tag() == "a" {
                if let Some(name) = element.attribute("name") {
                    anchors.entry(name).or_insert_with(|| element.clone());
                }
            }
        }

        Arc::new(Self { elements, anchors })
    }

    /// The elements captured by this snapshot.
    pub fn elements(&self) -> Vec<Arc<InMemoryElement>> {
        self.elements.clone()
    }
}

impl Snapshot for InMemorySnapshot {
    fn element_for_anchor(&self, anchor: &str) -> Option<ElementHandle> {
        self.anchors.get(anchor).map(|e| e.clone() as ElementHandle)
    }
}
