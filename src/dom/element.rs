use crate::position::Position;
use std::sync::Arc;

/// Name of the attribute that places an element in the document's focus order.
pub const ATTR_TABINDEX: &str = "tabindex";

/// Shared handle to a live element owned by the host document.
pub type ElementHandle = Arc<dyn Element>;

/// Object-safe surface of a live element that the view touches. Implementors
/// own their interior mutability; all methods take `&self` so handles can be
/// shared freely.
pub trait Element: Send + Sync {
    /// Retrieves the value of the given attribute, or `None` if not present.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Sets the attribute, overwriting any existing value.
    fn set_attribute(&self, name: &str, value: &str);

    /// Removes the attribute. Removing an absent attribute is a no-op.
    fn remove_attribute(&self, name: &str);

    /// Returns whether the attribute is present (regardless of value).
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Scrolls the element into the visible viewport.
    fn scroll_into_view(&self);

    /// Moves keyboard focus to the element.
    fn focus(&self);

    /// Returns whether this element kind can receive programmatic focus at all.
    fn is_focusable(&self) -> bool;
}

/// The scroll container a [`View`](crate::View) restores positions against.
/// Defaults to the document's top-level viewport; a view scoped to a
/// sub-container supplies that container instead.
pub trait ScrollRoot: Send + Sync {
    /// Scrolls the container to the given absolute offset.
    fn scroll_to(&self, position: Position);
}
