pub mod element;

/// In-memory DOM implementation for headless hosts and tests.
pub mod in_memory;

pub use element::{Element, ElementHandle, ScrollRoot, ATTR_TABINDEX};
