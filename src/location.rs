//! URL helpers for scroll-anchor extraction.
//!
//! Navigation derives the scroll target from the fragment of the destination
//! URL. A trailing `#` counts as an (empty) anchor, since the document may
//! legitimately contain an element addressed by the empty name.

use url::Url;

/// Returns the anchor named by the URL's fragment, or `None` when the URL
/// carries no fragment at all.
pub fn anchor(url: &Url) -> Option<String> {
    url.fragment().map(|f| f.to_string())
}
