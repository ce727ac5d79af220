use serde::{Deserialize, Serialize};

const DEFAULT_PREVIEW_ATTRIBUTE: &str = "data-slipstream-preview";

/// Configuration for a [`View`](crate::View). Hosts usually take the defaults;
/// the attribute name is configurable so embedders can match their own CSS hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Name of the boolean attribute toggled on the root element while the
    /// current content is a preview render.
    pub preview_attribute: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            preview_attribute: DEFAULT_PREVIEW_ATTRIBUTE.to_string(),
        }
    }
}
