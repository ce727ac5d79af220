pub mod renderer;

/// Built-in renderers for the in-memory document.
pub mod replace;

pub use renderer::Renderer;
