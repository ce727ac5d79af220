// src/view.rs
//! View system: [`View`], [`ViewDelegate`], and [`ViewId`].
//!

mod delegate;
mod state;
#[allow(clippy::module_inception)]
mod view;

pub use delegate::ViewDelegate;
pub use state::RenderState;
pub use view::{View, ViewBuilder, ViewId};
