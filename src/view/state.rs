use crate::errors::ViewError;
use std::sync::{Arc, Mutex};

/// Render state of a [`View`](crate::View). This is a state machine that
/// cycles between its two states for the life of the view; the `Rendering`
/// variant doubles as the single-active-renderer slot, so "at most one
/// render in flight" is carried by the state itself.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// No render in flight.
    #[default]
    Idle,

    /// A render is in progress. `preview` mirrors the active renderer.
    Rendering { preview: bool },
}

/// Claim on the render slot. Restores [`RenderState::Idle`] when dropped, so
/// the slot is released on every exit path of a render, success or failure.
///
/// The mutex is only locked for the claim and the release; exclusion across
/// the render's suspension points comes from the state value, never from
/// lock tenure.
#[derive(Debug)]
pub(crate) struct ActiveRender {
    state: Arc<Mutex<RenderState>>,
}

impl ActiveRender {
    /// Claims the render slot, failing when a render is already in flight.
    pub(crate) fn acquire(
        state: &Arc<Mutex<RenderState>>,
        preview: bool,
    ) -> Result<Self, ViewError> {
        let mut guard = state.lock().unwrap();

        if matches!(*guard, RenderState::Rendering { .. }) {
            return Err(ViewError::RenderInProgress);
        }
        *guard = RenderState::Rendering { preview };

        Ok(Self {
            state: state.clone(),
        })
    }
}

impl Drop for ActiveRender {
    fn drop(&mut self) {
        *self.state.lock().unwrap() = RenderState::Idle;
    }
}
