//! Current display state.

use keymeter_core::DisplayState;
use tokio::sync::watch;
use tracing::debug;

/// Holds the one [`DisplayState`] the host shows.
///
/// Writers replace the whole state; the last write wins. Readers take a
/// copy.
#[derive(Debug, Clone)]
pub struct DisplayStore {
    tx: watch::Sender<DisplayState>,
}

impl DisplayStore {
    /// Creates a store in the `Loading` state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(DisplayState::Loading);
        Self { tx }
    }

    /// Replaces the current state.
    pub fn set(&self, state: DisplayState) {
        debug!(state = state.name(), "Display state changed");
        self.tx.send_replace(state);
    }

    /// Returns a copy of the current state.
    pub fn current(&self) -> DisplayState {
        self.tx.borrow().clone()
    }
}

impl Default for DisplayStore {
    fn default() -> Self {
        Self::new()
    }
}
