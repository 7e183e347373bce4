//! Shared application state for axum handlers.

use std::sync::Arc;

use restswitch_app::switch::RestSwitch;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations of the switch to avoid dynamic
/// dispatch. `Clone` is implemented manually so the ports themselves do not
/// need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<H, T> {
    /// The switch driven by the API.
    pub switch: Arc<RestSwitch<H, T>>,
}

impl<H, T> Clone for AppState<H, T> {
    fn clone(&self) -> Self {
        Self {
            switch: Arc::clone(&self.switch),
        }
    }
}

impl<H, T> AppState<H, T> {
    /// Create the state from a switch shared with background tasks.
    pub fn new(switch: Arc<RestSwitch<H, T>>) -> Self {
        Self { switch }
    }
}
