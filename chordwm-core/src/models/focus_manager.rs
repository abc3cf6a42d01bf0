use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::client::Handle;
use super::WindowHandle;

const MAX_HISTORY: usize = 10;

/// Stores the history of which windows had focus. The front entry is the
/// window focused right now; `None` marks a stretch with nothing focused.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FocusManager<H: Handle> {
    #[serde(bound = "")]
    pub window_history: VecDeque<Option<WindowHandle<H>>>,
}

impl<H: Handle> FocusManager<H> {
    /// The currently focused window, if any.
    #[must_use]
    pub fn current(&self) -> Option<WindowHandle<H>> {
        self.window_history.front().copied().flatten()
    }

    /// The window focused before the current one.
    #[must_use]
    pub fn previous(&self) -> Option<WindowHandle<H>> {
        self.window_history.get(1).copied().flatten()
    }

    pub fn push(&mut self, handle: Option<WindowHandle<H>>) {
        self.window_history.truncate(MAX_HISTORY);
        self.window_history.push_front(handle);
    }

    /// Drop a destroyed window from the history so `previous` never points
    /// at a handle the server no longer knows.
    pub fn forget(&mut self, handle: &WindowHandle<H>) {
        self.window_history.retain(|h| h.as_ref() != Some(handle));
    }
}
