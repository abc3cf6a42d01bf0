//! Logical output regions.

use super::{Client, Handle, WindowHandle, Xyhw};
use serde::{Deserialize, Serialize};

/// Index of a monitor in the state's registry. Stable for the life of the
/// monitor, reused only after it is gone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonitorId(pub usize);

/// One connected output and the clients that live on it. The client list is
/// ordered, newest first.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Monitor<H: Handle> {
    pub id: MonitorId,
    /// Full output rectangle.
    pub rect: Xyhw,
    /// Area windows may occupy. Matches `rect` since nothing reserves space.
    pub work: Xyhw,
    #[serde(bound = "")]
    pub clients: Vec<Client<H>>,
    #[serde(bound = "")]
    pub selected: Option<WindowHandle<H>>,
}

impl<H: Handle> Monitor<H> {
    #[must_use]
    pub fn new(id: MonitorId, rect: Xyhw) -> Self {
        Self {
            id,
            rect,
            work: rect,
            clients: Vec::new(),
            selected: None,
        }
    }

    pub fn resize(&mut self, rect: Xyhw) {
        self.rect = rect;
        self.work = rect;
    }

    #[must_use]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(x, y)
    }

    #[must_use]
    pub fn client(&self, handle: &WindowHandle<H>) -> Option<&Client<H>> {
        self.clients.iter().find(|c| &c.handle == handle)
    }

    pub fn client_mut(&mut self, handle: &WindowHandle<H>) -> Option<&mut Client<H>> {
        self.clients.iter_mut().find(|c| &c.handle == handle)
    }

    pub fn remove_client(&mut self, handle: &WindowHandle<H>) -> Option<Client<H>> {
        let index = self.clients.iter().position(|c| &c.handle == handle)?;
        if self.selected == Some(*handle) {
            self.selected = None;
        }
        Some(self.clients.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    #[test]
    fn removing_the_selected_client_clears_the_selection() {
        let mut monitor: Monitor<MockHandle> =
            Monitor::new(MonitorId(0), Xyhw::new(0, 0, 800, 600));
        let handle = WindowHandle(7);
        monitor
            .clients
            .push(Client::new(handle, None, MonitorId(0)));
        monitor.selected = Some(handle);
        assert!(monitor.remove_client(&handle).is_some());
        assert_eq!(monitor.selected, None);
    }
}
