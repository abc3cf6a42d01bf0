#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::models::{Handle, MonitorId};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Create a `DisplayAction` to cause this window to become focused.
    /// Passing `None` drops focus back to the root window.
    pub fn focus_window(&mut self, handle: Option<WindowHandle<H>>) -> bool {
        let Some(handle) = handle else {
            return self.clear_focus();
        };

        if self.focus_manager.current() == Some(handle) {
            return false;
        }
        let Some(client) = self.client(&handle).cloned() else {
            return false;
        };

        let previous = self.focus_manager.current();
        if let Some(previous) = previous {
            self.actions.push_back(DisplayAction::Unfocus {
                handle: Some(previous),
                refocus_root: false,
            });
        }

        self.focus_manager.push(Some(handle));
        self.selected_monitor = client.monitor;
        if let Some(monitor) = self.monitor_mut(client.monitor) {
            monitor.selected = Some(handle);
        }

        self.actions.push_back(DisplayAction::WindowTakeFocus {
            window: client,
            previous_window: previous,
        });
        // Focus without the raise would leave the window buried behind
        // its siblings.
        self.actions.push_back(DisplayAction::MoveToTop(handle));
        true
    }

    fn clear_focus(&mut self) -> bool {
        let Some(previous) = self.focus_manager.current() else {
            return false;
        };
        self.actions.push_back(DisplayAction::Unfocus {
            handle: Some(previous),
            refocus_root: true,
        });
        self.focus_manager.push(None);
        if let Some(client) = self.client(&previous).cloned() {
            if let Some(monitor) = self.monitor_mut(client.monitor) {
                if monitor.selected == Some(previous) {
                    monitor.selected = None;
                }
            }
        }
        true
    }

    /// Swap focus with the window that had it before the current one.
    pub fn focus_last(&mut self) -> bool {
        let Some(last) = self.focus_manager.previous() else {
            return false;
        };
        if self.client(&last).is_none() {
            return false;
        }
        self.focus_window(Some(last))
    }

    /// After a window goes away, pick the best survivor on its monitor.
    pub(crate) fn focus_fallback_on(&mut self, monitor: MonitorId) {
        let from_history = self
            .focus_manager
            .window_history
            .iter()
            .flatten()
            .find(|h| self.client(h).map(|c| c.monitor) == Some(monitor))
            .copied();
        let fallback = from_history.or_else(|| {
            self.monitor(monitor)
                .and_then(|m| m.clients.iter().find(|c| c.can_focus()))
                .map(|c| c.handle)
        });
        match fallback {
            Some(handle) => {
                self.focus_window(Some(handle));
            }
            None => {
                self.focus_window(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Client, Manager, Monitor, MonitorId, WindowHandle, Xyhw};
    use crate::DisplayAction;

    fn manager_with_clients(count: i32) -> Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    > {
        let mut manager = Manager::new_test();
        let mut monitor = Monitor::new(MonitorId(0), Xyhw::new(0, 0, 1920, 1080));
        for n in 1..=count {
            monitor
                .clients
                .push(Client::new(WindowHandle(n), None, MonitorId(0)));
        }
        manager.state.monitors.push(monitor);
        manager
    }

    #[test]
    fn focusing_a_window_unfocuses_exactly_the_previous_one() {
        let mut manager = manager_with_clients(2);
        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.actions.clear();
        manager.state.focus_window(Some(WindowHandle(2)));

        let unfocused: Vec<_> = manager
            .state
            .actions
            .iter()
            .filter_map(|act| match act {
                DisplayAction::Unfocus { handle, .. } => *handle,
                _ => None,
            })
            .collect();
        assert_eq!(unfocused, vec![WindowHandle(1)]);
    }

    #[test]
    fn refocusing_the_same_window_is_a_no_op() {
        let mut manager = manager_with_clients(1);
        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.actions.clear();
        assert!(!manager.state.focus_window(Some(WindowHandle(1))));
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn focus_last_swaps_between_two_windows() {
        let mut manager = manager_with_clients(2);
        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.focus_window(Some(WindowHandle(2)));
        assert!(manager.state.focus_last());
        assert_eq!(
            manager.state.focus_manager.current(),
            Some(WindowHandle(1))
        );
        assert!(manager.state.focus_last());
        assert_eq!(
            manager.state.focus_manager.current(),
            Some(WindowHandle(2))
        );
    }

    #[test]
    fn focusing_raises_the_window_above_its_siblings() {
        let mut manager = manager_with_clients(2);
        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.focus_window(Some(WindowHandle(2)));
        manager.state.actions.clear();

        // Quick-switch back: window 1 must come to the top, not just get
        // input focus behind window 2.
        assert!(manager.state.focus_last());
        assert!(manager
            .state
            .actions
            .iter()
            .any(|act| matches!(act, DisplayAction::MoveToTop(WindowHandle(1)))));
    }

    #[test]
    fn clearing_focus_refocuses_the_root() {
        let mut manager = manager_with_clients(1);
        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.actions.clear();
        manager.state.focus_window(None);
        assert!(manager.state.actions.iter().any(|act| matches!(
            act,
            DisplayAction::Unfocus {
                refocus_root: true,
                ..
            }
        )));
        assert_eq!(manager.state.focus_manager.current(), None);
    }
}
