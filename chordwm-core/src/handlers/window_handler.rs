use super::{Client, Config, Manager, WindowHandle};
use crate::display_action::DisplayAction;
use crate::display_event::FullscreenChange;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, SavedState, SizeHints};
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Start managing a window the server told us about.
    /// Returns true if the state changed.
    pub fn window_created_handler(&mut self, mut client: Client<H>, _x: i32, _y: i32) -> bool {
        // Don't add the window if the manager already knows about it.
        if self.state.client(&client.handle).is_some() {
            return false;
        }

        client.border = self.state.border_width;

        // Transient windows live with their parent, everything else goes to
        // the selected monitor.
        let monitor = client
            .transient
            .and_then(|parent| self.state.client(&parent).map(|p| p.monitor))
            .unwrap_or(self.state.selected_monitor);
        client.monitor = monitor;
        // The backend may already have flagged it floating (dialogs).
        client.floating = client.floating || client.transient.is_some() || client.is_fixed();

        if let Some(monitor) = self.state.monitor(monitor) {
            let work = monitor.work;
            let display = self.state.display_size;
            let (mut x, mut y, mut w, mut h) = (
                client.xyhw.x(),
                client.xyhw.y(),
                client.xyhw.w(),
                client.xyhw.h(),
            );
            client.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &work, &display);
            client.prev_xyhw = client.xyhw;
            client.xyhw.set_x(x);
            client.xyhw.set_y(y);
            client.xyhw.set_w(w);
            client.xyhw.set_h(h);
        }

        let handle = client.handle;
        tracing::debug!("managing window {:?} on {:?}", handle, monitor);

        self.state
            .actions
            .push_back(DisplayAction::AddedWindow(client.clone()));

        if let Some(monitor) = self.state.monitor_mut(monitor) {
            monitor.clients.insert(0, client);
        }
        self.state.client_list.push(handle);
        self.state.update_client_list();

        self.state.focus_window(Some(handle));
        true
    }

    /// Stop managing a window. `destroyed` tells whether the window still
    /// exists on the server and wants its original border back.
    pub fn window_destroyed_handler(&mut self, handle: &WindowHandle<H>, destroyed: bool) -> bool {
        let Some(client) = self
            .state
            .monitors
            .iter_mut()
            .find_map(|m| m.remove_client(handle))
        else {
            return false;
        };

        self.state.client_list.retain(|h| h != handle);
        let was_focused = self.state.focus_manager.current() == Some(*handle);
        self.state.focus_manager.forget(handle);

        let restore_border = (!destroyed).then_some(client.old_border);
        self.state.actions.push_back(DisplayAction::DestroyedWindow {
            handle: *handle,
            restore_border,
        });
        self.state.update_client_list();

        if was_focused {
            self.state.focus_fallback_on(client.monitor);
        }
        true
    }
}

impl<H: Handle> State<H> {
    /// Apply a configure request from the client itself. The request is run
    /// through the size-hint policy and committed only when it changes the
    /// recorded geometry.
    pub fn configure_request_handler(
        &mut self,
        handle: &WindowHandle<H>,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> bool {
        let display = self.display_size;
        let Some(client) = self.client(handle) else {
            return false;
        };
        // A fullscreen window owns its monitor; requests wait until it
        // leaves fullscreen.
        if client.fullscreen {
            return false;
        }
        let work = self
            .monitor(client.monitor)
            .map(|m| m.work)
            .unwrap_or(display);

        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        let changed = client.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &work, &display);
        if !changed {
            return false;
        }

        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.prev_xyhw = client.xyhw;
        client.xyhw.set_x(x);
        client.xyhw.set_y(y);
        client.xyhw.set_w(w);
        client.xyhw.set_h(h);
        let act = DisplayAction::ConfigureWindow(client.clone());
        self.actions.push_back(act);
        true
    }

    pub fn fullscreen_request_handler(
        &mut self,
        handle: &WindowHandle<H>,
        change: FullscreenChange,
    ) -> bool {
        let Some(current) = self.client(handle).map(|c| c.fullscreen) else {
            return false;
        };
        let target = match change {
            FullscreenChange::Add => true,
            FullscreenChange::Remove => false,
            FullscreenChange::Toggle => !current,
        };
        self.set_fullscreen(handle, target)
    }

    /// Enter or leave fullscreen. Idempotent; the pre-fullscreen geometry,
    /// border and floating flag survive the round trip exactly.
    pub fn set_fullscreen(&mut self, handle: &WindowHandle<H>, enable: bool) -> bool {
        let monitor_rect = self
            .client(handle)
            .and_then(|c| self.monitor(c.monitor))
            .map(|m| m.rect);
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        if client.fullscreen == enable {
            return false;
        }

        if enable {
            let Some(rect) = monitor_rect else {
                return false;
            };
            client.saved = Some(SavedState {
                floating: client.floating,
                border: client.border,
                xyhw: client.xyhw,
            });
            client.fullscreen = true;
            client.floating = true;
            client.border = 0;
            client.prev_xyhw = client.xyhw;
            client.xyhw = rect;
        } else {
            client.fullscreen = false;
            if let Some(saved) = client.saved.take() {
                client.floating = saved.floating;
                client.border = saved.border;
                client.prev_xyhw = client.xyhw;
                client.xyhw = saved.xyhw;
            }
        }

        let snapshot = client.clone();
        self.actions
            .push_back(DisplayAction::SetFullscreenState(*handle, enable));
        self.actions
            .push_back(DisplayAction::ConfigureWindow(snapshot));
        if enable {
            self.actions.push_back(DisplayAction::MoveToTop(*handle));
        }
        true
    }

    pub fn window_name_changed_handler(
        &mut self,
        handle: &WindowHandle<H>,
        name: Option<String>,
    ) -> bool {
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.set_name(name);
        false
    }

    pub fn window_hints_changed_handler(
        &mut self,
        handle: &WindowHandle<H>,
        hints: SizeHints,
    ) -> bool {
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.update_hints(hints);
        if client.is_fixed() {
            client.floating = true;
        }
        false
    }

    pub fn window_wm_hints_changed_handler(
        &mut self,
        handle: &WindowHandle<H>,
        urgent: bool,
        never_focus: bool,
    ) -> bool {
        let focused = self.focus_manager.current() == Some(*handle);
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        // The focused window is never urgent; the user is already there.
        client.urgent = urgent && !focused;
        client.never_focus = never_focus;
        false
    }

    pub fn window_transient_changed_handler(
        &mut self,
        handle: &WindowHandle<H>,
        transient: Option<WindowHandle<H>>,
    ) -> bool {
        let Some(client) = self.client_mut(handle) else {
            return false;
        };
        client.transient = transient;
        if transient.is_some() {
            client.floating = true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Monitor, MonitorId, Xyhw};

    type TestManager = Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >;

    fn manager_with_monitor() -> TestManager {
        let mut manager = Manager::new_test();
        manager
            .state
            .monitors
            .push(Monitor::new(MonitorId(0), Xyhw::new(0, 0, 1920, 1080)));
        manager.state.display_size = Xyhw::new(0, 0, 1920, 1080);
        manager
    }

    fn new_client(n: i32) -> Client<crate::models::MockHandle> {
        let mut client = Client::new(WindowHandle(n), None, MonitorId(0));
        client.xyhw = Xyhw::new(10, 10, 400, 300);
        client
    }

    #[test]
    fn every_managed_window_is_on_exactly_one_monitor() {
        let mut manager = manager_with_monitor();
        manager
            .state
            .monitors
            .push(Monitor::new(MonitorId(1), Xyhw::new(1920, 0, 1920, 1080)));
        for n in 1..=4 {
            manager.window_created_handler(new_client(n), 0, 0);
        }
        manager.window_destroyed_handler(&WindowHandle(2), true);

        let total: usize = manager.state.client_count();
        assert_eq!(total, manager.state.client_list.len());
        for handle in &manager.state.client_list {
            let owners = manager
                .state
                .monitors
                .iter()
                .filter(|m| m.client(handle).is_some())
                .count();
            assert_eq!(owners, 1);
        }
    }

    #[test]
    fn managing_a_window_twice_is_a_no_op() {
        let mut manager = manager_with_monitor();
        assert!(manager.window_created_handler(new_client(1), 0, 0));
        assert!(!manager.window_created_handler(new_client(1), 0, 0));
        assert_eq!(manager.state.client_count(), 1);
    }

    #[test]
    fn new_windows_take_focus_and_the_head_of_the_list() {
        let mut manager = manager_with_monitor();
        manager.window_created_handler(new_client(1), 0, 0);
        manager.window_created_handler(new_client(2), 0, 0);
        assert_eq!(
            manager.state.focus_manager.current(),
            Some(WindowHandle(2))
        );
        assert_eq!(
            manager.state.monitors[0].clients[0].handle,
            WindowHandle(2)
        );
        // Mapping order is preserved for the published client list.
        assert_eq!(
            manager.state.client_list,
            vec![WindowHandle(1), WindowHandle(2)]
        );
    }

    #[test]
    fn transients_follow_their_parent_monitor() {
        let mut manager = manager_with_monitor();
        manager
            .state
            .monitors
            .push(Monitor::new(MonitorId(1), Xyhw::new(1920, 0, 1920, 1080)));
        manager.window_created_handler(new_client(1), 0, 0);
        // Parent sits on monitor 1 now.
        manager.state.client_mut(&WindowHandle(1)).unwrap().monitor = MonitorId(1);
        let parent = manager
            .state
            .monitors[0]
            .remove_client(&WindowHandle(1))
            .unwrap();
        manager.state.monitors[1].clients.push(parent);
        manager.state.selected_monitor = MonitorId(0);

        let mut dialog = new_client(2);
        dialog.transient = Some(WindowHandle(1));
        manager.window_created_handler(dialog, 0, 0);

        let managed = manager.state.client(&WindowHandle(2)).unwrap();
        assert_eq!(managed.monitor, MonitorId(1));
        assert!(managed.floating);
    }

    #[test]
    fn unmanage_of_an_unmapped_window_restores_its_border() {
        let mut manager = manager_with_monitor();
        let mut client = new_client(1);
        client.old_border = 3;
        manager.window_created_handler(client, 0, 0);
        manager.state.actions.clear();
        manager.window_destroyed_handler(&WindowHandle(1), false);
        assert!(manager.state.actions.iter().any(|act| matches!(
            act,
            DisplayAction::DestroyedWindow {
                restore_border: Some(3),
                ..
            }
        )));
    }

    #[test]
    fn destroying_the_focused_window_falls_back_to_the_same_monitor() {
        let mut manager = manager_with_monitor();
        manager.window_created_handler(new_client(1), 0, 0);
        manager.window_created_handler(new_client(2), 0, 0);
        manager.window_destroyed_handler(&WindowHandle(2), true);
        assert_eq!(
            manager.state.focus_manager.current(),
            Some(WindowHandle(1))
        );
    }

    #[test]
    fn fullscreen_round_trip_restores_the_saved_state() {
        let mut manager = manager_with_monitor();
        manager.window_created_handler(new_client(1), 0, 0);
        let before = manager.state.client(&WindowHandle(1)).unwrap().clone();

        assert!(manager.state.set_fullscreen(&WindowHandle(1), true));
        {
            let c = manager.state.client(&WindowHandle(1)).unwrap();
            assert!(c.fullscreen);
            assert_eq!(c.border, 0);
            assert_eq!(c.xyhw, manager.state.monitors[0].rect);
        }
        // Enabling twice changes nothing.
        assert!(!manager.state.set_fullscreen(&WindowHandle(1), true));

        assert!(manager.state.set_fullscreen(&WindowHandle(1), false));
        let after = manager.state.client(&WindowHandle(1)).unwrap();
        assert_eq!(after.xyhw, before.xyhw);
        assert_eq!(after.border, before.border);
        assert_eq!(after.floating, before.floating);
        assert!(after.saved.is_none());
    }

    #[test]
    fn offscreen_configure_requests_are_clamped() {
        let mut manager = manager_with_monitor();
        let mut client = new_client(1);
        client.border = 0;
        manager.window_created_handler(client, 0, 0);
        manager.state.monitors[0].resize(Xyhw::new(0, 0, 1000, 800));
        manager.state.display_size = Xyhw::new(0, 0, 1000, 800);
        manager.state.actions.clear();

        // Border width comes from config (1 in tests); zero it for the math.
        manager.state.client_mut(&WindowHandle(1)).unwrap().border = 0;
        assert!(manager
            .state
            .configure_request_handler(&WindowHandle(1), 1200, 50, 300, 300));
        let c = manager.state.client(&WindowHandle(1)).unwrap();
        assert_eq!((c.xyhw.x(), c.xyhw.y()), (700, 50));
    }

    #[test]
    fn unchanged_configure_requests_are_dropped() {
        let mut manager = manager_with_monitor();
        manager.window_created_handler(new_client(1), 0, 0);
        let current = manager.state.client(&WindowHandle(1)).unwrap().xyhw;
        manager.state.actions.clear();
        assert!(!manager.state.configure_request_handler(
            &WindowHandle(1),
            current.x(),
            current.y(),
            current.w(),
            current.h(),
        ));
        assert!(manager.state.actions.is_empty());
    }
}
