use crate::config::Config;
use crate::models::Handle;
use crate::{DisplayServer, Manager};
use std::sync::atomic::Ordering;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// The reactor. Single threaded: the process idles inside
    /// `get_next_events` and everything else happens between two batches.
    pub fn event_loop(&mut self) {
        self.register_child_hook();
        self.state.reload_key_grabs();
        self.drain_actions();

        while self.state.running {
            self.display_server.flush();

            // SIGCHLD sets the flag but does not wake the loop. A child
            // that exits while we block stays a zombie until the next X
            // event lands; checking here keeps that window to one batch.
            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            for event in self.display_server.get_next_events() {
                self.display_event_handler(event);
            }
            self.drain_actions();
        }

        self.shutdown();
    }

    /// Hand every queued action to the display server. An action may answer
    /// with a follow-up event, which is handled before the queue is
    /// considered drained.
    fn drain_actions(&mut self) {
        while let Some(act) = self.state.actions.pop_front() {
            if let Some(event) = self.display_server.execute_action(act) {
                self.display_event_handler(event);
            }
        }
    }

    /// Release every window gracefully, then let the backend clean up.
    fn shutdown(&mut self) {
        tracing::info!("shutting down");
        let handles: Vec<_> = self.state.client_list.clone();
        for handle in handles.iter().rev() {
            self.window_destroyed_handler(handle, false);
        }
        self.drain_actions();
        self.display_server.cleanup();
        self.display_server.flush();
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Client, Manager, Monitor, MonitorId, WindowHandle, Xyhw};
    use crate::{Command, DisplayAction};

    #[test]
    fn shutdown_releases_every_client_with_its_old_border() {
        let mut manager = Manager::new_test();
        manager
            .state
            .monitors
            .push(Monitor::new(MonitorId(0), Xyhw::new(0, 0, 800, 600)));
        for n in 1..=2 {
            let mut client = Client::new(WindowHandle(n), None, MonitorId(0));
            client.old_border = 2;
            manager.state.monitors[0].clients.push(client);
            manager.state.client_list.push(WindowHandle(n));
        }
        manager.command_handler(&Command::Quit);
        manager.event_loop();

        assert_eq!(manager.state.client_count(), 0);
        let released = manager
            .display_server
            .executed
            .iter()
            .filter(|act| {
                matches!(
                    act,
                    DisplayAction::DestroyedWindow {
                        restore_border: Some(2),
                        ..
                    }
                )
            })
            .count();
        assert_eq!(released, 2);
    }
}
