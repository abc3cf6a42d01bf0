use super::{Command, Config, Manager};
use crate::child_process::Nanny;
use crate::display_action::DisplayAction;
use crate::display_event::FullscreenChange;
use crate::display_servers::DisplayServer;
use crate::models::Handle;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Run a command fired by a chord.
    /// Returns true if the state changed.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        tracing::trace!("command: {:?}", command);
        match command {
            Command::Execute(program) => {
                match Nanny::spawn(program) {
                    Ok(child) => {
                        self.children.insert(child);
                    }
                    Err(err) => tracing::error!("unable to spawn {program}: {err}"),
                }
                false
            }

            Command::ToggleLeader(active) => {
                self.state.set_leader_mode(*active);
                false
            }

            Command::Banish => {
                let Some(monitor) = self.state.selected_monitor() else {
                    return false;
                };
                let rect = monitor.rect;
                let corner = (rect.x() + rect.w() - 1, rect.y() + rect.h() - 1);
                self.state
                    .actions
                    .push_back(DisplayAction::MoveMouseOverPoint(corner));
                false
            }

            Command::CloseWindow => {
                let Some(handle) = self.state.focus_manager.current() else {
                    return false;
                };
                self.state
                    .actions
                    .push_back(DisplayAction::CloseWindow(handle));
                false
            }

            Command::ForceCloseWindow => {
                let Some(handle) = self.state.focus_manager.current() else {
                    return false;
                };
                self.state
                    .actions
                    .push_back(DisplayAction::ForceCloseWindow(handle));
                false
            }

            Command::ToggleFullScreen => {
                let Some(handle) = self.state.focus_manager.current() else {
                    return false;
                };
                self.state
                    .fullscreen_request_handler(&handle, FullscreenChange::Toggle)
            }

            Command::FocusLast => self.state.focus_last(),

            Command::Quit => {
                self.state.running = false;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Monitor, MonitorId, WindowHandle, Xyhw};

    fn manager() -> Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    > {
        let mut manager = Manager::new_test();
        let mut monitor = Monitor::new(MonitorId(0), Xyhw::new(0, 0, 1920, 1080));
        monitor
            .clients
            .push(Client::new(WindowHandle(1), None, MonitorId(0)));
        manager.state.monitors.push(monitor);
        manager
    }

    #[test]
    fn banish_warps_to_the_selected_monitor_corner() {
        let mut manager = manager();
        manager.command_handler(&Command::Banish);
        assert!(manager.state.actions.iter().any(|act| matches!(
            act,
            DisplayAction::MoveMouseOverPoint((1919, 1079))
        )));
    }

    #[test]
    fn close_window_targets_the_focused_window_only() {
        let mut manager = manager();
        // Nothing focused, nothing to close.
        manager.command_handler(&Command::CloseWindow);
        assert!(manager.state.actions.is_empty());

        manager.state.focus_window(Some(WindowHandle(1)));
        manager.state.actions.clear();
        manager.command_handler(&Command::CloseWindow);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|act| matches!(act, DisplayAction::CloseWindow(WindowHandle(1)))));
    }

    #[test]
    fn quit_stops_the_reactor() {
        let mut manager = manager();
        assert!(manager.state.running);
        manager.command_handler(&Command::Quit);
        assert!(!manager.state.running);
    }

    #[test]
    fn toggling_leader_twice_emits_one_action_per_change() {
        let mut manager = manager();
        manager.command_handler(&Command::ToggleLeader(true));
        manager.command_handler(&Command::ToggleLeader(true));
        let count = manager
            .state
            .actions
            .iter()
            .filter(|act| matches!(act, DisplayAction::SetLeaderMode(true)))
            .count();
        assert_eq!(count, 1);
    }
}
