use super::{Config, DisplayEvent, Manager};
use crate::display_servers::DisplayServer;
use crate::models::Handle;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Apply one event from the display server to the state machine.
    /// Returns true if the state changed.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        match event {
            DisplayEvent::WindowCreate(client, x, y) => self.window_created_handler(client, x, y),
            DisplayEvent::WindowUnmap(handle) => self.window_destroyed_handler(&handle, false),
            DisplayEvent::WindowDestroy(handle) => self.window_destroyed_handler(&handle, true),

            DisplayEvent::ConfigureRequest { handle, x, y, w, h } => {
                self.state.configure_request_handler(&handle, x, y, w, h)
            }

            DisplayEvent::FullscreenRequest(handle, change) => {
                self.state.fullscreen_request_handler(&handle, change)
            }

            DisplayEvent::WindowTakeFocus(handle) => self.state.focus_window(Some(handle)),

            DisplayEvent::WindowNameChanged(handle, name) => {
                self.state.window_name_changed_handler(&handle, name)
            }
            DisplayEvent::WindowSizeHintsChanged(handle, hints) => {
                self.state.window_hints_changed_handler(&handle, hints)
            }
            DisplayEvent::WindowWmHintsChanged {
                handle,
                urgent,
                never_focus,
            } => self
                .state
                .window_wm_hints_changed_handler(&handle, urgent, never_focus),
            DisplayEvent::WindowTransientChanged(handle, transient) => self
                .state
                .window_transient_changed_handler(&handle, transient),

            DisplayEvent::KeyCombo(mod_mask, keysym) => {
                match self.state.key_combo_handler(&mod_mask, keysym) {
                    Some(command) => self.command_handler(&command),
                    None => false,
                }
            }

            DisplayEvent::KeyGrabReload => {
                self.state.reload_key_grabs();
                false
            }

            DisplayEvent::OutputsChanged { outputs, pointer } => {
                self.state.reconcile_outputs(&outputs, pointer)
            }
        }
    }
}
