// allow casting types
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod event_translate;
mod event_translate_client_message;
mod event_translate_property_notify;
mod xatom;
mod xcursor;
mod xwrap;

use serde::{Deserialize, Serialize};
pub use xwrap::XWrap;

use self::xwrap::ICONIC_STATE;
use chordwm_core::config::Config;
use chordwm_core::models::{Handle, WindowHandle};
use chordwm_core::{DisplayAction, DisplayEvent, DisplayServer};
use event_translate::XEvent;

use x11_dl::xlib;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XlibWindowHandle(xlib::Window);
impl Handle for XlibWindowHandle {}

pub struct XlibDisplayServer {
    xw: XWrap,
    initial_events: Vec<DisplayEvent<XlibWindowHandle>>,
}

impl DisplayServer<XlibWindowHandle> for XlibDisplayServer {
    fn new(config: &impl Config) -> Self {
        let mut wrap = XWrap::new();

        wrap.init(config); // setup events masks

        let instance = Self {
            xw: wrap,
            initial_events: Vec::new(),
        };
        let initial_events = instance.initial_events();

        Self {
            initial_events,
            ..instance
        }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = std::mem::take(&mut self.initial_events);

        // This is where the process idles. With nothing buffered, block
        // until the server has something for us.
        if events.is_empty() && self.xw.queue_len() == 0 {
            let xlib_event = self.xw.get_next_event();
            if let Some(event) = Option::from(XEvent(&mut self.xw, xlib_event)) {
                tracing::trace!("DisplayEvent: {:?}", event);
                events.push(event);
            }
        }

        // Then drain everything else already queued.
        let events_in_queue = self.xw.queue_len();
        for _ in 0..events_in_queue {
            let xlib_event = self.xw.get_next_event();
            let event = XEvent(&mut self.xw, xlib_event).into();
            if let Some(e) = event {
                tracing::trace!("DisplayEvent: {:?}", e);
                events.push(e);
            }
        }

        for event in &events {
            if let DisplayEvent::WindowDestroy(WindowHandle(XlibWindowHandle(w)))
            | DisplayEvent::WindowUnmap(WindowHandle(XlibWindowHandle(w))) = event
            {
                self.xw.force_unmapped(*w);
            }
        }

        events
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<XlibWindowHandle>,
    ) -> Option<DisplayEvent<XlibWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        match act {
            DisplayAction::AddedWindow(client) => xw.setup_managed_window(&client),
            DisplayAction::DestroyedWindow {
                handle,
                restore_border,
            } => xw.teardown_managed_window(&handle, restore_border),
            DisplayAction::ConfigureWindow(client) => xw.update_window(&client),
            DisplayAction::WindowTakeFocus {
                window,
                previous_window,
            } => xw.window_take_focus(&window, previous_window.as_ref()),
            DisplayAction::Unfocus {
                handle,
                refocus_root,
            } => xw.unfocus(handle, refocus_root),
            DisplayAction::MoveToTop(handle) => xw.move_to_top(&handle),
            DisplayAction::CloseWindow(handle) => xw.close_window(&handle),
            DisplayAction::ForceCloseWindow(handle) => xw.force_close_window(&handle),
            DisplayAction::SetFullscreenState(handle, fullscreen) => {
                xw.set_state(handle, fullscreen, xw.atoms.NetWMStateFullscreen);
            }
            DisplayAction::SetClientList(handles) => xw.set_client_list(&handles),
            DisplayAction::ReloadKeyGrabs(grabs) => xw.reset_grabs(&grabs),
            DisplayAction::SetLeaderMode(active) => xw.set_leader_mode(active),
            DisplayAction::MoveMouseOverPoint(point) => xw.move_cursor_to_point(point),
        }
        None
    }

    fn flush(&self) {
        self.xw.flush();
    }

    fn cleanup(&mut self) {
        self.xw.teardown();
    }
}

impl XlibDisplayServer {
    /// Return a vec of events for setting up state of WM.
    fn initial_events(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut events = Vec::new();

        // The monitor topology comes first so existing windows have a
        // monitor to land on.
        let pointer = self.xw.get_cursor_point().unwrap_or_default();
        events.push(DisplayEvent::OutputsChanged {
            outputs: self.xw.get_outputs(),
            pointer,
        });

        // Tell the manager about existing windows.
        events.append(&mut self.find_all_windows());

        events
    }

    fn find_all_windows(&self) -> Vec<DisplayEvent<XlibWindowHandle>> {
        let mut all: Vec<DisplayEvent<XlibWindowHandle>> = Vec::new();
        match self.xw.get_all_windows() {
            Ok(handles) => handles.into_iter().for_each(|handle| {
                let Ok(attrs) = self.xw.get_window_attrs(handle) else {
                    return;
                };
                let Some(state) = self.xw.get_wm_state(handle) else {
                    return;
                };
                if attrs.map_state == xlib::IsViewable || state == ICONIC_STATE {
                    if let Some(event) = self.xw.setup_window(handle) {
                        all.push(event);
                    }
                }
            }),
            Err(err) => {
                tracing::error!("scanning for existing windows failed: {err}");
            }
        }
        all
    }
}
