//! Xlib calls related to a window.
use super::{on_error_from_xlib, on_error_from_xlib_dummy, NORMAL_STATE, WITHDRAWN_STATE};
use crate::{XWrap, XlibWindowHandle};
use chordwm_core::models::{Client, MonitorId, WindowHandle, Xyhw};
use chordwm_core::DisplayEvent;
use std::os::raw::c_long;
use x11_dl::xlib;

impl XWrap {
    /// Gathers everything about a window that asked to be mapped and builds
    /// the client record for it. Windows with override-redirect set are left
    /// alone.
    #[must_use]
    pub fn setup_window(&self, window: xlib::Window) -> Option<DisplayEvent<XlibWindowHandle>> {
        let attrs = match self.get_window_attrs(window) {
            Ok(attr) if attr.override_redirect == 0 && !self.managed_windows.contains(&window) => {
                attr
            }
            _ => return None,
        };
        let handle = WindowHandle(XlibWindowHandle(window));
        let name = self.get_window_name(window);

        let mut client = Client::new(handle, name, MonitorId(0));
        client.xyhw = Xyhw::new(attrs.x, attrs.y, attrs.width, attrs.height);
        client.prev_xyhw = client.xyhw;
        client.old_border = attrs.border_width;
        client.hints = self.get_size_hints(window);
        if let Some(trans) = self.get_transient_for(window) {
            client.transient = Some(WindowHandle(XlibWindowHandle(trans)));
        }
        if let Some(hint) = self.get_wmhints(window) {
            client.never_focus = hint.flags & xlib::InputHint != 0 && hint.input == 0;
            client.urgent = hint.flags & xlib::XUrgencyHint != 0;
        }
        client.floating = self.is_window_dialog(window);

        let cursor = self.get_cursor_point().unwrap_or_default();
        Some(DisplayEvent::WindowCreate(client, cursor.0, cursor.1))
    }

    /// Sets up a window that we have decided to manage: maps it, paints the
    /// border, subscribes to its events and publishes it on the client list.
    // `XMapWindow`: https://tronche.com/gui/x/xlib/window/XMapWindow.html
    pub fn setup_managed_window(&mut self, client: &Client<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = client.handle;
        self.subscribe_to_window_events(handle);
        self.managed_windows.push(handle);
        // Make sure the window is mapped.
        unsafe { (self.xlib.XMapWindow)(self.display, handle) };
        // Let Xlib know we are managing this window.
        let list = vec![handle as c_long];
        self.append_property_long(self.root, self.atoms.NetClientList, xlib::XA_WINDOW, &list);

        // Make sure there is at least an empty list of _NET_WM_STATE.
        let states = self.get_window_states_atoms(handle);
        self.set_window_states_atoms(handle, &states);
        // Set WM_STATE to normal state to allow window sharing.
        self.set_wm_states(handle, &[NORMAL_STATE]);

        self.set_window_border_color(handle, self.colors.normal);
        self.update_window(client);
    }

    /// Teardown a managed window. When the window still exists its original
    /// border width comes back.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XUngrabButton`: https://tronche.com/gui/x/xlib/input/XUngrabButton.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    pub fn teardown_managed_window(
        &mut self,
        h: &WindowHandle<XlibWindowHandle>,
        restore_border: Option<i32>,
    ) {
        let WindowHandle(XlibWindowHandle(handle)) = h;
        self.managed_windows.retain(|x| *x != *handle);
        let Some(border) = restore_border else {
            return;
        };
        // The window may die while we put it back; suppress the races.
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            let mut changes: xlib::XWindowChanges = std::mem::zeroed();
            changes.border_width = border;
            (self.xlib.XConfigureWindow)(
                self.display,
                *handle,
                u32::from(xlib::CWBorderWidth),
                &mut changes,
            );
            (self.xlib.XUngrabButton)(
                self.display,
                xlib::AnyButton as u32,
                xlib::AnyModifier,
                *handle,
            );
            self.set_wm_states(*handle, &[WITHDRAWN_STATE]);
            self.sync();
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    /// Moves and resizes a window to its record.
    pub fn update_window(&self, client: &Client<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = client.handle;
        let changes = xlib::XWindowChanges {
            x: client.xyhw.x(),
            y: client.xyhw.y(),
            width: client.xyhw.w(),
            height: client.xyhw.h(),
            border_width: client.border,
            sibling: 0,    // Not unlocked.
            stack_mode: 0, // Not unlocked.
        };
        let unlock = xlib::CWX | xlib::CWY | xlib::CWWidth | xlib::CWHeight | xlib::CWBorderWidth;
        self.set_window_config(handle, changes, u32::from(unlock));
        self.configure_window(client);
    }

    /// Send a `XConfigureEvent` for a window to X.
    pub fn configure_window(&self, client: &Client<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = client.handle;
        let mut configure_event: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        configure_event.type_ = xlib::ConfigureNotify;
        configure_event.display = self.display;
        configure_event.event = handle;
        configure_event.window = handle;
        configure_event.x = client.xyhw.x();
        configure_event.y = client.xyhw.y();
        configure_event.width = client.xyhw.w();
        configure_event.height = client.xyhw.h();
        configure_event.border_width = client.border;
        configure_event.above = 0;
        configure_event.override_redirect = 0;
        self.send_xevent(
            handle,
            0,
            xlib::StructureNotifyMask,
            &mut configure_event.into(),
        );
    }

    /// Makes a window take focus.
    pub fn window_take_focus(
        &mut self,
        window: &Client<XlibWindowHandle>,
        previous: Option<&WindowHandle<XlibWindowHandle>>,
    ) {
        let WindowHandle(XlibWindowHandle(handle)) = window.handle;
        // Drop the emphasis border of the previous window.
        if let Some(WindowHandle(XlibWindowHandle(previous_handle))) = previous {
            self.set_window_border_color(*previous_handle, self.colors.normal);
        }
        self.focused_window = handle;
        self.set_window_border_color(handle, self.colors.active);
        self.focus(handle, window.never_focus);
        self.sync();
    }

    /// Focuses a window.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn focus(&mut self, window: xlib::Window, never_focus: bool) {
        if !never_focus {
            unsafe {
                (self.xlib.XSetInputFocus)(
                    self.display,
                    window,
                    xlib::RevertToPointerRoot,
                    xlib::CurrentTime,
                );
                let list = vec![window as c_long];
                // Mark this window as the `_NET_ACTIVE_WINDOW`
                self.replace_property_long(
                    self.root,
                    self.atoms.NetActiveWindow,
                    xlib::XA_WINDOW,
                    &list,
                );
                std::mem::forget(list);
            }
        }
        // Tell the window to take focus
        self.send_xevent_atom(window, self.atoms.WMTakeFocus);
    }

    /// Drops the emphasis border of a window, optionally handing input focus
    /// back to the root.
    // `XSetInputFocus`: https://tronche.com/gui/x/xlib/input/XSetInputFocus.html
    pub fn unfocus(&self, handle: Option<WindowHandle<XlibWindowHandle>>, refocus_root: bool) {
        if let Some(WindowHandle(XlibWindowHandle(handle))) = handle {
            self.set_window_border_color(handle, self.colors.normal);
        }
        if refocus_root {
            unsafe {
                (self.xlib.XSetInputFocus)(
                    self.display,
                    self.root,
                    xlib::RevertToPointerRoot,
                    xlib::CurrentTime,
                );
                self.replace_property_long(
                    self.root,
                    self.atoms.NetActiveWindow,
                    xlib::XA_WINDOW,
                    &[c_long::MAX],
                );
            }
        }
    }

    /// Raise a window.
    // `XRaiseWindow`: https://tronche.com/gui/x/xlib/window/XRaiseWindow.html
    pub fn move_to_top(&self, handle: &WindowHandle<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(window)) = handle;
        unsafe {
            (self.xlib.XRaiseWindow)(self.display, *window);
        }
    }

    /// Nicely asks a window to close. Windows that do not advertise
    /// `WM_DELETE_WINDOW` are left alone; severing the connection is a
    /// separate request.
    pub fn close_window(&self, h: &WindowHandle<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = h;
        if !self.send_xevent_atom(*handle, self.atoms.WMDelete) {
            tracing::debug!(
                "close request ignored: window {} does not speak WM_DELETE_WINDOW",
                handle
            );
        }
    }

    /// Kills a window without asking.
    // `XGrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XGrabServer.html
    // `XSetCloseDownMode`: https://tronche.com/gui/x/xlib/display/XSetCloseDownMode.html
    // `XKillClient`: https://tronche.com/gui/x/xlib/window-and-session-manager/XKillClient.html
    // `XUngrabServer`: https://tronche.com/gui/x/xlib/window-and-session-manager/XUngrabServer.html
    pub fn force_close_window(&self, h: &WindowHandle<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = h;
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            (self.xlib.XSetCloseDownMode)(self.display, xlib::DestroyAll);
            (self.xlib.XKillClient)(self.display, *handle);
            self.sync();
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    /// Forcibly unmap a window.
    pub fn force_unmapped(&mut self, window: xlib::Window) {
        self.managed_windows.retain(|x| *x != window);
    }

    /// Warps the pointer to a point on the root window.
    // `XWarpPointer`: https://tronche.com/gui/x/xlib/input/XWarpPointer.html
    pub fn move_cursor_to_point(&self, point: (i32, i32)) {
        unsafe {
            (self.xlib.XWarpPointer)(self.display, 0, self.root, 0, 0, 0, 0, point.0, point.1);
        }
    }

    /// Subscribe to an event of a window.
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    pub fn subscribe_to_event(&self, window: xlib::Window, mask: c_long) {
        unsafe { (self.xlib.XSelectInput)(self.display, window, mask) };
    }

    /// Subscribe to the wanted events of a window.
    pub fn subscribe_to_window_events(&self, window: xlib::Window) {
        let mask = xlib::FocusChangeMask | xlib::PropertyChangeMask;
        self.subscribe_to_event(window, mask);
    }
}
