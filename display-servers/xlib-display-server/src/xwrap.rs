//! A wrapper around calls to xlib and X related functions.
// We allow this so that extern "C" functions are not flagged as confusing. The current placement
// allows for easy reading.
#![allow(clippy::items_after_statements)]
use super::xatom::XAtom;
use super::xcursor::XCursor;
use chordwm_core::config::Config;
use std::ffi::CString;
use std::os::raw::{c_int, c_long, c_ulong};
use std::{ptr, slice};

use x11_dl::xlib;

mod getters;
pub(crate) mod keyboard;
mod setters;
mod window;

type WindowStateConst = c_long;
pub const WITHDRAWN_STATE: WindowStateConst = 0;
pub const NORMAL_STATE: WindowStateConst = 1;
pub const ICONIC_STATE: WindowStateConst = 2;
const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::StructureNotifyMask
    | xlib::KeyPressMask;

const X_CONFIGUREWINDOW: u8 = 12;
const X_GRABBUTTON: u8 = 28;
const X_GRABKEY: u8 = 33;
const X_SETINPUTFOCUS: u8 = 42;
const X_COPYAREA: u8 = 62;
const X_POLYSEGMENT: u8 = 66;
const X_POLYFILLRECTANGLE: u8 = 70;
const X_POLYTEXT8: u8 = 74;

// This is allowed for now as const extern fns
// are not yet stable (1.56.0, 16 Sept 2021)
// see issue #64926 <https://github.com/rust-lang/rust/issues/64926> for more information.
#[allow(clippy::missing_const_for_fn)]
pub extern "C" fn on_error_from_xlib(_: *mut xlib::Display, er: *mut xlib::XErrorEvent) -> c_int {
    let err = unsafe { *er };
    let ec = err.error_code;
    let rc = err.request_code;
    let ba = ec == xlib::BadAccess;
    let bd = ec == xlib::BadDrawable;
    let bm = ec == xlib::BadMatch;

    // Windows die at their own pace; requests racing a teardown are expected
    // and harmless.
    if ec == xlib::BadWindow
        || (rc == X_CONFIGUREWINDOW && bm)
        || (rc == X_GRABBUTTON && ba)
        || (rc == X_GRABKEY && ba)
        || (rc == X_SETINPUTFOCUS && bm)
        || (rc == X_COPYAREA && bd)
        || (rc == X_POLYSEGMENT && bd)
        || (rc == X_POLYFILLRECTANGLE && bd)
        || (rc == X_POLYTEXT8 && bd)
    {
        return 0;
    }
    tracing::error!(
        "unexpected xlib error: request_code={} error_code={}",
        rc,
        ec
    );
    1
}

pub extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    1
}

pub struct Colors {
    normal: c_ulong,
    active: c_ulong,
}

#[derive(Debug, Clone)]
pub enum XlibError {
    FailedStatus,
    RootWindowNotFound,
}

/// Contains Xserver information and origins.
pub struct XWrap {
    xlib: xlib::Xlib,
    display: *mut xlib::Display,
    root: xlib::Window,
    check_window: xlib::Window,
    pub atoms: XAtom,
    cursors: XCursor,
    colors: Colors,
    pub managed_windows: Vec<xlib::Window>,
    pub focused_window: xlib::Window,
}

impl Default for XWrap {
    fn default() -> Self {
        Self::new()
    }
}

impl XWrap {
    /// # Panics
    ///
    /// Panics if unable to contact xorg.
    // `XOpenDisplay`: https://tronche.com/gui/x/xlib/display/opening.html
    // `XDefaultRootWindow`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultRootWindow
    // `XSetErrorHandler`: https://tronche.com/gui/x/xlib/event-handling/protocol-errors/XSetErrorHandler.html
    // `XSelectInput`: https://tronche.com/gui/x/xlib/event-handling/XSelectInput.html
    #[must_use]
    pub fn new() -> Self {
        let xlib = xlib::Xlib::open().expect("Couldn't not connect to Xorg Server");
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        assert!(!display.is_null(), "Null pointer in display");

        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);
        let root = unsafe { (xlib.XDefaultRootWindow)(display) };

        let colors = Colors {
            normal: 0,
            active: 0,
        };

        let xw = Self {
            xlib,
            display,
            root,
            check_window: 0,
            atoms,
            cursors,
            colors,
            managed_windows: vec![],
            focused_window: root,
        };

        // Check that another WM is not running.
        extern "C" fn startup_check_for_other_wm(
            _: *mut xlib::Display,
            _: *mut xlib::XErrorEvent,
        ) -> c_int {
            eprintln!("ERROR: another window manager is already running");
            ::std::process::exit(-1);
        }
        unsafe {
            (xw.xlib.XSetErrorHandler)(Some(startup_check_for_other_wm));
            (xw.xlib.XSelectInput)(xw.display, root, xlib::SubstructureRedirectMask);
        };
        xw.sync();

        unsafe { (xw.xlib.XSetErrorHandler)(Some(on_error_from_xlib)) };
        xw.sync();
        xw
    }

    /// Initialize the xwrapper.
    // `XChangeWindowAttributes`: https://tronche.com/gui/x/xlib/window/XChangeWindowAttributes.html
    // `XCreateSimpleWindow`: https://tronche.com/gui/x/xlib/window/XCreateWindow.html
    // `XDeleteProperty`: https://tronche.com/gui/x/xlib/window-information/XDeleteProperty.html
    pub fn init(&mut self, config: &impl Config) {
        let root = self.root;
        self.load_colors(config);

        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.cursor = self.cursors.normal;
        attrs.event_mask = ROOT_EVENT_MASK;

        unsafe {
            (self.xlib.XChangeWindowAttributes)(
                self.display,
                self.root,
                xlib::CWEventMask | xlib::CWCursor,
                &mut attrs,
            );
        }

        self.subscribe_to_event(root, ROOT_EVENT_MASK);

        // EWMH compliance.
        unsafe {
            let supported: Vec<c_long> = self
                .atoms
                .net_supported()
                .iter()
                .map(|&atom| atom as c_long)
                .collect();
            self.replace_property_long(root, self.atoms.NetSupported, xlib::XA_ATOM, &supported);
            std::mem::forget(supported);
            // Cleanup the client list.
            (self.xlib.XDeleteProperty)(self.display, root, self.atoms.NetClientList);
        }

        // A 1x1 helper window backs `_NET_SUPPORTING_WM_CHECK` so pagers can
        // tell a compliant manager is alive.
        self.check_window =
            unsafe { (self.xlib.XCreateSimpleWindow)(self.display, root, 0, 0, 1, 1, 0, 0, 0) };
        let check = vec![self.check_window as c_long];
        self.replace_property_long(
            self.check_window,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &check,
        );
        self.replace_property_long(
            root,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &check,
        );
        self.set_wm_name(self.check_window, "chordwm");
        self.set_wm_name(root, "chordwm");

        self.sync();
    }

    /// Swap the root cursor to show whether a chord is in flight.
    // `XDefineCursor`: https://tronche.com/gui/x/xlib/window/XDefineCursor.html
    pub fn set_leader_mode(&self, active: bool) {
        let cursor = if active {
            self.cursors.leader
        } else {
            self.cursors.normal
        };
        unsafe { (self.xlib.XDefineCursor)(self.display, self.root, cursor) };
        self.flush();
    }

    /// Release everything we hold on the server on the way out.
    // `XUngrabKey`: https://tronche.com/gui/x/xlib/input/XUngrabKey.html
    // `XFreeCursor`: https://tronche.com/gui/x/xlib/pixmap-and-cursor/XFreeCursor.html
    // `XDestroyWindow`: https://tronche.com/gui/x/xlib/window/XDestroyWindow.html
    pub fn teardown(&mut self) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
            (self.xlib.XDestroyWindow)(self.display, self.check_window);
            (self.xlib.XUndefineCursor)(self.display, self.root);
            for cursor in self.cursors.all() {
                (self.xlib.XFreeCursor)(self.display, cursor);
            }
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList);
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
            (self.xlib.XSetInputFocus)(
                self.display,
                xlib::PointerRoot as xlib::Window,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
        }
        self.sync();
    }

    /// Send a xevent atom for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    fn send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        if self.can_send_xevent_atom(window, atom) {
            let mut msg: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
            msg.type_ = xlib::ClientMessage;
            msg.window = window;
            msg.message_type = self.atoms.WMProtocols;
            msg.format = 32;
            msg.data.set_long(0, atom as c_long);
            msg.data.set_long(1, xlib::CurrentTime as c_long);
            let mut ev: xlib::XEvent = msg.into();
            self.send_xevent(window, 0, xlib::NoEventMask, &mut ev);
            return true;
        }
        false
    }

    /// Send a xevent for a window to X.
    // `XSendEvent`: https://tronche.com/gui/x/xlib/event-handling/XSendEvent.html
    pub fn send_xevent(
        &self,
        window: xlib::Window,
        propogate: i32,
        mask: c_long,
        event: &mut xlib::XEvent,
    ) {
        unsafe { (self.xlib.XSendEvent)(self.display, window, propogate, mask, event) };
        self.sync();
    }

    /// Returns whether a window can recieve a xevent atom.
    // `XGetWMProtocols`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMProtocols.html
    fn can_send_xevent_atom(&self, window: xlib::Window, atom: xlib::Atom) -> bool {
        unsafe {
            let mut array: *mut xlib::Atom = std::mem::zeroed();
            let mut length: c_int = std::mem::zeroed();
            let status: xlib::Status =
                (self.xlib.XGetWMProtocols)(self.display, window, &mut array, &mut length);
            let protocols: &[xlib::Atom] = slice::from_raw_parts(array, length as usize);
            status > 0 && protocols.contains(&atom)
        }
    }

    /// Load the border colors of our theme.
    pub fn load_colors(&mut self, config: &impl Config) {
        self.colors = Colors {
            normal: self.get_color(config.default_border_color()),
            active: self.get_color(config.focused_border_color()),
        };
    }

    /// Sets the `_NET_WM_NAME` of a window.
    // `XChangeProperty`: https://tronche.com/gui/x/xlib/window-information/XChangeProperty.html
    fn set_wm_name(&self, window: xlib::Window, name: &str) {
        if let Ok(cstring) = CString::new(name) {
            unsafe {
                (self.xlib.XChangeProperty)(
                    self.display,
                    window,
                    self.atoms.NetWMName,
                    self.atoms.UTF8String,
                    8,
                    xlib::PropModeReplace,
                    cstring.as_ptr().cast::<u8>(),
                    name.len() as i32,
                );
                std::mem::forget(cstring);
            }
        }
    }

    /// Flush and sync the xserver.
    // `XSync`: https://tronche.com/gui/x/xlib/event-handling/XSync.html
    pub fn sync(&self) {
        unsafe { (self.xlib.XSync)(self.display, xlib::False) };
    }

    /// Flush the xserver.
    // `XFlush`: https://tronche.com/gui/x/xlib/event-handling/XFlush.html
    pub fn flush(&self) {
        unsafe { (self.xlib.XFlush)(self.display) };
    }

    /// Returns how many events are waiting.
    // `XPending`: https://tronche.com/gui/x/xlib/event-handling/XPending.html
    #[must_use]
    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }
}
