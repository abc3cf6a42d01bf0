use std::ffi::CString;
use x11_dl::xlib;

// Specifications can be found here:
// https://specifications.freedesktop.org/wm-spec/1.3/ar01s03.html

#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub struct XAtom {
    pub WMProtocols: xlib::Atom,
    pub WMDelete: xlib::Atom,
    pub WMState: xlib::Atom,
    pub WMClass: xlib::Atom,
    pub WMTakeFocus: xlib::Atom,
    pub NetActiveWindow: xlib::Atom,
    pub NetSupported: xlib::Atom,
    pub NetWMName: xlib::Atom,
    pub NetWMState: xlib::Atom,
    pub NetWMStateFullscreen: xlib::Atom,
    pub NetWMWindowType: xlib::Atom,
    pub NetWMWindowTypeDialog: xlib::Atom,
    pub NetSupportingWmCheck: xlib::Atom,
    pub NetClientList: xlib::Atom,
    pub UTF8String: xlib::Atom,
}

impl XAtom {
    pub fn net_supported(&self) -> Vec<xlib::Atom> {
        vec![
            self.NetActiveWindow,
            self.NetSupported,
            self.NetWMName,
            self.NetWMState,
            self.NetWMStateFullscreen,
            self.NetWMWindowType,
            self.NetWMWindowTypeDialog,
            self.NetSupportingWmCheck,
            self.NetClientList,
        ]
    }

    pub const fn get_name(&self, atom: xlib::Atom) -> &str {
        match atom {
            a if a == self.WMProtocols => "WM_PROTOCOLS",
            a if a == self.WMDelete => "WM_DELETE_WINDOW",
            a if a == self.WMState => "WM_STATE",
            a if a == self.WMClass => "WM_CLASS",
            a if a == self.WMTakeFocus => "WM_TAKE_FOCUS",
            a if a == self.NetActiveWindow => "_NET_ACTIVE_WINDOW",
            a if a == self.NetSupported => "_NET_SUPPORTED",
            a if a == self.NetWMName => "_NET_WM_NAME",
            a if a == self.NetWMState => "_NET_WM_STATE",
            a if a == self.NetWMStateFullscreen => "_NET_WM_STATE_FULLSCREEN",
            a if a == self.NetWMWindowType => "_NET_WM_WINDOW_TYPE",
            a if a == self.NetWMWindowTypeDialog => "_NET_WM_WINDOW_TYPE_DIALOG",
            a if a == self.NetSupportingWmCheck => "_NET_SUPPORTING_WM_CHECK",
            a if a == self.NetClientList => "_NET_CLIENT_LIST",
            a if a == self.UTF8String => "UTF8_STRING",
            _ => "(UNKNOWN)",
        }
    }

    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        Self {
            WMProtocols: from(xlib, dpy, "WM_PROTOCOLS"),
            WMDelete: from(xlib, dpy, "WM_DELETE_WINDOW"),
            WMState: from(xlib, dpy, "WM_STATE"),
            WMClass: from(xlib, dpy, "WM_CLASS"),
            WMTakeFocus: from(xlib, dpy, "WM_TAKE_FOCUS"),
            NetActiveWindow: from(xlib, dpy, "_NET_ACTIVE_WINDOW"),
            NetSupported: from(xlib, dpy, "_NET_SUPPORTED"),
            NetWMName: from(xlib, dpy, "_NET_WM_NAME"),
            NetWMState: from(xlib, dpy, "_NET_WM_STATE"),
            NetWMStateFullscreen: from(xlib, dpy, "_NET_WM_STATE_FULLSCREEN"),
            NetWMWindowType: from(xlib, dpy, "_NET_WM_WINDOW_TYPE"),
            NetWMWindowTypeDialog: from(xlib, dpy, "_NET_WM_WINDOW_TYPE_DIALOG"),
            NetSupportingWmCheck: from(xlib, dpy, "_NET_SUPPORTING_WM_CHECK"),
            NetClientList: from(xlib, dpy, "_NET_CLIENT_LIST"),
            UTF8String: from(xlib, dpy, "UTF8_STRING"),
        }
    }
}

fn from(xlib: &xlib::Xlib, dpy: *mut xlib::Display, s: &str) -> xlib::Atom {
    unsafe {
        (xlib.XInternAtom)(
            dpy,
            CString::new(s).unwrap_or_default().into_raw(),
            xlib::False,
        )
    }
}
