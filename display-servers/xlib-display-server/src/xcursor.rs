use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

#[derive(Clone, Debug)]
pub struct XCursor {
    pub normal: c_ulong,
    pub leader: c_ulong,
    pub resize: c_ulong,
    pub move_: c_ulong,
}

// Pointer defs can be found at https://tronche.com/gui/x/xlib/appendix/b/
const LEFT_PTR: c_uint = 68;
const ICON: c_uint = 64;
const SIZING: c_uint = 120;
const FLEUR: c_uint = 52;

impl XCursor {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        unsafe {
            Self {
                normal: (xlib.XCreateFontCursor)(dpy, LEFT_PTR),
                leader: (xlib.XCreateFontCursor)(dpy, ICON),
                resize: (xlib.XCreateFontCursor)(dpy, SIZING),
                move_: (xlib.XCreateFontCursor)(dpy, FLEUR),
            }
        }
    }

    pub fn all(&self) -> [c_ulong; 4] {
        [self.normal, self.leader, self.resize, self.move_]
    }
}
