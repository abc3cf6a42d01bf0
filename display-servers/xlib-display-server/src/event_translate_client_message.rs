use crate::XlibWindowHandle;

use super::XWrap;
use chordwm_core::models::WindowHandle;
use chordwm_core::{DisplayEvent, FullscreenChange};
use std::os::raw::c_long;

use x11_dl::xlib;

pub fn from_event(
    xw: &XWrap,
    event: xlib::XClientMessageEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if !xw.managed_windows.contains(&event.window) && event.window != xw.get_default_root() {
        return None;
    }
    let atom_name = xw.atoms.get_name(event.message_type);
    tracing::trace!("ClientMessage: {} : {:?}", event.window, atom_name);

    // A client or pager asks for this window to become active.
    if event.message_type == xw.atoms.NetActiveWindow {
        let h = WindowHandle(XlibWindowHandle(event.window));
        return Some(DisplayEvent::WindowTakeFocus(h));
    }

    // _NET_WM_STATE: 0 = remove, 1 = add, 2 = toggle.
    if event.message_type == xw.atoms.NetWMState
        && (event.data.get_long(1) == xw.atoms.NetWMStateFullscreen as c_long
            || event.data.get_long(2) == xw.atoms.NetWMStateFullscreen as c_long)
    {
        let change = match event.data.get_long(0) {
            1 => FullscreenChange::Add,
            2 => FullscreenChange::Toggle,
            _ => FullscreenChange::Remove,
        };
        let h = WindowHandle(XlibWindowHandle(event.window));
        return Some(DisplayEvent::FullscreenRequest(h, change));
    }

    None
}
