use crate::XlibWindowHandle;

use super::XWrap;
use chordwm_core::models::WindowHandle;
use chordwm_core::DisplayEvent;

use x11_dl::xlib;

pub fn from_event(
    xw: &XWrap,
    event: xlib::XPropertyEvent,
) -> Option<DisplayEvent<XlibWindowHandle>> {
    if event.window == xw.get_default_root()
        || event.state == xlib::PropertyDelete
        || !xw.managed_windows.contains(&event.window)
    {
        return None;
    }

    let handle = WindowHandle(XlibWindowHandle(event.window));

    match event.atom {
        xlib::XA_WM_TRANSIENT_FOR => {
            let transient = xw
                .get_transient_for(event.window)
                .map(|t| WindowHandle(XlibWindowHandle(t)));
            Some(DisplayEvent::WindowTransientChanged(handle, transient))
        }
        xlib::XA_WM_NORMAL_HINTS => Some(DisplayEvent::WindowSizeHintsChanged(
            handle,
            xw.get_size_hints(event.window),
        )),
        xlib::XA_WM_HINTS => xw.get_wmhints(event.window).map(|hints| {
            DisplayEvent::WindowWmHintsChanged {
                handle,
                urgent: hints.flags & xlib::XUrgencyHint != 0,
                never_focus: hints.flags & xlib::InputHint != 0 && hints.input == 0,
            }
        }),
        xlib::XA_WM_NAME => Some(update_title(xw, event.window)),
        _ => {
            if event.atom == xw.atoms.NetWMName {
                return Some(update_title(xw, event.window));
            }
            None
        }
    }
}

fn update_title(xw: &XWrap, window: xlib::Window) -> DisplayEvent<XlibWindowHandle> {
    let title = xw.get_window_name(window);
    let handle = WindowHandle(XlibWindowHandle(window));
    DisplayEvent::WindowNameChanged(handle, title)
}
