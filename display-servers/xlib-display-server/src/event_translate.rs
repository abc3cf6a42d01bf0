use crate::XlibWindowHandle;

use super::{event_translate_client_message, event_translate_property_notify, XWrap};
use crate::xwrap::{keyboard, WITHDRAWN_STATE};
use chordwm_core::models::WindowHandle;
use chordwm_core::DisplayEvent;
use x11_dl::xlib;

pub struct XEvent<'a>(pub &'a mut XWrap, pub xlib::XEvent);

impl<'a> From<XEvent<'a>> for Option<DisplayEvent<XlibWindowHandle>> {
    fn from(x_event: XEvent) -> Self {
        let raw_event = x_event.1;

        match raw_event.get_type() {
            // New window is mapped.
            xlib::MapRequest => from_map_request(x_event),
            // Window is unmapped.
            xlib::UnmapNotify => from_unmap_event(x_event),
            // Window is destroyed.
            xlib::DestroyNotify => from_destroy_notify(x_event),
            // Window client message.
            xlib::ClientMessage => from_client_message(&x_event),
            // Window property notify.
            xlib::PropertyNotify => from_property_notify(&x_event),
            // Window configure request.
            xlib::ConfigureRequest => from_configure_request(x_event),
            // A grabbed chord key was pressed.
            xlib::KeyPress => Some(from_key_press(x_event)),
            // The keyboard layout changed under us.
            xlib::MappingNotify => from_mapping_notify(x_event),
            // The root geometry changed, usually xrandr at work.
            xlib::ConfigureNotify => from_configure_notify(&x_event),
            _other => None,
        }
    }
}

fn from_map_request(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XMapRequestEvent::from(x_event.1);
    xw.setup_window(event.window)
}

fn from_unmap_event(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XUnmapEvent::from(x_event.1);
    if xw.managed_windows.contains(&event.window) {
        // Set WM_STATE to withdrawn state.
        xw.set_wm_states(event.window, &[WITHDRAWN_STATE]);
        let h = WindowHandle(XlibWindowHandle(event.window));
        return Some(DisplayEvent::WindowUnmap(h));
    }
    None
}

fn from_destroy_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XDestroyWindowEvent::from(x_event.1);
    if xw.managed_windows.contains(&event.window) {
        let h = WindowHandle(XlibWindowHandle(event.window));
        return Some(DisplayEvent::WindowDestroy(h));
    }
    None
}

fn from_client_message(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XClientMessageEvent::from(x_event.1);
    event_translate_client_message::from_event(x_event.0, event)
}

fn from_property_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let event = xlib::XPropertyEvent::from(x_event.1);
    event_translate_property_notify::from_event(x_event.0, event)
}

fn from_configure_request(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let event = xlib::XConfigureRequestEvent::from(x_event.1);
    // Windows we do not manage configure themselves.
    if !xw.managed_windows.contains(&event.window) {
        let window_changes = xlib::XWindowChanges {
            x: event.x,
            y: event.y,
            width: event.width,
            height: event.height,
            border_width: event.border_width,
            sibling: event.above,
            stack_mode: event.detail,
        };
        let unlock = xlib::CWX
            | xlib::CWY
            | xlib::CWWidth
            | xlib::CWHeight
            | xlib::CWBorderWidth
            | xlib::CWSibling
            | xlib::CWStackMode;
        xw.set_window_config(event.window, window_changes, u32::from(unlock));
        return None;
    }
    Some(DisplayEvent::ConfigureRequest {
        handle: WindowHandle(XlibWindowHandle(event.window)),
        x: event.x,
        y: event.y,
        w: event.width,
        h: event.height,
    })
}

fn from_key_press(x_event: XEvent) -> DisplayEvent<XlibWindowHandle> {
    let xw = x_event.0;
    let event = xlib::XKeyEvent::from(x_event.1);
    let keysym = xw.keycode_to_keysym(event.keycode);
    DisplayEvent::KeyCombo(keyboard::from_xlib_mask(event.state), keysym)
}

fn from_mapping_notify(x_event: XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = x_event.0;
    let mut event = xlib::XMappingEvent::from(x_event.1);
    if event.request == xlib::MappingModifier || event.request == xlib::MappingKeyboard {
        // Refresh keyboard.
        tracing::debug!("updating keyboard");
        if let Err(err) = xw.refresh_keyboard(&mut event) {
            tracing::warn!("unable to refresh keyboard: {:?}", err);
            return None;
        }
        return Some(DisplayEvent::KeyGrabReload);
    }
    None
}

fn from_configure_notify(x_event: &XEvent) -> Option<DisplayEvent<XlibWindowHandle>> {
    let xw = &x_event.0;
    let event = xlib::XConfigureEvent::from(x_event.1);
    if event.window != xw.get_default_root() {
        return None;
    }
    let pointer = xw.get_cursor_point().unwrap_or_default();
    Some(DisplayEvent::OutputsChanged {
        outputs: xw.get_outputs(),
        pointer,
    })
}
