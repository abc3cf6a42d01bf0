//! `XWrap` getters.
use super::{XlibError, MAX_PROPERTY_VALUE_LEN};
use crate::{XWrap, XlibWindowHandle};
use chordwm_core::models::{SizeHints, WindowHandle, Xyhw};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::slice;
use x11_dl::xlib;

impl XWrap {
    // Public functions.

    /// Returns the child windows of the root.
    /// # Errors
    ///
    /// Will error if the query for the root tree fails.
    // `XQueryTree`: https://tronche.com/gui/x/xlib/window-information/XQueryTree.html
    pub fn get_all_windows(&self) -> Result<Vec<xlib::Window>, String> {
        unsafe {
            let mut root_return: xlib::Window = std::mem::zeroed();
            let mut parent_return: xlib::Window = std::mem::zeroed();
            let mut array: *mut xlib::Window = std::mem::zeroed();
            let mut length: c_uint = std::mem::zeroed();
            let status: xlib::Status = (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut root_return,
                &mut parent_return,
                &mut array,
                &mut length,
            );
            if status == 0 {
                return Err("Unable to obtain the root windows".to_string());
            }
            let windows: &[xlib::Window] = slice::from_raw_parts(array, length as usize);
            let windows = windows.to_vec();
            (self.xlib.XFree)(array.cast());
            Ok(windows)
        }
    }

    /// Returns a `XColor` pixel for a color.
    // `XDefaultScreen`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultScreen
    // `XDefaultColormap`: https://tronche.com/gui/x/xlib/display/display-macros.html#DefaultColormap
    // `XAllocNamedColor`: https://tronche.com/gui/x/xlib/color/XAllocNamedColor.html
    #[must_use]
    pub fn get_color(&self, color: &str) -> c_ulong {
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let cmap: xlib::Colormap = (self.xlib.XDefaultColormap)(self.display, screen);
            let color_cstr = CString::new(color).unwrap_or_default().into_raw();
            let mut color: xlib::XColor = std::mem::zeroed();
            (self.xlib.XAllocNamedColor)(self.display, cmap, color_cstr, &mut color, &mut color);
            color.pixel
        }
    }

    /// Returns the current position of the cursor.
    /// # Errors
    ///
    /// Will error if the pointer is on another screen.
    // `XQueryPointer`: https://tronche.com/gui/x/xlib/window-information/XQueryPointer.html
    pub fn get_cursor_point(&self) -> Result<(i32, i32), XlibError> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let mut root_x_return: c_int = 0;
        let mut root_y_return: c_int = 0;
        let mut win_x_return: c_int = 0;
        let mut win_y_return: c_int = 0;
        let mut mask_return: c_uint = 0;
        let success = unsafe {
            (self.xlib.XQueryPointer)(
                self.display,
                self.root,
                &mut root_return,
                &mut child_return,
                &mut root_x_return,
                &mut root_y_return,
                &mut win_x_return,
                &mut win_y_return,
                &mut mask_return,
            )
        };
        if success > 0 {
            return Ok((root_x_return, root_y_return));
        }
        Err(XlibError::RootWindowNotFound)
    }

    /// Returns the handle of the default root.
    #[must_use]
    pub const fn get_default_root_handle(&self) -> WindowHandle<XlibWindowHandle> {
        WindowHandle(XlibWindowHandle(self.root))
    }

    /// Returns the default root.
    #[must_use]
    pub const fn get_default_root(&self) -> xlib::Window {
        self.root
    }

    /// Returns the `WM_NORMAL_HINTS` of a window, normalized the way the
    /// size-hint policy expects them. A zero field means the client did not
    /// set it.
    // `XGetWMNormalHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMNormalHints.html
    #[must_use]
    pub fn get_size_hints(&self, window: xlib::Window) -> SizeHints {
        let mut hints = SizeHints::default();
        let Some(size) = self.get_hint_sizing(window) else {
            return hints;
        };

        if (size.flags & xlib::PBaseSize) != 0 {
            hints.base_w = size.base_width as i32;
            hints.base_h = size.base_height as i32;
        } else if (size.flags & xlib::PMinSize) != 0 {
            hints.base_w = size.min_width as i32;
            hints.base_h = size.min_height as i32;
        }
        if (size.flags & xlib::PResizeInc) != 0 {
            hints.inc_w = size.width_inc as i32;
            hints.inc_h = size.height_inc as i32;
        }
        if (size.flags & xlib::PMaxSize) != 0 {
            hints.max_w = size.max_width as i32;
            hints.max_h = size.max_height as i32;
        }
        if (size.flags & xlib::PMinSize) != 0 {
            hints.min_w = size.min_width as i32;
            hints.min_h = size.min_height as i32;
        } else if (size.flags & xlib::PBaseSize) != 0 {
            hints.min_w = size.base_width as i32;
            hints.min_h = size.base_height as i32;
        }
        if (size.flags & xlib::PAspect) != 0 && size.min_aspect.x != 0 && size.max_aspect.y != 0 {
            hints.min_aspect = size.min_aspect.y as f32 / size.min_aspect.x as f32;
            hints.max_aspect = size.max_aspect.x as f32 / size.max_aspect.y as f32;
        }
        hints
    }

    /// Returns the raw `WM_SIZE_HINTS` of a window.
    fn get_hint_sizing(&self, window: xlib::Window) -> Option<xlib::XSizeHints> {
        let mut xsize: xlib::XSizeHints = unsafe { std::mem::zeroed() };
        let mut msize: c_long = xlib::PSize;
        let status =
            unsafe { (self.xlib.XGetWMNormalHints)(self.display, window, &mut xsize, &mut msize) };
        match status {
            0 => None,
            _ => Some(xsize),
        }
    }

    /// Returns the next `Xevent` of the xserver, blocking until one arrives.
    // `XNextEvent`: https://tronche.com/gui/x/xlib/event-handling/manipulating-event-queue/XNextEvent.html
    #[must_use]
    pub fn get_next_event(&self) -> xlib::XEvent {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            (self.xlib.XNextEvent)(self.display, &mut event);
            event
        }
    }

    /// Returns a windows name, preferring `_NET_WM_NAME` over the legacy
    /// `WM_NAME`.
    #[must_use]
    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        if let Ok(text) = self.get_text_prop(window, self.atoms.NetWMName) {
            return Some(text);
        }
        self.get_text_prop(window, xlib::XA_WM_NAME).ok()
    }

    /// Returns a text property for a window.
    /// # Errors
    ///
    /// Will error if the property is not set or is not a valid string.
    // `XGetTextProperty`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTextProperty.html
    pub fn get_text_prop(
        &self,
        window: xlib::Window,
        atom: xlib::Atom,
    ) -> Result<String, XlibError> {
        unsafe {
            let mut text_prop: xlib::XTextProperty = std::mem::zeroed();
            let status: c_int =
                (self.xlib.XGetTextProperty)(self.display, window, &mut text_prop, atom);
            if status == 0 || text_prop.value.is_null() {
                return Err(XlibError::FailedStatus);
            }
            let text = CStr::from_ptr(text_prop.value.cast::<c_char>())
                .to_string_lossy()
                .into_owned();
            (self.xlib.XFree)(text_prop.value.cast());
            Ok(text)
        }
    }

    /// Returns the transient parent of a window.
    // `XGetTransientForHint`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetTransientForHint.html
    #[must_use]
    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        unsafe {
            let mut transient: xlib::Window = std::mem::zeroed();
            let status: c_int =
                (self.xlib.XGetTransientForHint)(self.display, window, &mut transient);
            if status > 0 {
                Some(transient)
            } else {
                None
            }
        }
    }

    /// Returns the attributes of a window.
    /// # Errors
    ///
    /// Will error if window status is 0 (no attributes).
    // `XGetWindowAttributes`: https://tronche.com/gui/x/xlib/window-information/XGetWindowAttributes.html
    pub fn get_window_attrs(
        &self,
        window: xlib::Window,
    ) -> Result<xlib::XWindowAttributes, XlibError> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(attrs)
    }

    /// Returns the `WM_HINTS` of a window.
    // `XGetWMHints`: https://tronche.com/gui/x/xlib/ICC/client-to-window-manager/XGetWMHints.html
    #[must_use]
    pub fn get_wmhints(&self, window: xlib::Window) -> Option<xlib::XWMHints> {
        unsafe {
            let hints_ptr: *const xlib::XWMHints = (self.xlib.XGetWMHints)(self.display, window);
            if hints_ptr.is_null() {
                return None;
            }
            let hints: xlib::XWMHints = *hints_ptr;
            (self.xlib.XFree)(hints_ptr.cast_mut().cast());
            Some(hints)
        }
    }

    /// Returns the `WM_STATE` of a window.
    #[must_use]
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<c_long> {
        let (prop_return, nitems_return) =
            self.get_property(window, self.atoms.WMState, self.atoms.WMState)?;
        if nitems_return == 0 {
            return None;
        }
        #[allow(clippy::cast_ptr_alignment)]
        let state = unsafe {
            let state = *prop_return.cast::<c_long>();
            (self.xlib.XFree)(prop_return.cast_mut().cast());
            state
        };
        Some(state)
    }

    /// Returns the states (atoms) of a window.
    #[must_use]
    pub fn get_window_states_atoms(&self, window: xlib::Window) -> Vec<xlib::Atom> {
        self.get_atom_list(window, self.atoms.NetWMState)
    }

    /// Returns whether the window declares the dialog type.
    #[must_use]
    pub fn is_window_dialog(&self, window: xlib::Window) -> bool {
        self.get_atom_list(window, self.atoms.NetWMWindowType)
            .contains(&self.atoms.NetWMWindowTypeDialog)
    }

    /// Returns the rectangles of all connected outputs, duplicates removed
    /// so mirrored outputs count once. Falls back on Xinerama, then on the
    /// root window geometry.
    /// # Panics
    ///
    /// Panics if xorg cannot be contacted (xlib missing, not started, etc.)
    #[must_use]
    pub fn get_outputs(&self) -> Vec<Xyhw> {
        use x11_dl::xinerama::XineramaScreenInfo;
        use x11_dl::xinerama::Xlib;
        use x11_dl::xrandr::Xrandr;
        let xlib = Xlib::open().expect("Couldn't not connect to Xorg Server");

        let mut outputs: Vec<Xyhw> = Vec::new();
        if let Ok(xrandr) = Xrandr::open() {
            unsafe {
                let screen_resources = (xrandr.XRRGetScreenResources)(self.display, self.root);
                let raw_outputs = slice::from_raw_parts(
                    (*screen_resources).outputs,
                    (*screen_resources).noutput as usize,
                );
                outputs = raw_outputs
                    .iter()
                    .map(|output| {
                        (xrandr.XRRGetOutputInfo)(self.display, screen_resources, *output)
                    })
                    .filter(|&output_info| (*output_info).crtc != 0)
                    .map(|output_info| {
                        let crtc_info = (xrandr.XRRGetCrtcInfo)(
                            self.display,
                            screen_resources,
                            (*output_info).crtc,
                        );
                        Xyhw::new(
                            (*crtc_info).x,
                            (*crtc_info).y,
                            (*crtc_info).width as i32,
                            (*crtc_info).height as i32,
                        )
                    })
                    .collect();
            }
        } else if unsafe { (xlib.XineramaIsActive)(self.display) } > 0 {
            let mut screen_count = 0;
            let info_array_raw =
                unsafe { (xlib.XineramaQueryScreens)(self.display, &mut screen_count) };
            let xinerama_infos: &[XineramaScreenInfo] =
                unsafe { slice::from_raw_parts(info_array_raw, screen_count as usize) };
            outputs = xinerama_infos
                .iter()
                .map(|i| {
                    Xyhw::new(
                        i32::from(i.x_org),
                        i32::from(i.y_org),
                        i32::from(i.width),
                        i32::from(i.height),
                    )
                })
                .collect();
        }

        if outputs.is_empty() {
            if let Ok(attrs) = self.get_window_attrs(self.root) {
                outputs.push(Xyhw::new(attrs.x, attrs.y, attrs.width, attrs.height));
            }
        }

        // Mirrored outputs share a rectangle and count once.
        let mut unique: Vec<Xyhw> = Vec::with_capacity(outputs.len());
        for rect in outputs {
            if !unique.contains(&rect) {
                unique.push(rect);
            }
        }
        unique
    }

    // Private functions.

    /// Returns a generic window property as raw bytes.
    // `XGetWindowProperty`: https://tronche.com/gui/x/xlib/window-information/XGetWindowProperty.html
    fn get_property(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Option<(*const c_uchar, c_ulong)> {
        let mut format_return: i32 = 0;
        let mut nitems_return: c_ulong = 0;
        let mut type_return: xlib::Atom = 0;
        let mut bytes_remaining: c_ulong = 0;
        unsafe {
            let mut prop_return: *mut c_uchar = std::mem::zeroed();
            let status = (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut type_return,
                &mut format_return,
                &mut nitems_return,
                &mut bytes_remaining,
                &mut prop_return,
            );
            if status == i32::from(xlib::Success) && !prop_return.is_null() {
                return Some((prop_return, nitems_return));
            }
        };
        None
    }

    /// Returns an atom-list property of a window.
    fn get_atom_list(&self, window: xlib::Window, property: xlib::Atom) -> Vec<xlib::Atom> {
        let Some((prop_return, nitems_return)) =
            self.get_property(window, property, xlib::XA_ATOM)
        else {
            return Vec::new();
        };
        #[allow(clippy::cast_ptr_alignment)]
        unsafe {
            let atoms =
                slice::from_raw_parts(prop_return.cast::<xlib::Atom>(), nitems_return as usize)
                    .to_vec();
            (self.xlib.XFree)(prop_return.cast_mut().cast());
            atoms
        }
    }
}
