use crate::models::{Client, Handle, SizeHints, WindowHandle, Xyhw};
use crate::utils::modmask_lookup::ModMask;
use crate::XKeysym;

/// Requested direction for a `_NET_WM_STATE` fullscreen change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    Add,
    Remove,
    Toggle,
}

/// Events produced by the display server for the state machine to act on.
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum DisplayEvent<H: Handle> {
    /// A window asked to be mapped. The client record carries the
    /// attributes the backend already read; x,y is the pointer position.
    WindowCreate(Client<H>, i32, i32),
    /// The window was unmapped but still exists; its border gets restored.
    WindowUnmap(WindowHandle<H>),
    /// The window is gone from the server.
    WindowDestroy(WindowHandle<H>),
    /// A configure request with the fields the window asked to change.
    ConfigureRequest {
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    FullscreenRequest(WindowHandle<H>, FullscreenChange),
    /// A client (or pager) asked for this window to become active.
    WindowTakeFocus(WindowHandle<H>),
    WindowNameChanged(WindowHandle<H>, Option<String>),
    WindowSizeHintsChanged(WindowHandle<H>, SizeHints),
    WindowWmHintsChanged {
        handle: WindowHandle<H>,
        urgent: bool,
        never_focus: bool,
    },
    WindowTransientChanged(WindowHandle<H>, Option<WindowHandle<H>>),
    KeyCombo(ModMask, XKeysym),
    /// Reloads keys for when keyboard changes.
    KeyGrabReload,
    /// The output layout changed. Carries every connected output rectangle
    /// (already deduplicated) plus the pointer position.
    OutputsChanged {
        outputs: Vec<Xyhw>,
        pointer: (i32, i32),
    },
}
