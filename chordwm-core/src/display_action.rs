use crate::models::{Client, Handle, WindowHandle};
use crate::utils::modmask_lookup::ModMask;
use crate::XKeysym;
use serde::{Deserialize, Serialize};

/// These are responses from the window manager.
/// The display server should act on these actions.
#[allow(clippy::large_enum_variant)]
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum DisplayAction<H: Handle> {
    /// Get triggered after a new window is discovered and WE are
    /// managing it. Maps it, paints the border and subscribes to its
    /// events.
    #[serde(bound = "")]
    AddedWindow(Client<H>),

    /// Tell the DS we no longer care about this window and other cleanup.
    /// When the window still exists its original border width is restored.
    #[serde(bound = "")]
    DestroyedWindow {
        handle: WindowHandle<H>,
        restore_border: Option<i32>,
    },

    /// Move and resize a window to its record and send the synthetic
    /// `ConfigureNotify` clients expect.
    #[serde(bound = "")]
    ConfigureWindow(Client<H>),

    /// Tell a window that it is to become focused.
    #[serde(bound = "")]
    WindowTakeFocus {
        window: Client<H>,
        #[serde(bound = "")]
        previous_window: Option<WindowHandle<H>>,
    },

    /// Drop the emphasis border on a window. With `refocus_root` the input
    /// focus falls back to the root window too.
    #[serde(bound = "")]
    Unfocus {
        handle: Option<WindowHandle<H>>,
        refocus_root: bool,
    },

    /// Raises a given window.
    #[serde(bound = "")]
    MoveToTop(WindowHandle<H>),

    /// Nicely ask a window if it would please close at its convenience.
    /// Ignored for windows that do not advertise `WM_DELETE_WINDOW`.
    #[serde(bound = "")]
    CloseWindow(WindowHandle<H>),

    /// Sever the client's connection without asking.
    #[serde(bound = "")]
    ForceCloseWindow(WindowHandle<H>),

    /// Write the `_NET_WM_STATE` fullscreen property for a window.
    #[serde(bound = "")]
    SetFullscreenState(WindowHandle<H>, bool),

    /// Publish the full `_NET_CLIENT_LIST`, oldest first.
    #[serde(bound = "")]
    SetClientList(Vec<WindowHandle<H>>),

    /// Regrab exactly these key combinations.
    ReloadKeyGrabs(Vec<(ModMask, XKeysym)>),

    /// Swap the root cursor to show whether a chord is in flight.
    SetLeaderMode(bool),

    /// Makes sure the mouse is over a given point.
    MoveMouseOverPoint((i32, i32)),
}
