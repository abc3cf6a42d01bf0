use serde::{Deserialize, Serialize};

/// Actions a key chord can trigger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Enter or leave leader mode. Leader mode swaps the root cursor and
    /// arms the chord prefixes bound beneath the leader key.
    ToggleLeader(bool),
    /// Run a program, detached into its own session.
    Execute(String),
    /// Warp the pointer to the bottom-right corner of the selected monitor.
    Banish,
    /// Ask the focused window to close, if it speaks WM_DELETE_WINDOW.
    CloseWindow,
    /// Sever the focused window's connection outright.
    ForceCloseWindow,
    ToggleFullScreen,
    /// Swap focus with the previously focused window.
    FocusLast,
    Quit,
}
