mod client;
mod focus_manager;
mod manager;
mod monitor;
mod xyhw;

pub use client::{Client, Handle, MockHandle, SavedState, SizeHints, WindowHandle};
pub use focus_manager::FocusManager;
pub use manager::Manager;
pub use monitor::{Monitor, MonitorId};
pub use xyhw::Xyhw;
