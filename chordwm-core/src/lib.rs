#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

mod chords;
mod command;
pub mod config;
mod display_action;
mod display_event;
pub mod display_servers;
pub mod errors;
mod event_loop;
pub mod models;
pub mod state;
pub mod utils;

pub mod handlers;

pub use chords::{ChordNode, ChordTree};
pub use command::Command;
pub use display_action::DisplayAction;
pub use display_event::{DisplayEvent, FullscreenChange};
pub use display_servers::DisplayServer;
pub use models::{Manager, Monitor, MonitorId, Client};
pub use state::State;
pub use utils::child_process;
pub use utils::modmask_lookup::ModMask;

/// An X11 keysym value. The core never interprets it beyond equality.
pub type XKeysym = u32;
