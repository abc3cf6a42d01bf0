pub mod chord_handler;
pub mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod output_handler;
mod window_handler;

use super::command::Command;
use super::config::Config;
use super::models::{Client, Manager, WindowHandle};
use super::DisplayEvent;
