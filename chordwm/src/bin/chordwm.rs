//! Starts chordwm on the default X11 display.

use chordwm_core::Manager;
use clap::Parser;
use std::env;
use std::panic;
use xlib_display_server::{XlibDisplayServer, XlibWindowHandle};

#[derive(Debug, Parser)]
#[command(author, version, about = "A chorded window manager for X11")]
struct ChordwmCli {}

fn main() {
    let _cli = ChordwmCli::parse();

    chordwm::utils::log::setup_logging();
    tracing::info!("chordwm booting...");

    set_env_vars();

    let exit_status = panic::catch_unwind(|| {
        let config = chordwm::load();
        let mut manager =
            Manager::<XlibWindowHandle, chordwm::Config, XlibDisplayServer>::new(config);
        manager.event_loop();
    });

    match exit_status {
        Ok(()) => tracing::info!("completed"),
        Err(err) => tracing::error!("completed with error: {:?}", err),
    }
}

/// Sets some relevant environment variables for chordwm
fn set_env_vars() {
    env::set_var("XDG_CURRENT_DESKTOP", "chordwm");

    // Fix for Java apps so they repaint correctly
    env::set_var("_JAVA_AWT_WM_NONREPARENTING", "1");
}
