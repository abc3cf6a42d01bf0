use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::Handle;
use crate::DisplayEvent;

#[cfg(test)]
mod mock_display_server;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

pub trait DisplayServer<H: Handle> {
    fn new(config: &impl Config) -> Self;

    /// Block until at least one event arrives, then return everything
    /// queued. The reactor is single threaded; blocking here is the idle
    /// state of the whole process.
    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    fn execute_action(&mut self, _act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        None
    }

    fn flush(&self) {}

    /// Release grabs, cursors and helper resources on the way out.
    fn cleanup(&mut self) {}
}
