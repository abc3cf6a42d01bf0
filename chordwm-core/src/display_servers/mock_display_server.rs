use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::models::Handle;

#[derive(Clone, Default)]
pub struct MockDisplayServer<H: Handle> {
    /// Everything the state machine asked for, in order.
    pub executed: Vec<DisplayAction<H>>,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self { executed: vec![] }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        vec![]
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.executed.push(act);
        None
    }
}
