use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::state::State;
use crate::utils::child_process::Children;
use std::sync::{atomic::AtomicBool, Arc};

/// Owns the state machine, the backend connection and the child reaper.
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub display_server: SERVER,
}

impl<H, C, SERVER> Manager<H, C, SERVER>
where
    H: Handle,
    C: Config,
    SERVER: DisplayServer<H>,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);

        Self {
            state: State::new(&config),
            config,
            children: Children::default(),
            reap_requested: Arc::default(),
            display_server,
        }
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    pub fn new_test() -> Self {
        Self::new(crate::config::TestConfig::default())
    }
}
