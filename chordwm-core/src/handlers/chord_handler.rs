use crate::command::Command;
use crate::models::Handle;
use crate::state::State;
use crate::utils::modmask_lookup::ModMask;
use crate::XKeysym;

impl<H: Handle> State<H> {
    /// Advance the chord walk with a grabbed key press and hand back the
    /// command to run, if the press fired one.
    ///
    /// Any dead end, whether a leaf fired or nothing matched, drops leader
    /// mode. The server is always told to regrab, so only the keys that
    /// mean something from the new cursor position stay grabbed.
    pub fn key_combo_handler(&mut self, modifier: &ModMask, key: XKeysym) -> Option<Command> {
        let outcome = self.chords.step(modifier, key);
        if outcome.reset {
            self.set_leader_mode(false);
        }
        self.reload_key_grabs();
        outcome.command
    }
}

#[cfg(test)]
mod tests {
    use crate::chords::ChordNode;
    use crate::config::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Manager, MockHandle};
    use crate::utils::modmask_lookup::ModMask;
    use crate::{Command, DisplayAction};

    const KEY_T: u32 = 0x74;
    const KEY_P: u32 = 0x70;
    const KEY_G: u32 = 0x67;

    fn leader_manager() -> Manager<MockHandle, TestConfig, MockDisplayServer<MockHandle>> {
        let run = ChordNode::new(
            ModMask::Zero,
            KEY_P,
            Some(Command::Execute("dmenu_run".into())),
            vec![],
        );
        let off = ChordNode::new(
            ModMask::Control,
            KEY_G,
            Some(Command::ToggleLeader(false)),
            vec![],
        );
        let leader = ChordNode::new(
            ModMask::Control,
            KEY_T,
            Some(Command::ToggleLeader(true)),
            vec![run, off],
        );
        Manager::new(TestConfig {
            chords: vec![leader],
        })
    }

    #[test]
    fn a_completed_chord_fires_once_and_rearms_the_root() {
        let mut manager = leader_manager();
        let first = manager
            .state
            .key_combo_handler(&ModMask::Control, KEY_T);
        assert_eq!(first, Some(Command::ToggleLeader(true)));

        let second = manager.state.key_combo_handler(&ModMask::Zero, KEY_P);
        assert_eq!(second, Some(Command::Execute("dmenu_run".into())));
        assert!(manager.state.chords.at_root());

        // Pressing the leaf again from the root does nothing.
        let third = manager.state.key_combo_handler(&ModMask::Zero, KEY_P);
        assert_eq!(third, None);
    }

    #[test]
    fn a_dead_end_exits_leader_mode() {
        let mut manager = leader_manager();
        manager.state.key_combo_handler(&ModMask::Control, KEY_T);
        manager.state.set_leader_mode(true);
        manager.state.actions.clear();

        let fired = manager.state.key_combo_handler(&ModMask::Zero, 0xFF);
        assert_eq!(fired, None);
        assert!(manager.state.chords.at_root());
        assert!(!manager.state.leader_active);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|act| matches!(act, DisplayAction::SetLeaderMode(false))));
    }

    #[test]
    fn every_dispatch_requests_a_regrab_for_the_cursor() {
        let mut manager = leader_manager();
        manager.state.actions.clear();
        manager.state.key_combo_handler(&ModMask::Control, KEY_T);
        let grabs: Vec<_> = manager
            .state
            .actions
            .iter()
            .filter_map(|act| match act {
                DisplayAction::ReloadKeyGrabs(g) => Some(g.len()),
                _ => None,
            })
            .collect();
        // Two chords are reachable under the leader.
        assert_eq!(grabs, vec![2]);
    }
}
