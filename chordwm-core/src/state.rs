//! All mutable window manager state, owned by the [`Manager`].
//!
//! [`Manager`]: crate::models::Manager

use crate::chords::ChordTree;
use crate::config::Config;
use crate::models::{Client, FocusManager, Handle, Monitor, MonitorId, WindowHandle, Xyhw};
use crate::DisplayAction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Serialize, Deserialize, Debug)]
pub struct State<H: Handle> {
    #[serde(bound = "")]
    pub monitors: Vec<Monitor<H>>,
    pub selected_monitor: MonitorId,
    #[serde(bound = "")]
    pub focus_manager: FocusManager<H>,
    pub chords: ChordTree,
    /// Handles in manage order, oldest first. Mirrored to
    /// `_NET_CLIENT_LIST` on every change.
    #[serde(bound = "")]
    pub client_list: Vec<WindowHandle<H>>,
    #[serde(skip)]
    pub actions: VecDeque<DisplayAction<H>>,
    pub border_width: i32,
    /// Bounding box of the whole display, all outputs together.
    pub display_size: Xyhw,
    pub leader_active: bool,
    pub running: bool,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            monitors: Vec::new(),
            selected_monitor: MonitorId(0),
            focus_manager: FocusManager::default(),
            chords: ChordTree::new(config.chord_tree()),
            client_list: Vec::new(),
            actions: VecDeque::new(),
            border_width: config.border_width(),
            display_size: Xyhw::default(),
            leader_active: false,
            running: true,
        }
    }

    #[must_use]
    pub fn monitor(&self, id: MonitorId) -> Option<&Monitor<H>> {
        self.monitors.iter().find(|m| m.id == id)
    }

    pub fn monitor_mut(&mut self, id: MonitorId) -> Option<&mut Monitor<H>> {
        self.monitors.iter_mut().find(|m| m.id == id)
    }

    #[must_use]
    pub fn selected_monitor(&self) -> Option<&Monitor<H>> {
        self.monitor(self.selected_monitor)
    }

    pub fn selected_monitor_mut(&mut self) -> Option<&mut Monitor<H>> {
        let id = self.selected_monitor;
        self.monitor_mut(id)
    }

    #[must_use]
    pub fn client(&self, handle: &WindowHandle<H>) -> Option<&Client<H>> {
        self.monitors.iter().find_map(|m| m.client(handle))
    }

    pub fn client_mut(&mut self, handle: &WindowHandle<H>) -> Option<&mut Client<H>> {
        self.monitors.iter_mut().find_map(|m| m.client_mut(handle))
    }

    /// Count of managed clients across every monitor.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.monitors.iter().map(|m| m.clients.len()).sum()
    }

    /// Queue a rewrite of `_NET_CLIENT_LIST` from the manage-order list.
    pub fn update_client_list(&mut self) {
        let act = DisplayAction::SetClientList(self.client_list.clone());
        self.actions.push_back(act);
    }

    /// Queue a regrab of exactly the chords reachable from the cursor.
    pub fn reload_key_grabs(&mut self) {
        let act = DisplayAction::ReloadKeyGrabs(self.chords.grabs());
        self.actions.push_back(act);
    }

    pub(crate) fn set_leader_mode(&mut self, active: bool) {
        if self.leader_active != active {
            self.leader_active = active;
            self.actions.push_back(DisplayAction::SetLeaderMode(active));
        }
    }
}
