use crate::display_action::DisplayAction;
use crate::models::{Handle, Monitor, MonitorId, Xyhw};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Rebuild the monitor registry from the outputs the server reports.
    ///
    /// Monitors are matched to outputs by position in the list: survivors
    /// are resized in place, extra outputs grow new monitors, and the
    /// clients of vanished monitors migrate to the first one. An empty
    /// report falls back to a single monitor covering the display.
    /// Returns true when anything changed.
    pub fn reconcile_outputs(&mut self, outputs: &[Xyhw], pointer: (i32, i32)) -> bool {
        let mut unique: Vec<Xyhw> = Vec::with_capacity(outputs.len());
        for rect in outputs {
            // Mirrored outputs report identical rectangles; one is enough.
            if !unique.contains(rect) {
                unique.push(*rect);
            }
        }
        if unique.is_empty() {
            unique.push(self.display_size);
        }

        let mut changed = false;
        for (index, rect) in unique.iter().enumerate() {
            match self.monitors.get_mut(index) {
                Some(monitor) if monitor.rect == *rect => {}
                Some(monitor) => {
                    monitor.resize(*rect);
                    changed = true;
                }
                None => {
                    let id = self.next_monitor_id();
                    tracing::info!("output connected: {:?} at {:?}", id, rect);
                    self.monitors.push(Monitor::new(id, *rect));
                    changed = true;
                }
            }
        }

        while self.monitors.len() > unique.len() {
            let dead = match self.monitors.pop() {
                Some(monitor) => monitor,
                None => break,
            };
            tracing::info!("output disconnected: {:?}", dead.id);
            self.adopt_clients(dead);
            changed = true;
        }

        if changed {
            self.reselect_monitor(pointer);
            self.display_size = union_of(&unique);
        }
        changed
    }

    fn next_monitor_id(&self) -> MonitorId {
        let mut candidate = 0;
        while self.monitors.iter().any(|m| m.id == MonitorId(candidate)) {
            candidate += 1;
        }
        MonitorId(candidate)
    }

    /// Move every client of a dead monitor onto the first remaining one,
    /// clamping their geometry into the new usable area.
    fn adopt_clients(&mut self, dead: Monitor<H>) {
        let Some(target) = self.monitors.first().map(|m| m.id) else {
            return;
        };
        if self.selected_monitor == dead.id {
            self.selected_monitor = target;
        }
        let (work, display) = match self.monitor(target) {
            Some(m) => (m.work, self.display_size),
            None => return,
        };
        for mut client in dead.clients {
            client.monitor = target;
            let (mut x, mut y, mut w, mut h) = (
                client.xyhw.x(),
                client.xyhw.y(),
                client.xyhw.w(),
                client.xyhw.h(),
            );
            if client.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &work, &display) {
                client.prev_xyhw = client.xyhw;
                client.xyhw.set_x(x);
                client.xyhw.set_y(y);
                client.xyhw.set_w(w);
                client.xyhw.set_h(h);
                self.actions
                    .push_back(DisplayAction::ConfigureWindow(client.clone()));
            }
            if let Some(monitor) = self.monitor_mut(target) {
                monitor.clients.push(client);
            }
        }
    }

    /// The monitor under the pointer becomes selected. If the pointer is
    /// outside every monitor the current selection survives, unless it is
    /// gone, in which case the first monitor wins.
    fn reselect_monitor(&mut self, pointer: (i32, i32)) {
        let under_pointer = self
            .monitors
            .iter()
            .find(|m| m.contains_point(pointer.0, pointer.1))
            .map(|m| m.id);
        match under_pointer {
            Some(id) => self.selected_monitor = id,
            None => {
                if self.monitor(self.selected_monitor).is_none() {
                    if let Some(first) = self.monitors.first() {
                        self.selected_monitor = first.id;
                    }
                }
            }
        }
    }
}

fn union_of(rects: &[Xyhw]) -> Xyhw {
    let Some(first) = rects.first() else {
        return Xyhw::default();
    };
    let mut min_x = first.x();
    let mut min_y = first.y();
    let mut max_x = first.x() + first.w();
    let mut max_y = first.y() + first.h();
    for rect in &rects[1..] {
        min_x = min_x.min(rect.x());
        min_y = min_y.min(rect.y());
        max_x = max_x.max(rect.x() + rect.w());
        max_y = max_y.max(rect.y() + rect.h());
    }
    Xyhw::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, Manager, WindowHandle};

    fn dual_head() -> Vec<Xyhw> {
        vec![Xyhw::new(0, 0, 1920, 1080), Xyhw::new(1920, 0, 1280, 1024)]
    }

    #[test]
    fn outputs_become_monitors_with_sequential_ids() {
        let mut manager = Manager::new_test();
        assert!(manager.state.reconcile_outputs(&dual_head(), (0, 0)));
        assert_eq!(manager.state.monitors.len(), 2);
        assert_eq!(manager.state.monitors[0].id, MonitorId(0));
        assert_eq!(manager.state.monitors[1].id, MonitorId(1));
    }

    #[test]
    fn mirrored_outputs_collapse_to_one_monitor() {
        let mut manager = Manager::new_test();
        let mirror = vec![Xyhw::new(0, 0, 1920, 1080), Xyhw::new(0, 0, 1920, 1080)];
        manager.state.reconcile_outputs(&mirror, (0, 0));
        assert_eq!(manager.state.monitors.len(), 1);
    }

    #[test]
    fn an_unchanged_layout_reports_no_change() {
        let mut manager = Manager::new_test();
        manager.state.reconcile_outputs(&dual_head(), (0, 0));
        assert!(!manager.state.reconcile_outputs(&dual_head(), (0, 0)));
    }

    #[test]
    fn shrinking_to_one_monitor_keeps_every_client() {
        let mut manager = Manager::new_test();
        manager.state.reconcile_outputs(&dual_head(), (0, 0));
        for n in 1..=3 {
            manager.state.monitors[1]
                .clients
                .push(Client::new(WindowHandle(n), None, MonitorId(1)));
        }
        manager.state.selected_monitor = MonitorId(1);

        let single = vec![Xyhw::new(0, 0, 1920, 1080)];
        assert!(manager.state.reconcile_outputs(&single, (100, 100)));

        assert_eq!(manager.state.monitors.len(), 1);
        assert_eq!(manager.state.client_count(), 3);
        assert_eq!(manager.state.selected_monitor, MonitorId(0));
        for client in &manager.state.monitors[0].clients {
            assert_eq!(client.monitor, MonitorId(0));
        }
    }

    #[test]
    fn no_outputs_falls_back_to_a_single_display_sized_monitor() {
        let mut manager = Manager::new_test();
        manager.state.display_size = Xyhw::new(0, 0, 800, 600);
        manager.state.reconcile_outputs(&[], (0, 0));
        assert_eq!(manager.state.monitors.len(), 1);
        assert_eq!(manager.state.monitors[0].rect, Xyhw::new(0, 0, 800, 600));
    }

    #[test]
    fn the_monitor_under_the_pointer_is_selected_after_a_change() {
        let mut manager = Manager::new_test();
        manager.state.reconcile_outputs(&dual_head(), (2000, 100));
        assert_eq!(manager.state.selected_monitor, MonitorId(1));
    }

    #[test]
    fn display_size_covers_the_union_of_outputs() {
        let mut manager = Manager::new_test();
        manager.state.reconcile_outputs(&dual_head(), (0, 0));
        assert_eq!(manager.state.display_size, Xyhw::new(0, 0, 3200, 1080));
    }
}
