//! Managed window records.
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;

use super::{MonitorId, Xyhw};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement.
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Default + Send + 'static
{
}

/// A backend-agnostic handle to a window used to identify it.
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes.
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// Titles longer than this are cut off before being stored.
const MAX_NAME_LEN: usize = 255;

/// ICCCM `WM_NORMAL_HINTS`, already normalized by the backend. A zero field
/// means the client did not set it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

impl SizeHints {
    /// A window whose min and max sizes agree cannot be resized.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.max_w > 0 && self.max_h > 0 && self.max_w == self.min_w && self.max_h == self.min_h
    }
}

/// Everything that gets stashed when a window goes fullscreen and restored
/// when it comes back.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SavedState {
    pub floating: bool,
    pub border: i32,
    pub xyhw: Xyhw,
}

/// One managed window.
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Client<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    #[serde(bound = "")]
    pub transient: Option<WindowHandle<H>>,
    pub name: Option<String>,
    pub monitor: MonitorId,
    pub xyhw: Xyhw,
    pub prev_xyhw: Xyhw,
    pub border: i32,
    pub old_border: i32,
    pub hints: SizeHints,
    pub floating: bool,
    pub urgent: bool,
    pub never_focus: bool,
    pub fullscreen: bool,
    pub saved: Option<SavedState>,
}

impl<H: Handle> Client<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, name: Option<String>, monitor: MonitorId) -> Self {
        let mut client = Self {
            handle,
            transient: None,
            name: None,
            monitor,
            xyhw: Xyhw::default(),
            prev_xyhw: Xyhw::default(),
            border: 1,
            old_border: 1,
            hints: SizeHints::default(),
            floating: false,
            urgent: false,
            never_focus: false,
            fullscreen: false,
            saved: None,
        };
        client.set_name(name);
        client
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name.map(|mut n| {
            if n.len() > MAX_NAME_LEN {
                let mut end = MAX_NAME_LEN;
                while !n.is_char_boundary(end) {
                    end -= 1;
                }
                n.truncate(end);
            }
            n
        });
    }

    pub fn update_hints(&mut self, hints: SizeHints) {
        self.hints = hints;
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.hints.is_fixed()
    }

    #[must_use]
    pub fn can_focus(&self) -> bool {
        !self.never_focus
    }

    /// Outer width including both borders.
    #[must_use]
    pub const fn full_width(&self) -> i32 {
        self.xyhw.w() + 2 * self.border
    }

    /// Outer height including both borders.
    #[must_use]
    pub const fn full_height(&self) -> i32 {
        self.xyhw.h() + 2 * self.border
    }

    /// Adjust a candidate geometry so the window stays reachable and honors
    /// its `WM_NORMAL_HINTS`.
    ///
    /// Interactive moves are clamped against the whole display so a drag can
    /// cross monitors; everything else is clamped against the owning
    /// monitor's usable area. Returns true when the result differs from the
    /// current geometry.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn apply_size_hints(
        &self,
        x: &mut i32,
        y: &mut i32,
        w: &mut i32,
        h: &mut i32,
        interactive: bool,
        work: &Xyhw,
        display: &Xyhw,
    ) -> bool {
        let bw = self.border;
        if interactive {
            if *x > display.x() + display.w() {
                *x = display.x() + display.w() - (*w + 2 * bw);
            }
            if *y > display.y() + display.h() {
                *y = display.y() + display.h() - (*h + 2 * bw);
            }
            if *x + *w + 2 * bw < display.x() {
                *x = display.x();
            }
            if *y + *h + 2 * bw < display.y() {
                *y = display.y();
            }
        } else {
            if *x >= work.x() + work.w() {
                *x = work.x() + work.w() - (*w + 2 * bw);
            }
            if *y >= work.y() + work.h() {
                *y = work.y() + work.h() - (*h + 2 * bw);
            }
            if *x + *w + 2 * bw <= work.x() {
                *x = work.x();
            }
            if *y + *h + 2 * bw <= work.y() {
                *y = work.y();
            }
        }
        // A window can always be found and resized from a 1x1 floor.
        *w = (*w).max(1);
        *h = (*h).max(1);

        let hints = &self.hints;
        let base_is_min = hints.base_w == hints.min_w && hints.base_h == hints.min_h;
        if !base_is_min {
            *w -= hints.base_w;
            *h -= hints.base_h;
        }
        if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 {
            if hints.max_aspect < *w as f32 / *h as f32 {
                *w = (*h as f32 * hints.max_aspect + 0.5) as i32;
            } else if hints.min_aspect < *h as f32 / *w as f32 {
                *h = (*w as f32 * hints.min_aspect + 0.5) as i32;
            }
        }
        if base_is_min {
            *w -= hints.base_w;
            *h -= hints.base_h;
        }
        if hints.inc_w > 0 {
            *w -= *w % hints.inc_w;
        }
        if hints.inc_h > 0 {
            *h -= *h % hints.inc_h;
        }
        *w = (*w + hints.base_w).max(hints.min_w).max(1);
        *h = (*h + hints.base_h).max(hints.min_h).max(1);
        if hints.max_w > 0 {
            *w = (*w).min(hints.max_w);
        }
        if hints.max_h > 0 {
            *h = (*h).min(hints.max_h);
        }

        *x != self.xyhw.x() || *y != self.xyhw.y() || *w != self.xyhw.w() || *h != self.xyhw.h()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client<MockHandle> {
        let mut c = Client::new(WindowHandle(1), None, MonitorId(0));
        c.border = 0;
        c
    }

    #[test]
    fn offscreen_request_is_pulled_back_into_the_usable_area() {
        let c = client();
        let work = Xyhw::new(0, 0, 1000, 800);
        let display = Xyhw::new(0, 0, 1000, 800);
        let (mut x, mut y, mut w, mut h) = (1200, 50, 300, 300);
        let changed = c.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &work, &display);
        assert!(changed);
        assert_eq!(x, 700);
        assert_eq!(y, 50);
        assert_eq!((w, h), (300, 300));
    }

    #[test]
    fn interactive_moves_clamp_against_the_display_not_the_monitor() {
        let c = client();
        let work = Xyhw::new(0, 0, 1000, 800);
        let display = Xyhw::new(0, 0, 2000, 800);
        let (mut x, mut y, mut w, mut h) = (1500, 50, 300, 300);
        c.apply_size_hints(&mut x, &mut y, &mut w, &mut h, true, &work, &display);
        // Still on the display, so an interactive drag may leave the monitor.
        assert_eq!(x, 1500);
    }

    #[test]
    fn degenerate_sizes_floor_at_one_pixel() {
        let c = client();
        let area = Xyhw::new(0, 0, 1000, 800);
        let (mut x, mut y, mut w, mut h) = (10, 10, 0, -5);
        c.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &area, &area);
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn increments_snap_and_minimums_win() {
        let mut c = client();
        c.update_hints(SizeHints {
            inc_w: 10,
            inc_h: 10,
            min_w: 100,
            min_h: 100,
            ..SizeHints::default()
        });
        let area = Xyhw::new(0, 0, 1000, 800);
        let (mut x, mut y, mut w, mut h) = (10, 10, 305, 42);
        c.apply_size_hints(&mut x, &mut y, &mut w, &mut h, false, &area, &area);
        assert_eq!(w, 300);
        assert_eq!(h, 100);
    }

    #[test]
    fn equal_min_and_max_hints_mark_the_client_fixed() {
        let mut c = client();
        c.update_hints(SizeHints {
            min_w: 200,
            min_h: 100,
            max_w: 200,
            max_h: 100,
            ..SizeHints::default()
        });
        assert!(c.is_fixed());
    }

    #[test]
    fn long_titles_are_truncated() {
        let mut c = client();
        c.set_name(Some("x".repeat(500)));
        assert_eq!(c.name.map(|n| n.len()), Some(255));
    }
}
