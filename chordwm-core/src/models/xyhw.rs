//! Rectangle math shared by clients and monitors.
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};

/// A rectangle in root-window coordinates. x,y from top left.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xyhw {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Xyhw {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
    #[must_use]
    pub const fn w(&self) -> i32 {
        self.w
    }
    #[must_use]
    pub const fn h(&self) -> i32 {
        self.h
    }

    pub fn set_x(&mut self, value: i32) {
        self.x = value;
    }
    pub fn set_y(&mut self, value: i32) {
        self.y = value;
    }
    pub fn set_w(&mut self, value: i32) {
        self.w = value;
    }
    pub fn set_h(&mut self, value: i32) {
        self.h = value;
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        let max_x = self.x + self.w;
        let max_y = self.y + self.h;
        (self.x <= x && x < max_x) && (self.y <= y && y < max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_on_the_far_edge_is_outside() {
        let rect = Xyhw::new(0, 0, 100, 100);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(99, 99));
        assert!(!rect.contains_point(100, 100));
    }
}
