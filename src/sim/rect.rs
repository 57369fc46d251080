//! Integer axis-aligned rectangles
//!
//! Positions are whole pixels; sub-pixel motion lives in actor velocities and
//! is truncated when applied. Overlap is strict, so boxes that merely share an
//! edge (an actor standing on a tile) do not collide.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size whose mid-bottom point sits at `anchor`
    pub fn from_midbottom(anchor: IVec2, w: i32, h: i32) -> Self {
        Self::new(anchor.x - w / 2, anchor.y - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn midbottom(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.bottom())
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Same box shifted vertically
    pub fn offset_y(&self, dy: i32) -> Self {
        Self { y: self.y + dy, ..*self }
    }

    /// Strict interior overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Strict horizontal-extent overlap, ignoring y
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}
