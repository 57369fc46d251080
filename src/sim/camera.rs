//! Horizontal follow camera
//!
//! Direct follow with hard clamping at the world edges; no smoothing or lag.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    offset: i32,
    viewport_width: i32,
    world_width: i32,
}

impl Camera {
    pub fn new(viewport_width: i32, world_width: i32) -> Self {
        Self {
            offset: 0,
            viewport_width,
            world_width,
        }
    }

    /// Left edge of the viewport in world pixels
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    /// Largest valid offset; zero when the world fits in the viewport
    pub fn max_offset(&self) -> i32 {
        (self.world_width - self.viewport_width).max(0)
    }

    /// Center the viewport on `target_x`, clamped to the world
    pub fn follow(&mut self, target_x: i32) {
        let wanted = target_x.saturating_sub(self.viewport_width / 2);
        self.offset = wanted.clamp(0, self.max_offset());
    }
}
