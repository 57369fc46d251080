//! Axis-separated movement against static and dynamic solids
//!
//! Both actors move through the same routine: horizontal displacement and
//! resolution, then gravity, vertical displacement and resolution, then a
//! clamp to the world's horizontal bounds. What happens to horizontal velocity
//! on a hit is the only per-actor difference ([`HorizontalResponse`]).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::block::ReactiveBlock;
use super::rect::Rect;

/// Where a solid rectangle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    Floor,
    Block,
}

/// One obstacle a body resolves against
#[derive(Debug, Clone, Copy)]
pub struct Solid {
    pub rect: Rect,
    pub kind: SolidKind,
}

/// Borrowed view of every solid in the world, floors first then blocks
#[derive(Clone, Copy)]
pub struct Solids<'a> {
    floors: &'a [Rect],
    blocks: &'a [ReactiveBlock],
}

impl<'a> Solids<'a> {
    pub fn new(floors: &'a [Rect], blocks: &'a [ReactiveBlock]) -> Self {
        Self { floors, blocks }
    }

    /// Enumeration order is fixed: floor tiles row-major, then blocks by index
    pub fn iter(&self) -> impl Iterator<Item = Solid> + 'a {
        let floors = self.floors.iter().map(|&rect| Solid {
            rect,
            kind: SolidKind::Floor,
        });
        let blocks = self.blocks.iter().map(|b| Solid {
            rect: b.rect(),
            kind: SolidKind::Block,
        });
        floors.chain(blocks)
    }
}

/// What a body does with its horizontal velocity when it runs into something
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalResponse {
    /// Zero horizontal velocity
    Stop,
    /// Turn around at the given patrol speed
    Reverse { speed: f32 },
}

impl HorizontalResponse {
    /// New horizontal velocity after hitting something while moving in `dir`
    fn after_hit(self, dir: f32) -> f32 {
        match self {
            HorizontalResponse::Stop => 0.0,
            HorizontalResponse::Reverse { speed } => -dir.signum() * speed,
        }
    }
}

/// Position, velocity and ground contact shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect, vel: Vec2) -> Self {
        Self {
            rect,
            vel,
            on_ground: false,
        }
    }

    /// Run one full movement tick. Returns true if the body landed.
    pub fn step(
        &mut self,
        solids: Solids<'_>,
        gravity: f32,
        world_width: i32,
        response: HorizontalResponse,
    ) -> bool {
        self.move_horizontal(solids, response);
        self.move_vertical(solids, gravity);
        self.clamp_to_world(world_width, response);
        self.on_ground
    }

    fn move_horizontal(&mut self, solids: Solids<'_>, response: HorizontalResponse) {
        // Displacement is truncated; the fraction stays in the velocity
        self.rect.x += self.vel.x as i32;

        let dir = self.vel.x;
        if dir == 0.0 {
            return;
        }
        for solid in solids.iter() {
            if !self.rect.overlaps(&solid.rect) {
                continue;
            }
            if dir > 0.0 {
                self.rect.set_right(solid.rect.left());
            } else {
                self.rect.set_left(solid.rect.right());
            }
            self.vel.x = response.after_hit(dir);
        }
    }

    fn move_vertical(&mut self, solids: Solids<'_>, gravity: f32) {
        self.on_ground = false;
        self.vel.y += gravity;
        self.rect.y += self.vel.y as i32;

        let descending = self.vel.y >= 0.0;
        for solid in solids.iter() {
            if !self.rect.overlaps(&solid.rect) {
                continue;
            }
            if descending {
                self.rect.set_bottom(solid.rect.top());
                self.vel.y = 0.0;
                self.on_ground = true;
                continue;
            }

            self.rect.set_top(solid.rect.bottom());
            // Upward speed survives a block so the strike check can see it
            if solid.kind == SolidKind::Floor {
                self.vel.y = 0.0;
            }
        }
    }

    fn clamp_to_world(&mut self, world_width: i32, response: HorizontalResponse) {
        if self.rect.left() < 0 {
            self.rect.set_left(0);
            self.vel.x = response.after_hit(-1.0);
        }
        if self.rect.right() > world_width {
            self.rect.set_right(world_width);
            self.vel.x = response.after_hit(1.0);
        }
    }
}
