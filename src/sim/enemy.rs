//! Patrolling enemy
//!
//! Walks at constant speed, turns around on anything it bumps into, and goes
//! Patrolling -> Squashed -> Removed. Each transition happens at most once.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::block::ReactiveBlock;
use super::collision::{Body, HorizontalResponse, Solids};
use super::grid::TileGrid;
use super::rect::Rect;
use crate::tuning::{EnemyTuning, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Patrolling,
    Squashed,
    /// Gone for the rest of the run
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPose {
    /// Two-frame walk cycle; frame 1 is the mirrored image
    Walk(u8),
    Squashed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub state: EnemyState,
    pub squash_timer: u32,
    pub anim_frame: u8,
    pub anim_timer: u32,
}

impl Enemy {
    /// Spawn standing on `spawn` (mid-bottom), walking left
    pub fn new(id: u32, spawn: IVec2, tuning: &EnemyTuning) -> Self {
        let rect = Rect::from_midbottom(spawn, tuning.width, tuning.height);
        Self {
            id,
            body: Body::new(rect, Vec2::new(-tuning.walk_speed, 0.0)),
            state: EnemyState::Patrolling,
            squash_timer: 0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    /// Still walking and able to hurt or be stomped
    pub fn is_active(&self) -> bool {
        self.state == EnemyState::Patrolling
    }

    /// Still part of the world (walking or squashed)
    pub fn is_alive(&self) -> bool {
        self.state != EnemyState::Removed
    }

    /// Advance one tick. Returns true on the tick the enemy is removed.
    pub fn update(&mut self, grid: &TileGrid, blocks: &[ReactiveBlock], tuning: &Tuning) -> bool {
        let e = &tuning.enemy;
        match self.state {
            EnemyState::Removed => false,
            EnemyState::Squashed => {
                self.squash_timer += 1;
                if self.squash_timer >= e.squash_duration {
                    self.state = EnemyState::Removed;
                    log::debug!("enemy {} removed", self.id);
                    return true;
                }
                false
            }
            EnemyState::Patrolling => {
                let solids = Solids::new(grid.floor_colliders(), blocks);
                self.body.step(
                    solids,
                    tuning.world.gravity,
                    grid.pixel_width(),
                    HorizontalResponse::Reverse {
                        speed: e.walk_speed,
                    },
                );

                if self.body.rect.top() > grid.pixel_height() {
                    self.state = EnemyState::Removed;
                    log::debug!("enemy {} fell out of the world", self.id);
                    return true;
                }

                self.anim_timer += 1;
                if self.anim_timer >= e.anim_interval {
                    self.anim_frame = (self.anim_frame + 1) % 2;
                    self.anim_timer = 0;
                }
                false
            }
        }
    }

    /// Flatten the enemy. Returns false unless it was patrolling.
    ///
    /// The stomp tick itself counts toward the squash duration.
    pub fn squash(&mut self) -> bool {
        if self.state != EnemyState::Patrolling {
            return false;
        }
        self.state = EnemyState::Squashed;
        self.squash_timer = 1;
        self.body.vel = Vec2::ZERO;
        log::debug!("enemy {} squashed", self.id);
        true
    }

    pub fn pose(&self) -> EnemyPose {
        match self.state {
            EnemyState::Squashed | EnemyState::Removed => EnemyPose::Squashed,
            EnemyState::Patrolling => EnemyPose::Walk(self.anim_frame),
        }
    }

    /// Drawn rect: the squashed pose keeps the walking bottom edge
    pub fn render_rect(&self, e: &EnemyTuning) -> Rect {
        match self.state {
            EnemyState::Patrolling => self.body.rect,
            _ => Rect::from_midbottom(self.body.rect.midbottom(), e.width, e.squashed_height),
        }
    }
}
