//! Player controller
//!
//! Input-driven acceleration, variable-height jump, a one-way death sequence
//! and walk-cycle bookkeeping. Movement itself goes through [`Body::step`].

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::block::ReactiveBlock;
use super::collision::{Body, HorizontalResponse, Solids};
use super::grid::TileGrid;
use super::rect::Rect;
use super::tick::TickInput;
use crate::tuning::{PlayerTuning, Tuning};

/// Number of frames in the walk cycle
pub const WALK_FRAMES: u8 = 3;

/// Locomotion state, derived from physics every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Walking,
    Airborne,
    Dead,
}

/// Which sprite the player shows this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    Stand,
    Walk(u8),
    Jump,
    Dead,
}

/// Outcome of one [`Player::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerUpdate {
    /// A jump started this tick
    pub jumped: bool,
    /// Fell out of the bottom of the world while alive
    pub fell_out: bool,
    /// The death sequence is over
    pub finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing_right: bool,
    /// Jump button still held since takeoff
    pub jumping: bool,
    /// Boosted ticks spent in the current jump
    pub jump_hold: u32,
    pub dead: bool,
    /// Ticks since death
    pub death_timer: u32,
    /// Death sequence over; the run should end
    pub finished: bool,
    pub walk_frame: u8,
    pub walk_timer: u32,
    /// Top edge at the start of the current tick
    prev_top: i32,
}

impl Player {
    /// Spawn with the mid-bottom of the box at `spawn`
    pub fn new(spawn: IVec2, tuning: &PlayerTuning) -> Self {
        let rect = Rect::from_midbottom(spawn, tuning.width, tuning.height);
        Self {
            body: Body::new(rect, Vec2::ZERO),
            facing_right: true,
            jumping: false,
            jump_hold: 0,
            dead: false,
            death_timer: 0,
            finished: false,
            walk_frame: 0,
            walk_timer: 0,
            prev_top: rect.top(),
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.body.on_ground
    }

    /// Top edge before this tick's movement
    pub fn prev_top(&self) -> i32 {
        self.prev_top
    }

    /// Speeds inside the walk deadzone count as idle, matching [`Player::pose`]
    pub fn state(&self, p: &PlayerTuning) -> PlayerState {
        if self.dead {
            PlayerState::Dead
        } else if !self.body.on_ground {
            PlayerState::Airborne
        } else if self.is_walking(p) {
            PlayerState::Walking
        } else {
            PlayerState::Idle
        }
    }

    /// Advance one tick
    pub fn update(
        &mut self,
        input: &TickInput,
        grid: &TileGrid,
        blocks: &[ReactiveBlock],
        tuning: &Tuning,
    ) -> PlayerUpdate {
        self.prev_top = self.body.rect.top();

        if self.dead {
            self.update_dead(grid, &tuning.player);
            return PlayerUpdate {
                finished: self.finished,
                ..Default::default()
            };
        }

        let p = &tuning.player;
        self.apply_horizontal_input(input, p);
        let jumped = self.apply_jump_input(input, p);

        let solids = Solids::new(grid.floor_colliders(), blocks);
        let landed = self.body.step(
            solids,
            tuning.world.gravity,
            grid.pixel_width(),
            HorizontalResponse::Stop,
        );
        if landed {
            self.jumping = false;
            self.jump_hold = 0;
        }

        let mut update = PlayerUpdate {
            jumped,
            ..Default::default()
        };

        if self.body.rect.top() > grid.pixel_height() {
            update.fell_out = true;
            self.die(p);
            // Already off screen, so the sequence ends at once
            self.finished = true;
            update.finished = true;
        }

        self.animate(p);
        update
    }

    fn apply_horizontal_input(&mut self, input: &TickInput, p: &PlayerTuning) {
        let max_speed = if input.dash {
            p.dash_max_speed
        } else {
            p.walk_max_speed
        };
        let (accel, decel) = if self.body.on_ground {
            (p.ground_accel, p.ground_decel)
        } else {
            (p.air_accel, p.air_decel)
        };

        match input.direction() {
            Some(dir) => {
                // Speed measured along the held direction
                let speed = self.body.vel.x * dir;
                let speed = if speed < max_speed {
                    (speed + accel).min(max_speed)
                } else {
                    // Over the cap (dash released): bleed down to it, not past it
                    (speed - decel).max(max_speed)
                };
                self.body.vel.x = speed * dir;
                self.facing_right = dir > 0.0;
            }
            None => {
                let vx = self.body.vel.x;
                self.body.vel.x = if vx > 0.0 {
                    (vx - decel).max(0.0)
                } else if vx < 0.0 {
                    (vx + decel).min(0.0)
                } else {
                    0.0
                };
            }
        }
    }

    /// Returns true when a new jump starts
    fn apply_jump_input(&mut self, input: &TickInput, p: &PlayerTuning) -> bool {
        if !input.jump {
            // Releasing only stops further boost; current speed is kept
            self.jumping = false;
            return false;
        }

        if self.body.on_ground && !self.jumping {
            self.body.vel.y = -p.jump_power;
            self.jumping = true;
            self.jump_hold = 0;
            self.body.on_ground = false;
            log::debug!("jump at x={}", self.body.rect.x);
            return true;
        }

        if self.jumping && self.jump_hold < p.jump_hold_ticks {
            self.body.vel.y -= p.jump_hold_boost;
            self.jump_hold += 1;
        }
        false
    }

    fn update_dead(&mut self, grid: &TileGrid, p: &PlayerTuning) {
        self.body.vel.x = 0.0;
        self.body.vel.y += p.death_gravity;
        self.body.rect.y += self.body.vel.y as i32;
        self.death_timer += 1;

        if !self.finished
            && (self.death_timer > p.death_duration || self.body.rect.top() > grid.pixel_height())
        {
            self.finished = true;
            log::debug!("death sequence finished after {} ticks", self.death_timer);
        }
    }

    /// Enter the death sequence. Returns false if already dead.
    pub fn die(&mut self, p: &PlayerTuning) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.death_timer = 0;
        self.body.vel = Vec2::new(0.0, p.death_launch_vy);
        self.body.on_ground = false;
        self.jumping = false;
        self.walk_frame = 0;
        self.walk_timer = 0;
        log::debug!("player died at {:?}", self.body.rect.midbottom());
        true
    }

    /// Hop back up after stomping an enemy
    pub fn bounce(&mut self, tuning: &Tuning) {
        self.body.vel.y = -tuning.player.jump_power * tuning.combat.stomp_bounce_factor;
    }

    fn is_walking(&self, p: &PlayerTuning) -> bool {
        self.body.vel.x.abs() > p.walk_deadzone
    }

    fn animate(&mut self, p: &PlayerTuning) {
        if self.dead || !self.body.on_ground || !self.is_walking(p) {
            self.walk_frame = 0;
            self.walk_timer = 0;
            return;
        }
        self.walk_timer += 1;
        if self.walk_timer >= p.walk_anim_interval {
            self.walk_frame = (self.walk_frame + 1) % WALK_FRAMES;
            self.walk_timer = 0;
        }
    }

    /// Sprite selection for this tick
    pub fn pose(&self, p: &PlayerTuning) -> PlayerPose {
        if self.dead {
            PlayerPose::Dead
        } else if !self.body.on_ground {
            PlayerPose::Jump
        } else if self.is_walking(p) {
            PlayerPose::Walk(self.walk_frame)
        } else {
            PlayerPose::Stand
        }
    }

    /// Whether the selected pose is drawn mirrored
    pub fn flip_x(&self) -> bool {
        !self.facing_right && !self.dead
    }
}
