//! Rendering boundary
//!
//! The simulation never draws. Each frame it is reduced to a flat list of
//! sprite placements in world pixels plus the camera offset, and a backend
//! turns that into pixels however it likes.

use serde::Serialize;

use crate::sim::{EnemyPose, EnemyState, GameState, PlayerPose, Rect};

/// Every sprite the core can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpriteId {
    Floor,
    Block,
    PlayerStand,
    /// Walk cycle frame index
    PlayerWalk(u8),
    PlayerJump,
    PlayerDead,
    EnemyWalk,
    EnemySquashed,
}

/// One sprite placement in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpriteDraw {
    pub sprite: SpriteId,
    pub rect: Rect,
    pub flip_x: bool,
}

impl SpriteDraw {
    fn new(sprite: SpriteId, rect: Rect) -> Self {
        Self {
            sprite,
            rect,
            flip_x: false,
        }
    }

    /// Rect translated into viewport space
    pub fn screen_rect(&self, camera_x: i32) -> Rect {
        Rect::new(self.rect.x - camera_x, self.rect.y, self.rect.w, self.rect.h)
    }
}

/// Everything a backend needs for one frame, back to front
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub tick: u64,
    pub camera_x: i32,
    pub sprites: Vec<SpriteDraw>,
}

impl RenderFrame {
    /// Describe the visible world. Floor tiles outside the viewport are culled;
    /// entities are always included.
    pub fn capture(state: &GameState) -> Self {
        let camera_x = state.camera.offset();
        let view_right = camera_x + state.camera.viewport_width();
        let mut sprites = Vec::new();

        sprites.extend(
            state
                .grid
                .floor_colliders()
                .iter()
                .filter(|r| r.right() > camera_x && r.left() < view_right)
                .map(|&r| SpriteDraw::new(SpriteId::Floor, r)),
        );

        sprites.extend(
            state
                .blocks
                .iter()
                .map(|b| SpriteDraw::new(SpriteId::Block, b.rect())),
        );

        let tuning = state.tuning();
        for enemy in state.live_enemies() {
            let draw = match (enemy.state, enemy.pose()) {
                (EnemyState::Patrolling, EnemyPose::Walk(frame)) => SpriteDraw {
                    sprite: SpriteId::EnemyWalk,
                    rect: enemy.rect(),
                    // The two-frame walk is one image and its mirror
                    flip_x: frame == 1,
                },
                _ => SpriteDraw::new(SpriteId::EnemySquashed, enemy.render_rect(&tuning.enemy)),
            };
            sprites.push(draw);
        }

        let player = &state.player;
        let sprite = match player.pose(&tuning.player) {
            PlayerPose::Stand => SpriteId::PlayerStand,
            PlayerPose::Walk(frame) => SpriteId::PlayerWalk(frame),
            PlayerPose::Jump => SpriteId::PlayerJump,
            PlayerPose::Dead => SpriteId::PlayerDead,
        };
        sprites.push(SpriteDraw {
            sprite,
            rect: player.rect(),
            flip_x: player.flip_x(),
        });

        Self {
            tick: state.time_ticks,
            camera_x,
            sprites,
        }
    }
}

/// A drawing backend
pub trait Renderer {
    fn draw(&mut self, frame: &RenderFrame);
}

/// Headless backend that reports frames through the logger
#[derive(Debug, Default)]
pub struct TraceRenderer {
    frames: u64,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        log::trace!(
            "frame {} (tick {}): camera_x={} sprites={}",
            self.frames,
            frame.tick,
            frame.camera_x,
            frame.sprites.len()
        );
        if let Some(player) = frame.sprites.last() {
            log::trace!(
                "  player {:?} at {:?} (screen {:?})",
                player.sprite,
                player.rect,
                player.screen_rect(frame.camera_x)
            );
        }
    }
}
