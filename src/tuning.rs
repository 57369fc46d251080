//! Data-driven game balance and level description
//!
//! Every tunable number the simulation reads lives in [`Tuning`]. The value is
//! built once (defaults or a JSON file) and never mutated during a run.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// World geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Edge length of a grid cell in pixels
    pub tile_size: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Downward acceleration shared by both actors (px/tick²)
    pub gravity: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            gravity: 0.5 * SCALE,
        }
    }
}

/// Player movement, jump and death parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: i32,
    pub height: i32,
    pub walk_max_speed: f32,
    pub dash_max_speed: f32,
    pub ground_accel: f32,
    pub ground_decel: f32,
    pub air_accel: f32,
    pub air_decel: f32,
    /// Initial upward speed of a jump
    pub jump_power: f32,
    /// Extra upward impulse per tick while jump is held
    pub jump_hold_boost: f32,
    /// Maximum number of boosted ticks per jump
    pub jump_hold_ticks: u32,
    /// Ticks between walk frames
    pub walk_anim_interval: u32,
    /// Horizontal speed below which the idle pose is shown
    pub walk_deadzone: f32,
    /// Vertical speed the death hop starts with (negative = up)
    pub death_launch_vy: f32,
    pub death_gravity: f32,
    /// Ticks the death sequence runs before signalling completion
    pub death_duration: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 16 * SCALE as i32,
            height: 16 * SCALE as i32,
            walk_max_speed: 2.2 * SCALE,
            dash_max_speed: 4.0 * SCALE,
            ground_accel: 0.15 * SCALE,
            ground_decel: 0.18 * SCALE,
            air_accel: 0.08 * SCALE,
            air_decel: 0.10 * SCALE,
            jump_power: 5.2 * SCALE,
            jump_hold_boost: 0.35 * SCALE,
            jump_hold_ticks: 12,
            walk_anim_interval: 6,
            walk_deadzone: 0.5,
            death_launch_vy: -8.0 * SCALE,
            death_gravity: 0.35 * SCALE,
            death_duration: 120,
        }
    }
}

/// Enemy patrol and squash parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: i32,
    pub height: i32,
    /// Height of the flattened pose shown while squashed
    pub squashed_height: i32,
    pub walk_speed: f32,
    /// Ticks between the two walk poses
    pub anim_interval: u32,
    /// Ticks a squashed enemy lingers before removal
    pub squash_duration: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 16 * SCALE as i32,
            height: 16 * SCALE as i32,
            squashed_height: 8 * SCALE as i32,
            walk_speed: 1.0 * SCALE,
            anim_interval: 16,
            squash_duration: 40,
        }
    }
}

/// Reactive block bounce parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockTuning {
    /// Upward kick applied on a strike (negative = up)
    pub bounce_impulse: f32,
    /// Pull back toward the base position per tick
    pub bounce_gravity: f32,
}

impl Default for BlockTuning {
    fn default() -> Self {
        Self {
            bounce_impulse: -3.0 * SCALE,
            bounce_gravity: 0.5 * SCALE,
        }
    }
}

/// Player-vs-enemy contact policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Max gap between player bottom and enemy top that still counts as a stomp
    pub stomp_threshold: i32,
    /// Fraction of jump power the player bounces back with after a stomp
    pub stomp_bounce_factor: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            stomp_threshold: 16 * SCALE as i32,
            stomp_bounce_factor: 0.6,
        }
    }
}

/// The complete immutable parameter set for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub block: BlockTuning,
    pub combat: CombatTuning,
}

fn positive_i32(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: value as f32,
        })
    }
}

fn positive_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl Tuning {
    /// Reject parameter sets the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_i32("world.tile_size", self.world.tile_size)?;
        positive_i32("world.viewport_width", self.world.viewport_width)?;
        positive_i32("world.viewport_height", self.world.viewport_height)?;
        non_negative("world.gravity", self.world.gravity)?;

        let p = &self.player;
        positive_i32("player.width", p.width)?;
        positive_i32("player.height", p.height)?;
        positive_f32("player.walk_max_speed", p.walk_max_speed)?;
        positive_f32("player.dash_max_speed", p.dash_max_speed)?;
        positive_f32("player.ground_accel", p.ground_accel)?;
        positive_f32("player.ground_decel", p.ground_decel)?;
        positive_f32("player.air_accel", p.air_accel)?;
        positive_f32("player.air_decel", p.air_decel)?;
        non_negative("player.jump_power", p.jump_power)?;
        non_negative("player.jump_hold_boost", p.jump_hold_boost)?;
        non_negative("player.walk_deadzone", p.walk_deadzone)?;
        non_negative("player.death_gravity", p.death_gravity)?;
        positive_i32("player.walk_anim_interval", p.walk_anim_interval as i32)?;

        let e = &self.enemy;
        positive_i32("enemy.width", e.width)?;
        positive_i32("enemy.height", e.height)?;
        positive_i32("enemy.squashed_height", e.squashed_height)?;
        non_negative("enemy.walk_speed", e.walk_speed)?;
        positive_i32("enemy.anim_interval", e.anim_interval as i32)?;

        // A non-negative impulse or non-positive pull would never return to rest
        positive_f32("block.bounce_gravity", self.block.bounce_gravity)?;
        positive_f32("block.bounce_impulse (magnitude)", -self.block.bounce_impulse)?;

        non_negative("combat.stomp_threshold", self.combat.stomp_threshold as f32)?;
        non_negative("combat.stomp_bounce_factor", self.combat.stomp_bounce_factor)?;
        Ok(())
    }
}

/// Static level layout and spawn points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Grid rows, top to bottom: `.` empty, `#` floor, `?` reactive block
    pub rows: Vec<String>,
    /// Player spawn, as the mid-bottom point of its box
    pub player_spawn: IVec2,
    /// Enemy spawns, as mid-bottom points, in update order
    pub enemy_spawns: Vec<IVec2>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        let tile = TILE_SIZE;
        Self {
            rows: default_rows(),
            player_spawn: IVec2::new(VIEWPORT_WIDTH / 2, (200 - 40) * SCALE as i32),
            enemy_spawns: vec![
                IVec2::new(80 * SCALE as i32, 13 * tile),
                IVec2::new(34 * tile, 13 * tile),
            ],
        }
    }
}

/// Built-in level: ground with a pit, two pipes and a row of blocks
fn default_rows() -> Vec<String> {
    let mut grid = vec![vec!['.'; DEFAULT_LEVEL_COLS]; DEFAULT_LEVEL_ROWS];

    let mut set = |row: usize, cols: std::ops::Range<usize>, cell: char| {
        for col in cols {
            if let Some(c) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *c = cell;
            }
        }
    };

    for row in 13..15 {
        set(row, 0..44, '#');
        set(row, 46..DEFAULT_LEVEL_COLS, '#');
    }
    // blocks
    set(9, 12..13, '?');
    set(9, 16..19, '?');
    set(5, 17..18, '?');
    set(9, 54..56, '?');
    // pipes
    for row in 11..13 {
        set(row, 28..30, '#');
    }
    for row in 10..13 {
        set(row, 50..52, '#');
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// Everything the asset/config provider hands to the core at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub level: LevelConfig,
}

impl GameConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.tuning.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
