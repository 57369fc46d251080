//! Game state and core simulation types
//!
//! Everything one run owns lives here. The tick driver is the only writer.

use serde::Serialize;

use super::block::ReactiveBlock;
use super::camera::Camera;
use super::enemy::Enemy;
use super::grid::{CellKind, TileGrid};
use super::player::Player;
use crate::error::ConfigError;
use crate::tuning::{GameConfig, Tuning};
use glam::IVec2;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Player alive, everything simulating
    Playing,
    /// Player hit; death animation running
    Dying,
    /// Death sequence finished; ticks are no-ops
    GameOver,
}

/// Something notable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Jumped,
    BlockStruck { block: u32 },
    EnemyStomped { enemy: u32 },
    EnemyRemoved { enemy: u32 },
    PlayerDied,
    DeathSequenceFinished,
}

/// Complete simulation state (deterministic, serializable for snapshots)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    #[serde(skip)]
    pub(crate) tuning: Tuning,
    pub grid: TileGrid,
    pub player: Player,
    /// In spawn order; removed enemies stay in place but are ignored
    pub enemies: Vec<Enemy>,
    /// One per block spawn cell, row-major
    pub blocks: Vec<ReactiveBlock>,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build the level. Fails only on malformed configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let GameConfig { tuning, level } = config;
        tuning.validate()?;

        let grid = TileGrid::parse(&level.rows, tuning.world.tile_size)?;
        let world = IVec2::new(grid.pixel_width(), grid.pixel_height());
        if tuning.world.viewport_width > world.x {
            return Err(ConfigError::ViewportWiderThanWorld {
                viewport: tuning.world.viewport_width,
                world: world.x,
            });
        }

        check_spawn("player", level.player_spawn, world)?;
        for &spawn in &level.enemy_spawns {
            check_spawn("enemy", spawn, world)?;
        }

        let mut state = Self {
            player: Player::new(level.player_spawn, &tuning.player),
            enemies: Vec::with_capacity(level.enemy_spawns.len()),
            blocks: Vec::new(),
            camera: Camera::new(tuning.world.viewport_width, world.x),
            time_ticks: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
            next_id: 1,
            grid,
            tuning,
        };

        let spawn_cells: Vec<_> = state.grid.cells_of(CellKind::BlockSpawn).collect();
        for (col, row) in spawn_cells {
            let id = state.next_entity_id();
            let base = state.grid.cell_rect(col, row);
            state
                .blocks
                .push(ReactiveBlock::new(id, base, state.tuning.block));
        }

        for spawn in level.enemy_spawns {
            let id = state.next_entity_id();
            state
                .enemies
                .push(Enemy::new(id, spawn, &state.tuning.enemy));
        }

        state.camera.follow(state.player.rect().center_x());

        log::info!(
            "Level ready: {}x{} cells, {} blocks, {} enemies",
            state.grid.cols(),
            state.grid.rows(),
            state.blocks.len(),
            state.enemies.len()
        );
        Ok(state)
    }

    /// The immutable parameter set this run was built with
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The death sequence has completed
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enemies still taking part in the world
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }
}

fn check_spawn(what: &'static str, spawn: IVec2, world: IVec2) -> Result<(), ConfigError> {
    let inside = (0..=world.x).contains(&spawn.x) && (0..=world.y).contains(&spawn.y);
    if inside {
        Ok(())
    } else {
        Err(ConfigError::SpawnOutsideWorld {
            what,
            x: spawn.x,
            y: spawn.y,
        })
    }
}
