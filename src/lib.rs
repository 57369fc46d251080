//! Plumber Sim - a tile-based platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, entity state)
//! - `renderer`: Render-agnostic frame description handed to a drawing backend
//! - `platform`: Input sources and fixed-step pacing
//! - `tuning`: Data-driven game balance and level description

pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{GameConfig, LevelConfig, Tuning};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per displayed frame)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Pixel scale applied to the 256x240 base resolution
    pub const SCALE: f32 = 2.0;
    /// Viewport size in pixels
    pub const VIEWPORT_WIDTH: i32 = 256 * SCALE as i32;
    pub const VIEWPORT_HEIGHT: i32 = 240 * SCALE as i32;

    /// Edge length of one grid cell in pixels
    pub const TILE_SIZE: i32 = 16 * SCALE as i32;

    /// Default level dimensions in cells
    pub const DEFAULT_LEVEL_COLS: usize = 64;
    pub const DEFAULT_LEVEL_ROWS: usize = 15;
}
