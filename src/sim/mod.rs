//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Integer pixel positions, float velocities truncated toward zero
//! - Stable iteration order (floors, then blocks, then enemies in spawn order)
//! - No rendering or platform dependencies

pub mod block;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod grid;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use block::ReactiveBlock;
pub use camera::Camera;
pub use collision::{Body, HorizontalResponse, Solid, SolidKind, Solids};
pub use combat::{Contact, classify_contact};
pub use enemy::{Enemy, EnemyPose, EnemyState};
pub use grid::{CellKind, TileGrid};
pub use player::{Player, PlayerPose, PlayerState};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
