//! Platform abstraction layer
//!
//! Handles what sits between a host loop and the simulation:
//! - Input sources (scripted playback, seeded autopilot)
//! - Fixed-step pacing from variable host frame times

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::sim::{GameState, TickInput};

/// Anything that can produce one tick's input
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Replays a fixed input list, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    /// Parse a JSON array of inputs, one per tick
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }
}

/// Distance ahead at which the autopilot hops over an enemy
const ENEMY_LOOKAHEAD: i32 = 96;

/// Demo player: runs right, jumps over enemies and walls, and throws in
/// random hops and dashes. Fully determined by its seed and the state.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Ticks left to keep jump held
    jump_hold: u32,
    dash: bool,
    last_x: Option<i32>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            jump_hold: 0,
            dash: false,
            last_x: None,
        }
    }

    fn enemy_ahead(state: &GameState) -> bool {
        let player = state.player.rect();
        state
            .enemies
            .iter()
            .filter(|e| e.is_active())
            .any(|e| {
                let gap = e.rect().left() - player.right();
                (0..ENEMY_LOOKAHEAD).contains(&gap)
            })
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let player = &state.player;
        let x = player.rect().x;
        let stuck = self.last_x == Some(x);
        self.last_x = Some(x);

        if self.rng.random_bool(0.01) {
            self.dash = !self.dash;
        }

        if self.jump_hold > 0 {
            self.jump_hold -= 1;
        } else if player.on_ground()
            && (Self::enemy_ahead(state) || stuck || self.rng.random_bool(0.02))
        {
            self.jump_hold = self.rng.random_range(4..=12);
        }

        TickInput {
            left: false,
            right: true,
            jump: self.jump_hold > 0,
            dash: self.dash,
        }
    }
}

/// Converts variable host frame times into a whole number of fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed seconds; returns how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Fell behind; drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::tick;

    fn state() -> GameState {
        GameState::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_scripted_input_replays_then_idles() {
        let state = state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let mut script = ScriptedInput::new(vec![jump, jump]);
        assert_eq!(script.len(), 2);
        assert_eq!(script.poll(&state), jump);
        assert_eq!(script.poll(&state), jump);
        assert_eq!(script.poll(&state), TickInput::default());
    }

    #[test]
    fn test_scripted_input_from_json() {
        let json = r#"[{"right": true, "left": false, "jump": false, "dash": true}]"#;
        let script = ScriptedInput::from_json(json).unwrap();
        assert_eq!(script.len(), 1);
        assert!(ScriptedInput::from_json("{").is_err());
        assert!(ScriptedInput::default().is_empty());
    }

    #[test]
    fn test_autopilot_same_seed_same_inputs() {
        let state = state();
        let mut a = Autopilot::new(7);
        let mut b = Autopilot::new(7);
        for _ in 0..200 {
            assert_eq!(a.poll(&state), b.poll(&state));
        }
    }

    #[test]
    fn test_autopilot_makes_progress() {
        let mut state = state();
        let start = state.player.rect().x;
        let mut pilot = Autopilot::new(3);
        for _ in 0..120 {
            let input = pilot.poll(&state);
            assert!(input.right && !input.left);
            tick(&mut state, &input);
        }
        assert!(state.player.dead || state.player.rect().x > start);
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
        // Leftover fraction carries into the next frame
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.5), 1);
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(1.0), MAX_SUBSTEPS);
        // Backlog beyond one tick is dropped
        assert_eq!(step.advance(-1.0), 1);
        assert_eq!(step.advance(0.0), 0);
    }
}
