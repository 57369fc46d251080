//! Fixed timestep simulation tick
//!
//! Advances the whole world by one step. The order is fixed: player, enemies,
//! contact resolution, block bounces, camera. Identical inputs from identical
//! states always produce identical results.

use serde::{Deserialize, Serialize};

use super::combat;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Held state, not an edge; jumps start on ground contact
    pub jump: bool,
    /// Run button: raises the speed cap
    pub dash: bool,
}

impl TickInput {
    /// Horizontal intent: -1 or +1 when exactly one direction is held
    pub fn direction(&self) -> Option<f32> {
        match (self.left, self.right) {
            (true, false) => Some(-1.0),
            (false, true) => Some(1.0),
            _ => None,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    // Player
    let update = state
        .player
        .update(input, &state.grid, &state.blocks, &state.tuning);
    if update.jumped {
        state.events.push(GameEvent::Jumped);
    }
    if update.fell_out {
        log::info!("Player fell out of the world at tick {}", state.time_ticks);
        state.events.push(GameEvent::PlayerDied);
    }

    // Enemies
    for enemy in state.enemies.iter_mut() {
        if enemy.update(&state.grid, &state.blocks, &state.tuning) {
            state.events.push(GameEvent::EnemyRemoved { enemy: enemy.id });
        }
    }

    // Contacts
    combat::resolve_enemies(
        &mut state.player,
        &mut state.enemies,
        &state.tuning,
        &mut state.events,
    );
    combat::resolve_block_strikes(&mut state.player, &mut state.blocks, &mut state.events);

    for block in state.blocks.iter_mut() {
        block.tick();
    }

    state.camera.follow(state.player.rect().center_x());

    // Phase
    if state.player.dead && state.phase == GamePhase::Playing {
        state.phase = GamePhase::Dying;
    }
    if update.finished {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::DeathSequenceFinished);
        log::info!("Game over after {} ticks", state.time_ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyState;
    use crate::tuning::{GameConfig, LevelConfig};
    use glam::IVec2;

    const FLOOR_TOP: i32 = 224;

    /// 20x8 cells, solid bottom row, optional `?` cells at (row, col)
    fn rows_with_blocks(blocks: &[(usize, usize)]) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = vec![vec!['.'; 20]; 7];
        rows.push(vec!['#'; 20]);
        for &(row, col) in blocks {
            rows[row][col] = '?';
        }
        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }

    fn level(rows: Vec<String>, player: IVec2, enemies: Vec<IVec2>) -> GameState {
        GameState::new(GameConfig {
            level: LevelConfig {
                rows,
                player_spawn: player,
                enemy_spawns: enemies,
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    fn jump() -> TickInput {
        TickInput {
            jump: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(TickInput::default().direction(), None);
        assert_eq!(right().direction(), Some(1.0));
        let both = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), None);
    }

    #[test]
    fn test_falling_player_lands_on_block() {
        // Block at cell (row 5, col 3): x 96..128, top edge 160
        let mut state = level(rows_with_blocks(&[(5, 3)]), IVec2::new(112, 100), vec![]);
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.player.on_ground());
        assert_eq!(state.player.rect().bottom(), 160);
        assert_eq!(state.player.vel().y, 0.0);
        assert!(!state.blocks[0].is_bouncing());
    }

    #[test]
    fn test_ground_contact_is_not_sticky() {
        let mut state = level(rows_with_blocks(&[]), IVec2::new(100, FLOOR_TOP), vec![]);
        tick(&mut state, &TickInput::default());
        assert!(state.player.on_ground());
        tick(&mut state, &jump());
        assert!(!state.player.on_ground());
    }

    #[test]
    fn test_walking_into_enemy_kills_player() {
        let mut state = level(
            rows_with_blocks(&[]),
            IVec2::new(100, FLOOR_TOP),
            vec![IVec2::new(400, FLOOR_TOP)],
        );
        let mut died = false;
        for _ in 0..120 {
            tick(&mut state, &right());
            if state.events.contains(&GameEvent::PlayerDied) {
                died = true;
                break;
            }
        }
        assert!(died);
        assert!(state.player.dead);
        assert_eq!(state.phase, GamePhase::Dying);
        assert_eq!(state.enemies[0].state, EnemyState::Patrolling);
    }

    #[test]
    fn test_walking_into_falling_enemy_side_kills_player() {
        // Enemy dropped in just ahead of the player, 24px above the floor
        let mut state = level(
            rows_with_blocks(&[]),
            IVec2::new(100, FLOOR_TOP),
            vec![IVec2::new(140, FLOOR_TOP - 24)],
        );
        let walk = state.tuning().player.walk_max_speed;
        state.player.body.vel.x = walk;

        let mut contact = None;
        for _ in 0..20 {
            tick(&mut state, &right());
            if state.events.contains(&GameEvent::PlayerDied) {
                contact = Some(state.enemies[0].body);
                break;
            }
            assert_eq!(state.player.vel().x, walk);
        }
        let enemy = contact.unwrap();
        assert!(!enemy.on_ground, "enemy must still be falling");
        assert!(enemy.vel.y > 0.0);
        assert!(state.player.dead);
        assert_eq!(state.enemies[0].state, EnemyState::Patrolling);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::EnemyStomped { .. })));
    }

    #[test]
    fn test_stomp_squashes_then_removes() {
        // Player starts 8px above the enemy's head
        let mut state = level(
            rows_with_blocks(&[]),
            IVec2::new(208, FLOOR_TOP - 40),
            vec![IVec2::new(208, FLOOR_TOP)],
        );
        let id = state.enemies[0].id;

        let mut stomped_at = None;
        for t in 1..=20 {
            tick(&mut state, &TickInput::default());
            if state.events.contains(&GameEvent::EnemyStomped { enemy: id }) {
                stomped_at = Some(t);
                break;
            }
        }
        let stomped_at = stomped_at.unwrap();
        assert!(!state.player.dead);
        assert_eq!(state.enemies[0].state, EnemyState::Squashed);
        let tuning = state.tuning();
        let bounce = -tuning.player.jump_power * tuning.combat.stomp_bounce_factor;
        assert!((state.player.vel().y - bounce).abs() < 1e-5);

        let duration = state.tuning().enemy.squash_duration;
        let mut removed_at = None;
        for t in 1..=duration + 5 {
            tick(&mut state, &TickInput::default());
            assert!(!state.player.dead, "squashed enemies are harmless");
            if state.events.contains(&GameEvent::EnemyRemoved { enemy: id }) {
                removed_at = Some(t);
            }
        }
        assert!(stomped_at > 0);
        // The stomp tick is the first squashed tick
        assert_eq!(removed_at, Some(duration - 1));
        assert_eq!(state.live_enemies().count(), 0);
    }

    #[test]
    fn test_removed_enemy_is_ignored() {
        let mut state = level(
            rows_with_blocks(&[]),
            IVec2::new(100, FLOOR_TOP),
            vec![IVec2::new(300, FLOOR_TOP)],
        );
        state.enemies[0].state = EnemyState::Removed;
        // Park the corpse right on top of the player
        state.enemies[0].body.rect = state.player.rect();
        let corpse = state.enemies[0].rect();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
            assert!(state.events.is_empty());
        }
        assert!(!state.player.dead);
        assert_eq!(state.enemies[0].rect(), corpse);
    }

    #[test]
    fn test_jump_strikes_block_above() {
        // Block at (row 4, col 5): x 160..192, underside at 160
        let mut state = level(rows_with_blocks(&[(4, 5)]), IVec2::new(176, FLOOR_TOP), vec![]);
        let block_id = state.blocks[0].id;

        let mut struck = false;
        let mut jumped = false;
        for _ in 0..12 {
            tick(&mut state, &jump());
            jumped |= state.events.contains(&GameEvent::Jumped);
            if state.events.contains(&GameEvent::BlockStruck { block: block_id }) {
                struck = true;
                break;
            }
        }
        assert!(jumped);
        assert!(struck);
        assert_eq!(state.player.vel().y, 0.0);
        assert!(state.blocks[0].is_bouncing());
        assert!(state.blocks[0].offset() < 0.0);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.blocks[0].is_bouncing());
        assert_eq!(state.blocks[0].rect(), state.blocks[0].base());
    }

    #[test]
    fn test_death_sequence_ends_run() {
        let mut state = level(
            rows_with_blocks(&[]),
            IVec2::new(100, FLOOR_TOP),
            vec![IVec2::new(200, FLOOR_TOP)],
        );
        let mut finished = false;
        for _ in 0..400 {
            tick(&mut state, &right());
            if state.events.contains(&GameEvent::DeathSequenceFinished) {
                finished = true;
                break;
            }
        }
        assert!(finished);
        assert!(state.is_over());

        tick(&mut state, &right());
        assert!(state.events.is_empty());
        let snapshot = serde_json::to_string(&state).unwrap();
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &right());
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(serde_json::to_string(&state).unwrap(), snapshot);
    }

    #[test]
    fn test_pit_fall_ends_run_at_once() {
        let mut rows = rows_with_blocks(&[]);
        rows[7] = "########....########".to_string();
        // Gap spans x 256..384
        let mut state = level(rows, IVec2::new(320, 100), vec![]);
        let mut events = Vec::new();
        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
            if state.is_over() {
                events = state.events.clone();
                break;
            }
        }
        assert_eq!(
            events,
            vec![GameEvent::PlayerDied, GameEvent::DeathSequenceFinished]
        );
    }

    #[test]
    fn test_camera_tracks_player() {
        let rows: Vec<String> = (0..8)
            .map(|r| if r == 7 { "#".repeat(60) } else { ".".repeat(60) })
            .collect();
        let mut state = level(rows, IVec2::new(100, FLOOR_TOP), vec![]);
        let max = state.camera.max_offset();
        for _ in 0..400 {
            tick(&mut state, &right());
            let wanted = state.player.rect().center_x() - state.camera.viewport_width() / 2;
            assert_eq!(state.camera.offset(), wanted.clamp(0, max));
        }
        assert!(state.camera.offset() > 0);
    }

    #[test]
    fn test_identical_inputs_are_deterministic() {
        use crate::platform::{Autopilot, InputSource};

        let run = || {
            let mut state = GameState::new(GameConfig::default()).unwrap();
            let mut pilot = Autopilot::new(42);
            let mut log = Vec::new();
            for _ in 0..900 {
                let input = pilot.poll(&state);
                tick(&mut state, &input);
                log.extend(state.events.iter().copied());
            }
            (serde_json::to_string(&state).unwrap(), log)
        };

        assert_eq!(run(), run());
    }
}
