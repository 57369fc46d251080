//! Cross-entity contact rules
//!
//! Player vs enemy: a falling, top-first touch is a stomp; anything else kills
//! the player. Player vs block: a head crossing a block's underside while
//! rising strikes it.

use super::block::ReactiveBlock;
use super::enemy::Enemy;
use super::player::Player;
use super::rect::Rect;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// How an overlapping player/enemy pair is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Enemy is squashed, player bounces
    Stomp,
    /// Player dies
    Lethal,
}

/// Classify an overlapping contact.
///
/// Only the vertical gap and center ordering are compared; horizontal overlap
/// depth is not, so a mostly-sideways touch can still count as a stomp.
pub fn classify_contact(
    player: Rect,
    player_vy: f32,
    enemy: Rect,
    stomp_threshold: i32,
) -> Contact {
    let falling = player_vy > 0.0;
    let near_top = player.bottom() - enemy.top() < stomp_threshold;
    let above = player.center_y() < enemy.center_y();
    if falling && near_top && above {
        Contact::Stomp
    } else {
        Contact::Lethal
    }
}

/// Resolve the player against every active enemy, in order
pub fn resolve_enemies(
    player: &mut Player,
    enemies: &mut [Enemy],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    // Classified against the speed the player arrived with, so a bounce off
    // one enemy does not turn a simultaneous second stomp into a death
    let arrival_vy = player.vel().y;

    for enemy in enemies.iter_mut() {
        if player.dead {
            return;
        }
        if !enemy.is_active() || !player.rect().overlaps(&enemy.rect()) {
            continue;
        }

        match classify_contact(
            player.rect(),
            arrival_vy,
            enemy.rect(),
            tuning.combat.stomp_threshold,
        ) {
            Contact::Stomp => {
                if enemy.squash() {
                    player.bounce(tuning);
                    events.push(GameEvent::EnemyStomped { enemy: enemy.id });
                }
            }
            Contact::Lethal => {
                if player.die(&tuning.player) {
                    events.push(GameEvent::PlayerDied);
                }
            }
        }
    }
}

/// Strike any block whose underside the player's head crossed this tick
pub fn resolve_block_strikes(
    player: &mut Player,
    blocks: &mut [ReactiveBlock],
    events: &mut Vec<GameEvent>,
) {
    if player.dead {
        return;
    }

    for block in blocks.iter_mut() {
        if player.vel().y >= 0.0 {
            return;
        }
        let underside = block.rect().bottom();
        let head = player.rect();
        let crossed = player.prev_top() >= underside && head.top() <= underside;
        if !crossed || !head.overlaps_x(&block.rect()) {
            continue;
        }

        if block.hit_from_below() {
            log::debug!("block {} struck", block.id);
            events.push(GameEvent::BlockStruck { block: block.id });
        }
        // The collision pass left vy alone for this; consume it now
        player.body.vel.y = 0.0;
    }
}
