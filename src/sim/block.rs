//! Reactive blocks
//!
//! A block struck from below pops up and falls back to its base position. The
//! bounce runs on its own tiny integrator, independent of actor physics, so it
//! always ends in the same number of ticks no matter how often it is hit.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::BlockTuning;

/// A terrain block that bounces when struck from below
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactiveBlock {
    pub id: u32,
    /// Rest position (never changes)
    base: Rect,
    /// Vertical render/collision offset, always <= 0
    offset: f32,
    /// Bounce velocity (negative = up)
    vel: f32,
    bouncing: bool,
    params: BlockTuning,
}

impl ReactiveBlock {
    pub fn new(id: u32, base: Rect, params: BlockTuning) -> Self {
        Self {
            id,
            base,
            offset: 0.0,
            vel: 0.0,
            bouncing: false,
            params,
        }
    }

    pub fn base(&self) -> Rect {
        self.base
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_bouncing(&self) -> bool {
        self.bouncing
    }

    /// Collision rect: the base translated by the current offset
    pub fn rect(&self) -> Rect {
        self.base.offset_y(self.offset as i32)
    }

    /// Start a bounce. Hits while already bouncing are ignored.
    ///
    /// Returns true if this hit started a new bounce.
    pub fn hit_from_below(&mut self) -> bool {
        if self.bouncing {
            return false;
        }
        self.bouncing = true;
        self.vel = self.params.bounce_impulse;
        true
    }

    /// Advance the bounce by one tick
    pub fn tick(&mut self) {
        if !self.bouncing {
            self.offset = 0.0;
            return;
        }

        self.offset += self.vel;
        self.vel += self.params.bounce_gravity;

        if self.offset >= 0.0 {
            self.offset = 0.0;
            self.vel = 0.0;
            self.bouncing = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> ReactiveBlock {
        ReactiveBlock::new(1, Rect::new(64, 128, 32, 32), BlockTuning::default())
    }

    /// Ticks an undisturbed bounce takes with default tuning
    fn rest_ticks() -> u32 {
        let mut b = block();
        b.hit_from_below();
        let mut n = 0;
        while b.is_bouncing() {
            b.tick();
            n += 1;
            assert!(n < 1000, "bounce never settled");
        }
        n
    }

    #[test]
    fn test_idle_block_stays_at_base() {
        let mut b = block();
        for _ in 0..10 {
            b.tick();
        }
        assert_eq!(b.offset(), 0.0);
        assert_eq!(b.rect(), b.base());
    }

    #[test]
    fn test_bounce_rises_then_returns_exactly_to_zero() {
        let mut b = block();
        assert!(b.hit_from_below());
        b.tick();
        assert!(b.offset() < 0.0);
        assert!(b.rect().top() < b.base().top());

        let mut min_offset: f32 = 0.0;
        while b.is_bouncing() {
            b.tick();
            assert!(b.offset() <= 0.0);
            min_offset = min_offset.min(b.offset());
        }
        assert!(min_offset < -10.0);
        assert_eq!(b.offset(), 0.0);
        assert_eq!(b.rect(), b.base());
    }

    #[test]
    fn test_rehit_while_bouncing_is_ignored() {
        let mut b = block();
        assert!(b.hit_from_below());
        b.tick();
        b.tick();
        let before = (b.offset(), b.is_bouncing());
        assert!(!b.hit_from_below());
        assert_eq!((b.offset(), b.is_bouncing()), before);
    }

    #[test]
    fn test_can_bounce_again_after_settling() {
        let mut b = block();
        b.hit_from_below();
        while b.is_bouncing() {
            b.tick();
        }
        assert!(b.hit_from_below());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offset_never_positive_and_rests_on_schedule(
                strikes in proptest::collection::vec(any::<bool>(), 1..120)
            ) {
                let limit = rest_ticks();
                let mut b = block();
                let mut since_start: Option<u32> = None;

                for strike in strikes {
                    if strike && b.hit_from_below() {
                        since_start = Some(0);
                    }
                    b.tick();
                    prop_assert!(b.offset() <= 0.0);

                    if let Some(n) = since_start.as_mut() {
                        *n += 1;
                        if *n >= limit {
                            prop_assert!(!b.is_bouncing());
                            prop_assert_eq!(b.offset(), 0.0);
                            since_start = None;
                        }
                    }
                }
            }
        }
    }
}
