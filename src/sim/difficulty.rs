//! Deterministic difficulty scaling
//!
//! Spawn rate and projectile speed are pure functions of cumulative score.
//! Recomputing them every tick instead of on threshold crossings keeps the
//! curve correct after any state reset without extra bookkeeping.

use serde::{Deserialize, Serialize};

use crate::consts::{
    MAX_PROJECTILE_SPEED, MIN_SPAWN_RATE, SCORE_PER_LEVEL, SPAWN_RATE_DECAY, SPEED_PER_LEVEL,
};

/// Maps cumulative score to spawn rate and projectile speed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyCurve {
    base_spawn_rate: f32,
    base_speed: f32,
}

impl DifficultyCurve {
    pub fn new(base_spawn_rate: f32, base_speed: f32) -> Self {
        Self {
            base_spawn_rate,
            base_speed,
        }
    }

    /// One level per 500 points
    #[inline]
    pub fn level(score: u64) -> u32 {
        (score / SCORE_PER_LEVEL) as u32
    }

    /// Seconds between spawns, shrinking 10% per level, floored at 0.3s
    pub fn spawn_rate(&self, score: u64) -> f32 {
        (self.base_spawn_rate * SPAWN_RATE_DECAY.powi(Self::level(score) as i32))
            .max(MIN_SPAWN_RATE)
    }

    /// Projectile speed in px/s, +20 per level, capped at 500
    pub fn projectile_speed(&self, score: u64) -> f32 {
        (self.base_speed + Self::level(score) as f32 * SPEED_PER_LEVEL).min(MAX_PROJECTILE_SPEED)
    }
}
