//! Roto Dodge - a rotate-the-gap arcade game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rotor, projectiles, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Score validation and leaderboard boundary
//!
//! Rendering, raw input plumbing, storage I/O, and haptics are host
//! collaborators: the core consumes one [`sim::InputSnapshot`] per frame and
//! emits typed [`sim::GameEvent`]s plus a render-ready snapshot.

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use sim::{Difficulty, GameEvent, GamePhase, InputSnapshot, SessionController};
pub use tuning::Tunables;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Delta-time clamp ceiling (seconds). Uncapped dt after a stall would
    /// let a projectile tunnel through the rotor's collision radius.
    pub const MAX_DT: f32 = 0.033;
    /// Delta time assumed for the first tick after a start/resume (seconds)
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;

    /// Post-spawn window during which a projectile cannot be classified (ms)
    pub const GRACE_PERIOD_MS: f64 = 200.0;

    /// Rotor defaults
    pub const ROTOR_RADIUS: f32 = 60.0;
    pub const ROTOR_GAP_COUNT: usize = 4;
    pub const ROTOR_GAP_WIDTH: f32 = std::f32::consts::FRAC_PI_4;
    /// Angular speed cap (radians/sec)
    pub const ROTOR_MAX_ANGULAR_SPEED: f32 = 12.0;
    /// Gain applied to the angular error when tracking the pointer
    pub const ROTOR_ACCEL_FACTOR: f32 = 10.0;
    /// Per-tick angular velocity decay while uncontrolled
    pub const ROTOR_FRICTION: f32 = 0.9;
    /// Angular velocity below this snaps to zero
    pub const ROTOR_SPIN_EPSILON: f32 = 0.001;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const BASE_PROJECTILE_SPEED: f32 = 120.0;
    pub const MAX_PROJECTILE_SPEED: f32 = 500.0;

    /// Spawning
    pub const POOL_CAPACITY: usize = 50;
    pub const BASE_SPAWN_RATE: f32 = 1.2;
    pub const MIN_SPAWN_RATE: f32 = 0.3;
    /// How far outside the playfield edge projectiles spawn (px)
    pub const SPAWN_EDGE_MARGIN: f32 = 24.0;
    /// Extra clearance on top of the combined collision radii (px)
    pub const SAFE_SPAWN_BUFFER: f32 = 40.0;
    /// Radial push attempts before the spawn point is clamped as-is
    pub const SAFE_SPAWN_RETRIES: u32 = 8;
    /// Projectiles this far past the playfield edge are reclaimed (px)
    pub const DESPAWN_MARGIN: f32 = 64.0;

    /// Scoring
    pub const BASE_POINTS: u64 = 10;
    pub const COMBO_PER_MULTIPLIER: u32 = 10;
    pub const MAX_COMBO_MULTIPLIER: u32 = 5;
    /// Scores above this are rejected at the persistence boundary
    pub const MAX_PLAUSIBLE_SCORE: u64 = 1_000_000;

    /// Difficulty curve
    pub const SCORE_PER_LEVEL: u64 = 500;
    pub const SPAWN_RATE_DECAY: f32 = 0.9;
    pub const SPEED_PER_LEVEL: f32 = 20.0;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Wrap angle to [0, 2π)
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::TAU;
    while angle >= TAU {
        angle -= TAU;
    }
    while angle < 0.0 {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// The rectangular play area. The rotor sits at its center; projectiles
/// spawn just outside its edges and are reclaimed once they leave it by
/// more than a margin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "playfield dimensions must be positive"
        );
        Self { width, height }
    }

    /// Screen center, where the rotor lives
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` is inside the field expanded by `margin` on every side
    #[inline]
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }

    /// Clamp `pos` into the field expanded by `margin`
    #[inline]
    pub fn clamp(&self, pos: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(-margin, self.width + margin),
            pos.y.clamp(-margin, self.height + margin),
        )
    }
}
