//! Data-driven game balance
//!
//! Every knob the simulation reads at construction time lives here, so hosts
//! and tests can rebalance a session without recompiling the core.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs injected into [`crate::sim::SessionController`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tunables {
    // === Rotor ===
    /// Collision radius of the rotor (px)
    pub rotor_radius: f32,
    /// Number of equally spaced gap sectors
    pub gap_count: usize,
    /// Angular width of each gap (radians)
    pub gap_width: f32,
    /// Angular speed cap (radians/sec)
    pub max_angular_speed: f32,
    /// Gain applied to the angular error when tracking the pointer
    pub angular_accel: f32,

    // === Projectiles ===
    /// Collision radius of a projectile (px)
    pub projectile_radius: f32,
    /// Projectile speed at difficulty level 0 (px/sec)
    pub base_projectile_speed: f32,
    /// Seconds between spawns at difficulty level 0
    pub base_spawn_rate: f32,
    /// Pool slots pre-allocated at construction
    pub pool_capacity: usize,

    // === Scoring ===
    /// Points awarded per dodge before multipliers
    pub base_points: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            rotor_radius: ROTOR_RADIUS,
            gap_count: ROTOR_GAP_COUNT,
            gap_width: ROTOR_GAP_WIDTH,
            max_angular_speed: ROTOR_MAX_ANGULAR_SPEED,
            angular_accel: ROTOR_ACCEL_FACTOR,
            projectile_radius: PROJECTILE_RADIUS,
            base_projectile_speed: BASE_PROJECTILE_SPEED,
            base_spawn_rate: BASE_SPAWN_RATE,
            pool_capacity: POOL_CAPACITY,
            base_points: BASE_POINTS,
        }
    }
}
