//! Time-driven projectile emission
//!
//! One accumulating timer against the current spawn interval; when it fills,
//! one projectile is emitted from a random point just outside one of the four
//! playfield edges, aimed at the rotor center.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{SAFE_SPAWN_BUFFER, SAFE_SPAWN_RETRIES, SPAWN_EDGE_MARGIN};
use crate::sim::projectile::ProjectilePool;
use crate::sim::rotor::Rotor;
use crate::Playfield;

/// Emits projectiles on a timer with a seeded RNG stream
#[derive(Debug)]
pub struct SpawnController {
    timer: f32,
    rng: Pcg32,
}

impl SpawnController {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset the timer and reseed the stream for a fresh session
    pub fn reset(&mut self, seed: u64) {
        self.timer = 0.0;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Advance the timer; at most one projectile is emitted per tick.
    /// Returns the pool handle of the spawned projectile, if any.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        dt: f32,
        spawn_rate: f32,
        projectile_speed: f32,
        projectile_radius: f32,
        pool: &mut ProjectilePool,
        field: &Playfield,
        rotor: &Rotor,
        now: f64,
    ) -> Option<usize> {
        self.timer += dt;
        if self.timer < spawn_rate {
            return None;
        }
        self.timer = 0.0;

        let origin = self.pick_spawn_point(field, rotor, projectile_radius);
        let idx = pool.acquire(origin, rotor.center, projectile_speed, projectile_radius, now);
        log::debug!("spawned projectile {idx} at {origin:?}");
        Some(idx)
    }

    /// Uniform edge pick, uniform position along the edge, offset outside
    /// the field by a fixed margin.
    fn pick_spawn_point(&mut self, field: &Playfield, rotor: &Rotor, projectile_radius: f32) -> Vec2 {
        let t: f32 = self.rng.random_range(0.0..1.0);
        let mut pos = match self.rng.random_range(0..4u8) {
            0 => Vec2::new(t * field.width, -SPAWN_EDGE_MARGIN), // top
            1 => Vec2::new(t * field.width, field.height + SPAWN_EDGE_MARGIN), // bottom
            2 => Vec2::new(-SPAWN_EDGE_MARGIN, t * field.height), // left
            _ => Vec2::new(field.width + SPAWN_EDGE_MARGIN, t * field.height), // right
        };

        // Best-effort minimum clearance from the rotor: push the point
        // radially outward along the center->point ray, a bounded number of
        // times, then clamp back into the expanded bounds. The clamp does
        // not re-verify the distance; on extreme aspect ratios a spawn can
        // still land inside the nominal safe zone, and the grace period
        // covers that case.
        let min_dist = rotor.radius + projectile_radius + SAFE_SPAWN_BUFFER;
        for _ in 0..SAFE_SPAWN_RETRIES {
            let delta = pos - rotor.center;
            let dist = delta.length();
            if dist >= min_dist {
                break;
            }
            pos += delta.normalize_or_zero() * (min_dist - dist).max(1.0);
        }
        field.clamp(pos, SPAWN_EDGE_MARGIN)
    }
}
