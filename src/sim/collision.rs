//! Per-tick collision classification
//!
//! Not a persistent state machine: each tick independently scans every
//! active projectile against the rotor and classifies the in-range ones as
//! a solid hit or a dodge.
//!
//! Tie-break rule for a simultaneous multi-projectile frame: the first
//! solid hit stops the scan (at most one session-ending event per tick),
//! while dodges never stop it. Dodges collected before the hit still score,
//! so a crowded frame cannot silently drop legitimate dodges, and a
//! dodge-then-hit ambiguity cannot skip the session-ending event.

use glam::Vec2;

use crate::consts::GRACE_PERIOD_MS;
use crate::sim::projectile::ProjectilePool;
use crate::sim::rotor::Rotor;

/// What one scan of the active projectiles produced
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// Position of the projectile that struck a solid sector, if any
    pub solid_hit: Option<Vec2>,
    /// Positions of every projectile that passed through a gap this tick
    pub dodges: Vec<Vec2>,
}

/// Scan all active projectiles against the rotor.
///
/// Dodged projectiles are marked and released here; the projectile that
/// lands a solid hit stays active so the host can render the impact.
pub fn resolve(pool: &mut ProjectilePool, rotor: &Rotor, now: f64) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    for idx in 0..pool.capacity() {
        let Some(p) = pool.get(idx) else {
            continue;
        };

        // Spawns too close to the center get a short immunity window
        // instead of an unfair instant collision
        if now - p.spawned_at < GRACE_PERIOD_MS {
            continue;
        }

        let delta = p.pos - rotor.center;
        if delta.length() > rotor.radius + p.radius {
            continue;
        }

        let world_angle = delta.y.atan2(delta.x);
        if rotor.is_solid_at(world_angle) {
            outcome.solid_hit = Some(p.pos);
            break;
        }

        if !p.dodged {
            let pos = p.pos;
            if let Some(p) = pool.get_mut(idx) {
                p.dodged = true;
            }
            pool.release(idx);
            outcome.dodges.push(pos);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rotor::GapPattern;
    use std::f32::consts::{FRAC_PI_4, PI};

    const NOW: f64 = 10_000.0;
    const SPAWNED_LONG_AGO: f64 = 0.0;

    fn rotor() -> Rotor {
        // Angle 0, gaps [0,π/4) [π/2,3π/4) [π,5π/4) [3π/2,7π/4)
        Rotor::new(
            Vec2::new(400.0, 300.0),
            60.0,
            GapPattern::new(4, FRAC_PI_4),
            12.0,
            10.0,
        )
    }

    /// Place a stationary projectile at `angle`/`dist` from the rotor center
    fn place(pool: &mut ProjectilePool, rotor: &Rotor, angle: f32, dist: f32, spawned: f64) -> usize {
        let pos = rotor.center + Vec2::new(angle.cos(), angle.sin()) * dist;
        pool.acquire(pos, pos, 100.0, 8.0, spawned)
    }

    #[test]
    fn test_solid_sector_triggers_hit() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        // 3π/8 sits between the first and second gaps
        let idx = place(&mut pool, &rotor, 3.0 * PI / 8.0, 50.0, SPAWNED_LONG_AGO);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.solid_hit.is_some());
        assert!(outcome.dodges.is_empty());
        // Hit projectile stays active for the host to render
        assert!(pool.get(idx).is_some());
    }

    #[test]
    fn test_gap_sector_triggers_dodge_and_release() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        // 0.1 rad lies inside the first gap [0, π/4)
        let idx = place(&mut pool, &rotor, 0.1, 50.0, SPAWNED_LONG_AGO);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.solid_hit.is_none());
        assert_eq!(outcome.dodges.len(), 1);
        assert!(pool.get(idx).is_none(), "dodged projectile is released");
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        place(&mut pool, &rotor, 0.1, 200.0, SPAWNED_LONG_AGO);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.solid_hit.is_none());
        assert!(outcome.dodges.is_empty());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_grace_period_defers_classification() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        // Geometrically in range on a solid sector, but spawned 100ms ago
        place(&mut pool, &rotor, 3.0 * PI / 8.0, 40.0, NOW - 100.0);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.solid_hit.is_none());
        assert!(outcome.dodges.is_empty());

        // Once the window passes, the same geometry is a hit
        let outcome = resolve(&mut pool, &rotor, NOW + 150.0);
        assert!(outcome.solid_hit.is_some());
    }

    #[test]
    fn test_multiple_dodges_one_tick() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        place(&mut pool, &rotor, 0.1, 50.0, SPAWNED_LONG_AGO);
        place(&mut pool, &rotor, PI / 2.0 + 0.1, 45.0, SPAWNED_LONG_AGO);
        place(&mut pool, &rotor, PI + 0.1, 55.0, SPAWNED_LONG_AGO);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert_eq!(outcome.dodges.len(), 3);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_solid_hit_stops_scan_but_keeps_earlier_dodges() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(8);
        // Slot order is scan order: dodge, hit, then a dodge that must not
        // be processed because the hit short-circuits
        place(&mut pool, &rotor, 0.1, 50.0, SPAWNED_LONG_AGO);
        place(&mut pool, &rotor, 3.0 * PI / 8.0, 50.0, SPAWNED_LONG_AGO);
        let after = place(&mut pool, &rotor, PI + 0.1, 50.0, SPAWNED_LONG_AGO);

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.solid_hit.is_some());
        assert_eq!(outcome.dodges.len(), 1);
        assert!(pool.get(after).is_some(), "scan stopped before this one");
    }

    #[test]
    fn test_dodged_flag_blocks_double_award() {
        let rotor = rotor();
        let mut pool = ProjectilePool::new(4);
        let idx = place(&mut pool, &rotor, 0.1, 50.0, SPAWNED_LONG_AGO);

        // Simulate a projectile already marked dodged but not yet released
        pool.get_mut(idx).unwrap().dodged = true;

        let outcome = resolve(&mut pool, &rotor, NOW);
        assert!(outcome.dodges.is_empty(), "no second award for the same life");
    }
}
