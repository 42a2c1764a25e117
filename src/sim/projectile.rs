//! Projectiles and the pool that owns them
//!
//! Every projectile slot is owned by the pool for its whole life and is in
//! exactly one of two disjoint sets at any time: `free` (inactive, awaiting
//! reuse) or active. Acquisition pops a free slot and resets it, growing the
//! slab only when no free slot exists, which keeps steady-state per-frame
//! allocation at zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Playfield;
use crate::consts::DESPAWN_MARGIN;

/// A single moving entity, always pool-owned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub target: Vec2,
    /// Derived once at acquisition from (target - origin), never recomputed
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// False means the slot sits on the free list and must not be referenced
    pub active: bool,
    /// Transitions false -> true at most once per lifetime; guards against
    /// double-scoring within a single tick
    pub dodged: bool,
    /// Monotonic host timestamp at acquisition (ms)
    pub spawned_at: f64,
}

impl Projectile {
    fn idle() -> Self {
        Self {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 0.0,
            speed: 0.0,
            active: false,
            dodged: false,
            spawned_at: 0.0,
        }
    }

    fn reset(&mut self, origin: Vec2, target: Vec2, speed: f32, radius: f32, now: f64) {
        // normalize_or_zero: a degenerate origin==target spawn gets zero
        // velocity instead of a division by zero
        let dir = (target - origin).normalize_or_zero();
        self.pos = origin;
        self.target = target;
        self.vel = dir * speed;
        self.radius = radius;
        self.speed = speed;
        self.active = true;
        self.dodged = false;
        self.spawned_at = now;
    }
}

/// Fixed-growth object pool over a slab of projectile slots
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    free: Vec<usize>,
}

impl ProjectilePool {
    /// Pre-allocate `capacity` free slots
    pub fn new(capacity: usize) -> Self {
        let slots = vec![Projectile::idle(); capacity];
        // Reverse so early acquisitions hand out low indices first
        let free = (0..capacity).rev().collect();
        Self { slots, free }
    }

    /// Take a slot, reset it, and return its handle. Never fails: when the
    /// free list is empty the slab grows by one slot.
    pub fn acquire(&mut self, origin: Vec2, target: Vec2, speed: f32, radius: f32, now: f64) -> usize {
        let idx = match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push(Projectile::idle());
                log::debug!("projectile pool grew to {} slots", self.slots.len());
                self.slots.len() - 1
            }
        };
        self.slots[idx].reset(origin, target, speed, radius, now);
        idx
    }

    /// Return a slot to the free list. Releasing an inactive slot is a
    /// no-op, so double-release cannot corrupt the free list.
    pub fn release(&mut self, idx: usize) {
        let Some(p) = self.slots.get_mut(idx) else {
            return;
        };
        if !p.active {
            return;
        }
        p.active = false;
        self.free.push(idx);
    }

    /// Active projectile at `idx`, if any
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Projectile> {
        self.slots.get(idx).filter(|p| p.active)
    }

    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Projectile> {
        self.slots.get_mut(idx).filter(|p| p.active)
    }

    /// Number of slots (active + free)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Iterate active projectiles with their handles
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
    }

    /// Integrate every active projectile by `vel * dt`, reclaiming any that
    /// leaves the playfield by more than the despawn margin.
    ///
    /// Bounds reclamation is the sole path home for projectiles that fly
    /// off-screen without ever entering collision range: they vanish
    /// uncounted, neither scored nor penalized.
    pub fn integrate(&mut self, dt: f32, field: &Playfield) {
        for idx in 0..self.slots.len() {
            if !self.slots[idx].active {
                continue;
            }
            let p = &mut self.slots[idx];
            p.pos += p.vel * dt;
            if !field.contains(p.pos, DESPAWN_MARGIN) {
                log::debug!("projectile {idx} left bounds at {:?}", p.pos);
                self.release(idx);
            }
        }
    }

    /// Release everything. Called at session start so no projectile from a
    /// previous session survives into the next.
    pub fn clear(&mut self) {
        for idx in 0..self.slots.len() {
            self.release(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    #[test]
    fn test_acquire_derives_velocity_once() {
        let mut pool = ProjectilePool::new(4);
        let idx = pool.acquire(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 50.0, 8.0, 0.0);
        let p = pool.get(idx).unwrap();
        assert!((p.vel.x - 50.0).abs() < 1e-4);
        assert!(p.vel.y.abs() < 1e-4);
        assert!(p.active);
        assert!(!p.dodged);
    }

    #[test]
    fn test_degenerate_spawn_has_zero_velocity() {
        let mut pool = ProjectilePool::new(4);
        let origin = Vec2::new(400.0, 300.0);
        let idx = pool.acquire(origin, origin, 50.0, 8.0, 0.0);
        assert_eq!(pool.get(idx).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_pool_grows_past_capacity() {
        let mut pool = ProjectilePool::new(50);
        for _ in 0..50 {
            pool.acquire(Vec2::ZERO, Vec2::new(400.0, 300.0), 50.0, 8.0, 0.0);
        }
        assert_eq!(pool.capacity(), 50);
        assert_eq!(pool.active_count(), 50);

        // 51st acquisition allocates a fresh slot instead of failing
        let idx = pool.acquire(Vec2::ZERO, Vec2::new(400.0, 300.0), 50.0, 8.0, 0.0);
        assert_eq!(pool.capacity(), 51);
        assert!(pool.get(idx).unwrap().active);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = ProjectilePool::new(4);
        let idx = pool.acquire(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0, 8.0, 0.0);
        pool.release(idx);
        let free_before = pool.capacity() - pool.active_count();
        pool.release(idx);
        pool.release(999); // out of range is equally harmless
        assert_eq!(pool.capacity() - pool.active_count(), free_before);
    }

    #[test]
    fn test_released_slot_is_reused() {
        let mut pool = ProjectilePool::new(1);
        let a = pool.acquire(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0, 8.0, 0.0);
        pool.release(a);
        let b = pool.acquire(Vec2::ZERO, Vec2::new(1.0, 0.0), 10.0, 8.0, 5.0);
        assert_eq!(a, b);
        assert_eq!(pool.capacity(), 1);
        // Reset cleared the stale dodged/timestamp state
        let p = pool.get(b).unwrap();
        assert!(!p.dodged);
        assert_eq!(p.spawned_at, 5.0);
    }

    #[test]
    fn test_integrate_moves_and_reclaims() {
        let mut pool = ProjectilePool::new(4);
        let moving = pool.acquire(
            Vec2::new(100.0, 300.0),
            Vec2::new(400.0, 300.0),
            60.0,
            8.0,
            0.0,
        );
        let leaving = pool.acquire(
            Vec2::new(-60.0, 300.0),
            Vec2::new(-400.0, 300.0),
            60.0,
            8.0,
            0.0,
        );

        pool.integrate(0.5, &field());

        // Moved exactly vel * dt
        let p = pool.get(moving).unwrap();
        assert!((p.pos.x - 130.0).abs() < 1e-3);

        // Past the despawn margin: released, not left active with a stale position
        assert!(pool.get(leaving).is_none());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_clear_returns_everything() {
        let mut pool = ProjectilePool::new(8);
        for _ in 0..5 {
            pool.acquire(Vec2::ZERO, Vec2::new(1.0, 1.0), 10.0, 8.0, 0.0);
        }
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), 8);
        assert_eq!(pool.iter_active().count(), 0);
    }
}
