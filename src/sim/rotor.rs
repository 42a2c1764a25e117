//! The player's rotor: a circle at screen center with open gap sectors
//!
//! In rotor-local polar coordinates the gap pattern is fixed at
//! construction: `gap_count` equal gaps of `gap_width` radians, spaced at
//! 2π/`gap_count` intervals starting at local angle 0. The complement is
//! solid. The pattern never changes during a session; only the rotor's
//! world angle does.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::{ROTOR_FRICTION, ROTOR_SPIN_EPSILON};
use crate::{normalize_angle, wrap_angle};

/// Immutable gap layout in rotor-local angle space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GapPattern {
    gap_count: usize,
    gap_width: f32,
}

impl GapPattern {
    /// Equal spacing is a fairness invariant: gaps start at local angle 0
    /// and repeat every 2π/`gap_count` radians.
    pub fn new(gap_count: usize, gap_width: f32) -> Self {
        assert!(gap_count > 0, "gap count must be at least 1");
        assert!(gap_width > 0.0, "gap width must be positive");
        assert!(
            gap_width <= TAU / gap_count as f32,
            "gaps must not overlap their neighbors"
        );
        Self {
            gap_count,
            gap_width,
        }
    }

    #[inline]
    pub fn gap_count(&self) -> usize {
        self.gap_count
    }

    #[inline]
    pub fn gap_width(&self) -> f32 {
        self.gap_width
    }

    /// Angular distance between consecutive gap starts
    #[inline]
    pub fn spacing(&self) -> f32 {
        TAU / self.gap_count as f32
    }

    /// True if `local_angle` falls inside any gap interval. Handles the
    /// wraparound case where a gap's end crosses 2π.
    pub fn contains(&self, local_angle: f32) -> bool {
        let local = wrap_angle(local_angle);
        let spacing = self.spacing();

        for i in 0..self.gap_count {
            let start = i as f32 * spacing;
            let end = start + self.gap_width;
            if end <= TAU {
                if local >= start && local < end {
                    return true;
                }
            } else if local >= start || local < end - TAU {
                return true;
            }
        }
        false
    }
}

/// The avatar: fixed center, continuous rotation state, gap pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rotor {
    /// Screen center, fixed for the session
    pub center: Vec2,
    /// Current world angle, wrapped to [0, 2π)
    pub angle: f32,
    /// Angular velocity (radians/sec)
    pub angular_vel: f32,
    /// Collision radius
    pub radius: f32,
    gaps: GapPattern,
    max_angular_speed: f32,
    angular_accel: f32,
}

impl Rotor {
    pub fn new(
        center: Vec2,
        radius: f32,
        gaps: GapPattern,
        max_angular_speed: f32,
        angular_accel: f32,
    ) -> Self {
        assert!(radius > 0.0, "rotor radius must be positive");
        Self {
            center,
            angle: 0.0,
            angular_vel: 0.0,
            radius,
            gaps,
            max_angular_speed,
            angular_accel,
        }
    }

    #[inline]
    pub fn gaps(&self) -> &GapPattern {
        &self.gaps
    }

    /// Steer toward `target_angle` along the shortest arc.
    ///
    /// Angular speed is proportional to the remaining error, capped at
    /// `max_angular_speed`, so the rotor decelerates into the target
    /// instead of oscillating around it.
    pub fn rotate_toward(&mut self, target_angle: f32, dt: f32) {
        let diff = normalize_angle(target_angle - self.angle);
        let speed = (diff.abs() * self.angular_accel).min(self.max_angular_speed);
        self.angular_vel = speed * diff.signum();
        self.angle = wrap_angle(self.angle + self.angular_vel * dt);
    }

    /// Advance with no input: spin decays toward a full stop.
    ///
    /// The epsilon snap guarantees the rotor actually stops rather than
    /// drifting forever on floating-point noise.
    pub fn coast(&mut self, dt: f32) {
        self.angular_vel *= ROTOR_FRICTION;
        if self.angular_vel.abs() < ROTOR_SPIN_EPSILON {
            self.angular_vel = 0.0;
        }
        self.angle = wrap_angle(self.angle + self.angular_vel * dt);
    }

    /// Classify a world angle against the current rotation: true if it
    /// lands on a solid sector, false if it lands in a gap.
    ///
    /// Pure query, shared by collision classification and rendering so the
    /// two can never diverge.
    #[inline]
    pub fn is_solid_at(&self, world_angle: f32) -> bool {
        let local = wrap_angle(world_angle - self.angle);
        !self.gaps.contains(local)
    }
}
