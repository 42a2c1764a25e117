//! Session orchestration: the per-tick game loop driver
//!
//! One [`SessionController`] owns the pool, rotor, spawner, score engine,
//! and difficulty curve by explicit injection; there is no global engine
//! instance. The host calls [`SessionController::tick`] once per rendered
//! frame with a fresh input snapshot and consumes the returned events.
//!
//! Per-tick order is fixed: spawn, projectile integration, rotor
//! integration, collision resolution, difficulty recompute. Collision
//! resolution has to see this tick's projectile positions and this tick's
//! rotor angle, so the order is an invariant, not a preference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DT, MAX_DT};
use crate::sim::collision;
use crate::sim::difficulty::DifficultyCurve;
use crate::sim::projectile::ProjectilePool;
use crate::sim::rotor::{GapPattern, Rotor};
use crate::sim::score::{Difficulty, ScoreEngine};
use crate::sim::spawn::SpawnController;
use crate::tuning::Tunables;
use crate::Playfield;

/// Simulation phase; only transitions relevant to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed but no session started yet
    Idle,
    /// Active session
    Playing,
    /// Session ended by a solid hit; waits for the next `start_session`
    GameOver,
}

/// Discrete events emitted during a tick, in occurrence order.
/// Collaborators (particles, audio, haptics, persistence) subscribe by
/// draining the slice returned from [`SessionController::tick`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile entered the field
    Spawned { pos: Vec2 },
    /// A projectile passed through a gap
    Dodged { points: u64, pos: Vec2 },
    /// A projectile struck a solid sector; the session is over
    Hit,
}

/// Input sample for one tick, already fused/debounced by the host input
/// layer. Non-finite values are treated as "no input this tick".
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Primary pointer position in playfield coordinates
    pub pointer: Option<Vec2>,
    /// Pressed-state edge from the host, reserved for host-level gestures;
    /// the core only steers by the pointer
    pub just_pressed: bool,
    /// Monotonic clock sample (ms)
    pub now: f64,
}

/// One active projectile, render-ready
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    /// Hosts color projectiles by speed
    pub speed: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub rotor_angle: f32,
    pub rotor_radius: f32,
    pub gap_count: usize,
    pub gap_width: f32,
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub best: u64,
}

/// Owns the whole simulation for one playfield
#[derive(Debug)]
pub struct SessionController {
    field: Playfield,
    tunables: Tunables,
    pool: ProjectilePool,
    rotor: Rotor,
    spawner: SpawnController,
    score: ScoreEngine,
    curve: DifficultyCurve,
    phase: GamePhase,
    current_spawn_rate: f32,
    current_projectile_speed: f32,
    session_started_at: f64,
    /// Previous tick's clock sample; `None` forces a fresh default dt,
    /// which is how pause/resume discards time accumulated while paused
    last_now: Option<f64>,
    events: Vec<GameEvent>,
}

impl SessionController {
    /// Construction fails fast on invalid tunables (zero gap count,
    /// overlapping gaps, non-positive radii); those are programmer errors,
    /// not runtime states.
    pub fn new(field: Playfield, tunables: Tunables) -> Self {
        let gaps = GapPattern::new(tunables.gap_count, tunables.gap_width);
        let rotor = Rotor::new(
            field.center(),
            tunables.rotor_radius,
            gaps,
            tunables.max_angular_speed,
            tunables.angular_accel,
        );
        let curve = DifficultyCurve::new(tunables.base_spawn_rate, tunables.base_projectile_speed);
        Self {
            pool: ProjectilePool::new(tunables.pool_capacity),
            rotor,
            spawner: SpawnController::new(0),
            score: ScoreEngine::new(tunables.base_points),
            curve,
            phase: GamePhase::Idle,
            current_spawn_rate: tunables.base_spawn_rate,
            current_projectile_speed: tunables.base_projectile_speed,
            session_started_at: 0.0,
            last_now: None,
            events: Vec::new(),
            field,
            tunables,
        }
    }

    /// Reset all session state and begin playing. The pool is cleared, not
    /// recreated, so slots from the previous session are reused.
    pub fn start_session(&mut self, difficulty: Difficulty, seed: u64, now: f64) {
        self.pool.clear();
        self.rotor = Rotor::new(
            self.field.center(),
            self.tunables.rotor_radius,
            GapPattern::new(self.tunables.gap_count, self.tunables.gap_width),
            self.tunables.max_angular_speed,
            self.tunables.angular_accel,
        );
        self.spawner.reset(seed);
        self.score.reset(difficulty);
        self.current_spawn_rate = self.curve.spawn_rate(0);
        self.current_projectile_speed = self.curve.projectile_speed(0);
        self.session_started_at = now;
        self.last_now = None;
        self.events.clear();
        self.phase = GamePhase::Playing;
        log::info!(
            "session started: difficulty={} seed={seed}",
            difficulty.as_str()
        );
    }

    /// Host stopped ticking. Discards the accumulated interval so the first
    /// post-resume tick advances by a fresh default dt instead of catching
    /// up missed time.
    pub fn pause(&mut self) {
        self.last_now = None;
    }

    /// Advance one frame. Returns this tick's events in occurrence order.
    pub fn tick(&mut self, input: &InputSnapshot) -> &[GameEvent] {
        self.events.clear();
        if self.phase != GamePhase::Playing {
            return &self.events;
        }

        let dt = self.derive_dt(input.now);

        // 1. Spawn
        if let Some(idx) = self.spawner.tick(
            dt,
            self.current_spawn_rate,
            self.current_projectile_speed,
            self.tunables.projectile_radius,
            &mut self.pool,
            &self.field,
            &self.rotor,
            input.now,
        ) && let Some(p) = self.pool.get(idx)
        {
            self.events.push(GameEvent::Spawned { pos: p.pos });
        }

        // 2. Projectile integration and bounds reclamation
        self.pool.integrate(dt, &self.field);

        // 3. Rotor integration from this tick's input sample
        match self.pointer_angle(input) {
            Some(target) => self.rotor.rotate_toward(target, dt),
            None => self.rotor.coast(dt),
        }

        // 4. Collision resolution. Dodges found before a solid hit in the
        // same scan score first; the combo reset on the hit comes after.
        let outcome = collision::resolve(&mut self.pool, &self.rotor, input.now);
        for pos in outcome.dodges {
            let points = self.score.on_dodge();
            self.events.push(GameEvent::Dodged { points, pos });
        }
        if outcome.solid_hit.is_some() {
            self.score.on_solid_hit();
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::Hit);
            log::info!(
                "session over: score={} best={}",
                self.score.score(),
                self.score.best()
            );
        }

        // 5. Difficulty recompute from the updated score
        let score = self.score.score();
        self.current_spawn_rate = self.curve.spawn_rate(score);
        self.current_projectile_speed = self.curve.projectile_speed(score);

        &self.events
    }

    /// Clamped delta since the previous sample. A 500ms stall becomes a
    /// 33ms step; anything non-finite becomes a default step with the
    /// previous sample left untouched.
    fn derive_dt(&mut self, now: f64) -> f32 {
        if !now.is_finite() {
            return DEFAULT_DT;
        }
        let dt = match self.last_now {
            Some(prev) => (((now - prev) / 1000.0) as f32).clamp(0.0, MAX_DT),
            None => DEFAULT_DT,
        };
        self.last_now = Some(now);
        dt
    }

    /// Angular target derived from the pointer relative to the rotor center
    fn pointer_angle(&self, input: &InputSnapshot) -> Option<f32> {
        let p = input.pointer?;
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        let delta = p - self.rotor.center;
        Some(delta.y.atan2(delta.x))
    }

    /// Render-ready copy of the visible state
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            rotor_angle: self.rotor.angle,
            rotor_radius: self.rotor.radius,
            gap_count: self.rotor.gaps().gap_count(),
            gap_width: self.rotor.gaps().gap_width(),
            projectiles: self
                .pool
                .iter_active()
                .map(|(_, p)| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                    speed: p.speed,
                })
                .collect(),
            score: self.score.score(),
            combo: self.score.combo(),
            multiplier: self.score.multiplier(),
            best: self.score.best(),
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score.score()
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.score.best()
    }

    #[inline]
    pub fn playfield(&self) -> Playfield {
        self.field
    }

    #[inline]
    pub fn session_started_at(&self) -> f64 {
        self.session_started_at
    }
}
