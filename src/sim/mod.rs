//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time supplied externally, one monotonic sample per tick
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod projectile;
pub mod rotor;
pub mod score;
pub mod session;
pub mod spawn;

pub use collision::{CollisionOutcome, resolve};
pub use difficulty::DifficultyCurve;
pub use projectile::{Projectile, ProjectilePool};
pub use rotor::{GapPattern, Rotor};
pub use score::{Difficulty, ScoreEngine};
pub use session::{
    GameEvent, GamePhase, InputSnapshot, ProjectileView, RenderSnapshot, SessionController,
};
pub use spawn::SpawnController;
