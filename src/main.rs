//! Headless demo driver
//!
//! Runs a scripted session against the simulation core: a simple autopilot
//! steers the nearest gap toward the most dangerous projectile, the way a
//! player would. Useful for eyeballing balance from the log stream without
//! a renderer attached.
//!
//! Run with `RUST_LOG=info cargo run` (or `debug` for spawn/despawn detail).

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use roto_dodge::sim::{Difficulty, GameEvent, GamePhase, InputSnapshot, SessionController};
use roto_dodge::{HighScores, Playfield, Tunables};

/// Frame cadence of the scripted host loop (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this many frames if the autopilot refuses to die
const MAX_FRAMES: u32 = 60 * 60 * 5;

fn main() {
    env_logger::init();

    let field = Playfield::new(800.0, 600.0);
    let mut session = SessionController::new(field, Tunables::default());
    let mut leaderboard = HighScores::new();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let difficulty = std::env::args()
        .nth(1)
        .and_then(|arg| Difficulty::from_str(&arg))
        .unwrap_or(Difficulty::Medium);

    log::info!("demo session: difficulty={} seed={seed}", difficulty.as_str());
    session.start_session(difficulty, seed, 0.0);

    let mut now = 0.0;
    let mut frames = 0u32;
    while session.phase() == GamePhase::Playing && frames < MAX_FRAMES {
        now += FRAME_MS;
        frames += 1;

        let snapshot = InputSnapshot {
            pointer: autopilot_pointer(&session),
            just_pressed: false,
            now,
        };

        for event in session.tick(&snapshot) {
            match event {
                GameEvent::Dodged { points, pos } => {
                    log::info!("dodge +{points} at ({:.0}, {:.0})", pos.x, pos.y)
                }
                GameEvent::Hit => log::info!("solid hit, session over"),
                GameEvent::Spawned { .. } => {}
            }
        }
    }

    let final_score = session.score();
    println!(
        "survived {:.1}s on {}: score {final_score}, best {}",
        now / 1000.0,
        difficulty.as_str(),
        session.best()
    );

    if leaderboard.submit(final_score as f64, difficulty, now).is_some() {
        if let Ok(json) = leaderboard.to_json() {
            println!("leaderboard: {json}");
        }
    }
}

/// Point the gap pattern at the most dangerous projectile: the active one
/// closest to the rotor. The pointer is placed on the projectile itself so
/// the rotor's first gap (at local angle 0) rotates onto its approach angle.
fn autopilot_pointer(session: &SessionController) -> Option<Vec2> {
    let snap = session.render_snapshot();
    let center = session.playfield().center();

    let gap_half = snap.gap_width / 2.0;
    snap.projectiles
        .iter()
        .min_by(|a, b| {
            let da = (a.pos - center).length_squared();
            let db = (b.pos - center).length_squared();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| {
            // Lead the aim so the middle of the gap, not its edge, meets
            // the projectile
            let angle = (p.pos.y - center.y).atan2(p.pos.x - center.x) - gap_half;
            center + Vec2::new(angle.cos(), angle.sin()) * 100.0
        })
}
