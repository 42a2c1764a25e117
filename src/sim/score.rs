//! Combo, multiplier, and point accumulation
//!
//! Score, combo, and multiplier are monotonic within a session except for
//! the single reset path on a solid hit. The multiplier is a pure function
//! of the combo, recomputed on every change, so the two can never desync.

use serde::{Deserialize, Serialize};

use crate::consts::{COMBO_PER_MULTIPLIER, MAX_COMBO_MULTIPLIER};

/// Session difficulty, fixed at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// Point bonus factor applied to every dodge
    pub fn bonus(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.1,
            Difficulty::Hard => 1.2,
            Difficulty::Extreme => 1.3,
        }
    }
}

/// Accumulates score and combo state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEngine {
    score: u64,
    combo: u32,
    multiplier: u32,
    /// Best score seen since construction; survives session resets so the
    /// HUD can show it, persistence is the host's job
    best: u64,
    difficulty: Difficulty,
    base_points: u64,
}

/// min(floor(combo / 10) + 1, 5)
#[inline]
fn multiplier_for(combo: u32) -> u32 {
    (combo / COMBO_PER_MULTIPLIER + 1).min(MAX_COMBO_MULTIPLIER)
}

impl ScoreEngine {
    pub fn new(base_points: u64) -> Self {
        Self {
            score: 0,
            combo: 0,
            multiplier: 1,
            best: 0,
            difficulty: Difficulty::default(),
            base_points,
        }
    }

    /// Start a fresh session at the given difficulty. `best` is kept.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.score = 0;
        self.combo = 0;
        self.multiplier = 1;
        self.difficulty = difficulty;
    }

    /// A projectile passed through a gap. Returns the points awarded.
    pub fn on_dodge(&mut self) -> u64 {
        self.combo += 1;
        self.multiplier = multiplier_for(self.combo);

        let points = (self.base_points as f64 * self.multiplier as f64 * self.difficulty.bonus())
            .floor() as u64;
        self.score += points;
        if self.score > self.best {
            self.best = self.score;
        }
        points
    }

    /// A projectile struck a solid sector. Combo and multiplier reset
    /// together; the accumulated score stays.
    pub fn on_solid_hit(&mut self) {
        self.combo = 0;
        self.multiplier = 1;
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[inline]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    #[inline]
    pub fn best(&self) -> u64 {
        self.best
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_dodge_on_medium() {
        let mut engine = ScoreEngine::new(10);
        engine.reset(Difficulty::Medium);

        let points = engine.on_dodge();
        assert_eq!(engine.combo(), 1);
        assert_eq!(engine.multiplier(), 1);
        assert_eq!(points, 11); // floor(10 * 1 * 1.1)
        assert_eq!(engine.score(), 11);
    }

    #[test]
    fn test_multiplier_steps_at_ten() {
        let mut engine = ScoreEngine::new(10);
        engine.reset(Difficulty::Medium);

        for _ in 0..9 {
            engine.on_dodge();
        }
        assert_eq!(engine.multiplier(), 1);

        // Tenth consecutive dodge lifts the multiplier to 2
        engine.on_dodge();
        assert_eq!(engine.combo(), 10);
        assert_eq!(engine.multiplier(), 2);

        let points = engine.on_dodge();
        assert_eq!(points, 22); // floor(10 * 2 * 1.1)
    }

    #[test]
    fn test_difficulty_bonus_per_level() {
        for (difficulty, expected) in [
            (Difficulty::Easy, 10),
            (Difficulty::Medium, 11),
            (Difficulty::Hard, 12),
            (Difficulty::Extreme, 13),
        ] {
            let mut engine = ScoreEngine::new(10);
            engine.reset(difficulty);
            assert_eq!(engine.on_dodge(), expected, "{}", difficulty.as_str());
        }
    }

    #[test]
    fn test_solid_hit_resets_combo_not_score() {
        let mut engine = ScoreEngine::new(10);
        engine.reset(Difficulty::Easy);

        for _ in 0..15 {
            engine.on_dodge();
        }
        let score = engine.score();
        assert_eq!(engine.multiplier(), 2);

        engine.on_solid_hit();
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.multiplier(), 1);
        assert_eq!(engine.score(), score);
    }

    #[test]
    fn test_best_survives_reset() {
        let mut engine = ScoreEngine::new(10);
        engine.reset(Difficulty::Easy);
        for _ in 0..5 {
            engine.on_dodge();
        }
        let best = engine.best();
        assert_eq!(best, engine.score());

        engine.reset(Difficulty::Hard);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best(), best);
    }

    #[test]
    fn test_difficulty_round_trips_as_str() {
        for d in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Extreme,
        ] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nope"), None);
    }

    proptest! {
        #[test]
        fn multiplier_matches_formula_after_every_dodge(dodges in 1u32..1000) {
            let mut engine = ScoreEngine::new(10);
            engine.reset(Difficulty::Easy);
            for _ in 0..dodges {
                engine.on_dodge();
                let expected = (engine.combo() / 10 + 1).min(5);
                prop_assert_eq!(engine.multiplier(), expected);
            }
        }

        #[test]
        fn score_is_monotonic_across_dodges(dodges in 1u32..200) {
            let mut engine = ScoreEngine::new(10);
            engine.reset(Difficulty::Extreme);
            let mut last = 0;
            for _ in 0..dodges {
                engine.on_dodge();
                prop_assert!(engine.score() > last);
                last = engine.score();
            }
        }
    }
}
