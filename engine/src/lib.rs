use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod bot;
pub mod config;
pub mod content;
pub mod error;
pub mod game;
pub mod present;
pub mod roll;
pub mod scoring;
pub mod sheet;

pub use bot::{policy_for, BotPolicy};
pub use config::{load_config, Difficulty, GameConfig, Mode, Pacing};
pub use error::{ConfigError, GameError, HandError, Rejected};
pub use game::{Game, Phase, Scheduled, Seat, Step, Table, Ticket, Transition};
pub use present::{Banner, Event, Presenter, Recorder, ResultCard, Sound};
pub use roll::{HellIntensity, LockMask, RollBias};
pub use scoring::{potentials, score, Category, Hand};
pub use sheet::{evaluate, scoreboard, Evaluation, ScoreSheet, Side, Winner};

enum Source {
    Rng(ChaCha8Rng),
    Scripted { faces: Vec<u8>, next: usize },
}

/// Source of every random draw the engine makes.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Rng(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Replays `faces` in order, wrapping around at the end. Chance draws on
    /// scripted dice always come up false, so loaded rolls behave fairly.
    ///
    /// # Panics
    ///
    /// Panics if `faces` is empty.
    pub fn from_scripted(faces: Vec<u8>) -> Self {
        assert!(!faces.is_empty(), "scripted dice need at least one face");
        Self { source: Source::Scripted { faces, next: 0 } }
    }

    /// One d6.
    pub fn face(&mut self) -> u8 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=6),
            Source::Scripted { faces, next } => {
                let face = faces[*next % faces.len()];
                *next += 1;
                face
            }
        }
    }

    /// True with probability `p` (clamped to 0..=1).
    pub fn chance(&mut self, p: f64) -> bool {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_bool(p.clamp(0.0, 1.0)),
            Source::Scripted { .. } => false,
        }
    }

    /// Uniform pick in `lo..=hi`.
    pub fn between(&mut self, lo: u8, hi: u8) -> u8 {
        match &mut self.source {
            Source::Rng(rng) => rng.gen_range(lo..=hi),
            Source::Scripted { .. } => lo,
        }
    }
}
