//! Everything the table shows or plays goes through [`Presenter`]. The engine
//! only says *what* happened; drawing dice, banners, and sounds is up to the
//! front-end.

use std::time::Duration;

use serde::Serialize;

use crate::config::{Difficulty, Mode};
use crate::roll::{HellIntensity, LockMask};
use crate::scoring::{Category, Hand};
use crate::sheet::{Evaluation, ScoreSheet, Side, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sound {
    Roll,
    Lock,
    Score,
    Win,
    Lose,
    Tie,
}

/// Turn announcement. `headline` is the big pop-up, `text` the banner that
/// stays on screen for the whole turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub side: Side,
    pub headline: &'static str,
    pub text: &'static str,
    #[serde(skip)]
    pub hold: Duration,
}

impl Banner {
    pub fn for_turn(side: Side, mode: Mode, difficulty: Difficulty, hold: Duration) -> Self {
        let hell = difficulty == Difficulty::Hell;
        let (headline, text) = match (mode, side) {
            (Mode::Pvp, Side::A) => ("PLAYER 1", "PLAYER 1 TURN"),
            (Mode::Pvp, Side::B) => ("PLAYER 2", "PLAYER 2 TURN"),
            (Mode::SoloVsBot, Side::A) => ("YOUR TURN", "YOUR TURN"),
            (Mode::SoloVsBot, Side::B) if hell => ("HELL'S TURN", "HELL IS THINKING..."),
            (Mode::SoloVsBot, Side::B) => ("BOT'S TURN", "BOT IS THINKING..."),
        };
        Self { side, headline, text, hold }
    }
}

/// What the end screen says about an [`Evaluation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    pub title: &'static str,
    pub details: String,
    pub sound: Sound,
}

impl ResultCard {
    pub fn new(evaluation: &Evaluation, mode: Mode) -> Self {
        let pvp = mode == Mode::Pvp;
        let (title, sound) = match evaluation.winner {
            Winner::A if pvp => ("PLAYER 1 WINS!", Sound::Win),
            Winner::A => ("YOU WIN!", Sound::Win),
            Winner::B if pvp => ("PLAYER 2 WINS!", Sound::Win),
            Winner::B => ("YOU LOSE!", Sound::Lose),
            Winner::Tie => ("IT'S A TIE!", Sound::Tie),
        };
        let details = if pvp {
            format!("P1: {} | P2: {}", evaluation.total_a, evaluation.total_b)
        } else {
            format!("You: {} | Bot: {}", evaluation.total_a, evaluation.total_b)
        };
        Self { title, details, sound }
    }
}

/// Output sink for a [`crate::Game`]. Every method defaults to doing nothing.
pub trait Presenter {
    fn render_dice(&mut self, _hand: &Hand, _locks: &LockMask) {}

    fn render_scoreboard(
        &mut self,
        _a: &ScoreSheet,
        _b: &ScoreSheet,
        _active: Side,
        _rolls_remaining: u8,
    ) {
    }

    /// Live "what would this score" values for a human's open slots.
    fn render_potentials(&mut self, _side: Side, _potentials: &[(Category, u32)]) {}

    fn announce_turn(&mut self, _banner: &Banner) {}

    fn announce_hell(&mut self, _intensity: HellIntensity) {}

    fn announce_result(&mut self, _evaluation: &Evaluation, _card: &ResultCard) {}

    fn play(&mut self, _sound: Sound) {}
}

impl Presenter for () {}

/// One call made on a [`Recorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Dice { hand: Hand, locks: LockMask },
    Scoreboard { active: Side, rolls_remaining: u8, total_a: u32, total_b: u32 },
    Potentials { side: Side, potentials: Vec<(Category, u32)> },
    Turn(Banner),
    Hell(HellIntensity),
    Result { evaluation: Evaluation, card: ResultCard },
    Sound(Sound),
}

/// Presenter that keeps every call, for tests and replays.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn banners(&self) -> Vec<&Banner> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Turn(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn last_dice(&self) -> Option<(Hand, LockMask)> {
        self.events.iter().rev().find_map(|e| match e {
            Event::Dice { hand, locks } => Some((*hand, *locks)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for Recorder {
    fn render_dice(&mut self, hand: &Hand, locks: &LockMask) {
        self.events.push(Event::Dice { hand: *hand, locks: *locks });
    }

    fn render_scoreboard(&mut self, a: &ScoreSheet, b: &ScoreSheet, active: Side, rolls_remaining: u8) {
        self.events.push(Event::Scoreboard {
            active,
            rolls_remaining,
            total_a: a.total(),
            total_b: b.total(),
        });
    }

    fn render_potentials(&mut self, side: Side, potentials: &[(Category, u32)]) {
        self.events.push(Event::Potentials { side, potentials: potentials.to_vec() });
    }

    fn announce_turn(&mut self, banner: &Banner) {
        self.events.push(Event::Turn(banner.clone()));
    }

    fn announce_hell(&mut self, intensity: HellIntensity) {
        self.events.push(Event::Hell(intensity));
    }

    fn announce_result(&mut self, evaluation: &Evaluation, card: &ResultCard) {
        self.events.push(Event::Result { evaluation: *evaluation, card: card.clone() });
    }

    fn play(&mut self, sound: Sound) {
        self.events.push(Event::Sound(sound));
    }
}
