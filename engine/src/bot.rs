//! Bot opponents, one strategy object per difficulty.
//!
//! A policy is picked once when the game starts and answers three questions
//! for every bot turn: how the dice fall for it, which dice to hold between
//! rolls, and which slot to score at the end.

use crate::config::Difficulty;
use crate::roll::{HellIntensity, LockMask, RollBias};
use crate::scoring::{score, Category, Hand, NUM_DICE};
use crate::sheet::ScoreSheet;

const YATZY_BONUS_HALF_POINTS: u32 = 1000;

pub trait BotPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Re-rolls allowed after the first roll.
    fn rerolls(&self) -> u8;

    fn roll_bias(&self) -> RollBias {
        RollBias::Fair
    }

    /// Dice to hold before the next roll. The table ORs the answer into the
    /// locks already held, so a bot never releases a die mid-turn.
    fn choose_locks(&self, hand: &Hand, held: &LockMask) -> LockMask;

    /// Slot to score. `None` only when the sheet is already full.
    fn choose_category(&self, hand: &Hand, sheet: &ScoreSheet) -> Option<Category>;
}

pub fn policy_for(difficulty: Difficulty, intensity: Option<HellIntensity>) -> Box<dyn BotPolicy> {
    match difficulty {
        Difficulty::Easy => Box::new(Casual),
        Difficulty::Medium => Box::new(Greedy),
        Difficulty::Hard => Box::new(Shark),
        Difficulty::Hell => Box::new(Hellspawn {
            intensity: intensity.unwrap_or(HellIntensity::LOWEST),
        }),
    }
}

/// EASY: one roll, best plain score.
pub struct Casual;

impl BotPolicy for Casual {
    fn name(&self) -> &'static str {
        "casual"
    }

    fn rerolls(&self) -> u8 {
        0
    }

    fn choose_locks(&self, _hand: &Hand, held: &LockMask) -> LockMask {
        *held
    }

    fn choose_category(&self, hand: &Hand, sheet: &ScoreSheet) -> Option<Category> {
        best_category(hand, sheet, Weighting::Plain)
    }
}

/// MEDIUM: chases the most common face.
pub struct Greedy;

impl BotPolicy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn rerolls(&self) -> u8 {
        2
    }

    fn choose_locks(&self, hand: &Hand, _held: &LockMask) -> LockMask {
        lock_most_frequent(hand)
    }

    fn choose_category(&self, hand: &Hand, sheet: &ScoreSheet) -> Option<Category> {
        best_category(hand, sheet, Weighting::Plain)
    }
}

/// HARD: also goes for straights and overvalues high faces and yatzy.
pub struct Shark;

impl BotPolicy for Shark {
    fn name(&self) -> &'static str {
        "shark"
    }

    fn rerolls(&self) -> u8 {
        2
    }

    fn choose_locks(&self, hand: &Hand, _held: &LockMask) -> LockMask {
        lock_straight_draw(hand).unwrap_or_else(|| lock_most_frequent(hand))
    }

    fn choose_category(&self, hand: &Hand, sheet: &ScoreSheet) -> Option<Category> {
        best_category(hand, sheet, Weighting::HighFaces)
    }
}

/// HELL: plays like [`Shark`] on loaded dice; at the top intensity it skips
/// rolling and sets its own hand.
pub struct Hellspawn {
    pub intensity: HellIntensity,
}

impl BotPolicy for Hellspawn {
    fn name(&self) -> &'static str {
        "hellspawn"
    }

    fn rerolls(&self) -> u8 {
        2
    }

    fn roll_bias(&self) -> RollBias {
        self.intensity.bias()
    }

    fn choose_locks(&self, hand: &Hand, held: &LockMask) -> LockMask {
        if self.intensity.forces_dice() {
            return LockMask::ALL;
        }
        Shark.choose_locks(hand, held)
    }

    fn choose_category(&self, hand: &Hand, sheet: &ScoreSheet) -> Option<Category> {
        best_category(hand, sheet, Weighting::HighFaces)
    }
}

/// Holds every die showing the most common face, as long as it shows at
/// least twice. Ties go to the lower face.
pub fn lock_most_frequent(hand: &Hand) -> LockMask {
    let counts = hand.counts();
    let mut best_face = 1u8;
    let mut best_count = 0u8;
    for face in 1..=6u8 {
        if counts[face as usize] > best_count {
            best_count = counts[face as usize];
            best_face = face;
        }
    }

    let mut locks = LockMask::NONE;
    if best_count >= 2 {
        for (idx, &face) in hand.faces().iter().enumerate() {
            if face == best_face {
                locks.lock(idx);
            }
        }
    }
    locks
}

/// With four or more distinct faces showing, holds the first die of each
/// face and frees the duplicates.
pub fn lock_straight_draw(hand: &Hand) -> Option<LockMask> {
    if hand.distinct_faces() < 4 {
        return None;
    }
    let mut seen = [false; 7];
    let mut locks = LockMask::NONE;
    for idx in 0..NUM_DICE {
        let face = hand.faces()[idx] as usize;
        if !seen[face] {
            seen[face] = true;
            locks.lock(idx);
        }
    }
    Some(locks)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    Plain,
    /// Fours, fives and sixes count 2.5x; a live yatzy gets +500.
    HighFaces,
}

/// Score in half points so the 2.5x weight stays integral.
fn weighted(category: Category, points: u32, weighting: Weighting) -> u32 {
    let half = points * 2;
    match (weighting, category) {
        (Weighting::HighFaces, Category::Fours | Category::Fives | Category::Sixes) => points * 5,
        (Weighting::HighFaces, Category::Yatzy) if points > 0 => half + YATZY_BONUS_HALF_POINTS,
        _ => half,
    }
}

/// Highest weighted open slot; the first in sheet order wins a tie, so an
/// all-zero hand lands in the first open slot.
pub fn best_category(hand: &Hand, sheet: &ScoreSheet, weighting: Weighting) -> Option<Category> {
    let mut best: Option<(Category, u32)> = None;
    for category in sheet.open() {
        let value = weighted(category, score(hand, category), weighting);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((category, value));
        }
    }
    best.map(|(category, _)| category)
}
