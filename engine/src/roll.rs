use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::{Category, Hand, NUM_DICE};
use crate::Dice;

/// Which dice sit out the next roll. `true` means held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockMask([bool; NUM_DICE]);

impl LockMask {
    pub const NONE: LockMask = LockMask([false; NUM_DICE]);
    pub const ALL: LockMask = LockMask([true; NUM_DICE]);

    pub fn new(bits: [bool; NUM_DICE]) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> [bool; NUM_DICE] {
        self.0
    }

    pub fn is_locked(&self, idx: usize) -> bool {
        self.0.get(idx).copied().unwrap_or(false)
    }

    pub fn lock(&mut self, idx: usize) {
        if let Some(bit) = self.0.get_mut(idx) {
            *bit = true;
        }
    }

    /// Flips one die and returns its new state.
    pub fn toggle(&mut self, idx: usize) -> Option<bool> {
        let bit = self.0.get_mut(idx)?;
        *bit = !*bit;
        Some(*bit)
    }

    /// Bits set in either mask.
    pub fn union(self, other: LockMask) -> LockMask {
        let mut out = self;
        for (bit, extra) in out.0.iter_mut().zip(other.0) {
            *bit |= extra;
        }
        out
    }

    pub fn all_locked(&self) -> bool {
        self.0.iter().all(|&b| b)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }
}

/// How hard the HELL bot cheats, fixed for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HellIntensity(u8);

impl HellIntensity {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 5;
    pub const LOWEST: HellIntensity = HellIntensity(Self::MIN);

    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ConfigError::HellIntensity(level))
        }
    }

    /// Uniform pick, made once when a game starts.
    pub fn draw(dice: &mut Dice) -> Self {
        Self(dice.between(Self::MIN, Self::MAX))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// At the top level the bot no longer rolls at all; it picks its dice.
    pub fn forces_dice(self) -> bool {
        self.0 >= Self::MAX
    }

    /// Per-die chance of a loaded 5-or-6 below the top level.
    pub fn cheat_chance(self) -> f64 {
        (self.0 as f64 - 1.0) * 0.25
    }

    pub fn bias(self) -> RollBias {
        if self.forces_dice() {
            RollBias::Forced
        } else {
            RollBias::Loaded { chance: self.cheat_chance() }
        }
    }
}

impl TryFrom<u8> for HellIntensity {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HellIntensity::new(level)
    }
}

impl From<HellIntensity> for u8 {
    fn from(h: HellIntensity) -> u8 {
        h.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollBias {
    Fair,
    /// Each free die turns into a 5 or 6 with this probability.
    Loaded { chance: f64 },
    /// The whole hand is replaced by [`forced_target`] and every die locked.
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub hand: Hand,
    pub locks: LockMask,
    pub forced: bool,
}

/// Rolls every unlocked die under `bias`. `open` lists the roller's unscored
/// slots and only matters for [`RollBias::Forced`].
pub fn roll(
    hand: &Hand,
    locks: &LockMask,
    bias: RollBias,
    open: &[Category],
    dice: &mut Dice,
) -> RollOutcome {
    if bias == RollBias::Forced {
        return RollOutcome { hand: forced_target(open), locks: LockMask::ALL, forced: true };
    }

    let mut next = *hand;
    for idx in 0..NUM_DICE {
        if locks.is_locked(idx) {
            continue;
        }
        let face = match bias {
            RollBias::Loaded { chance } if dice.chance(chance) => {
                if dice.chance(0.5) { 6 } else { 5 }
            }
            _ => dice.face(),
        };
        next.set(idx, face);
    }
    RollOutcome { hand: next, locks: *locks, forced: false }
}

const TARGETS: [(Category, [u8; NUM_DICE]); 12] = [
    (Category::Yatzy, [6, 6, 6, 6, 6]),
    (Category::LgStraight, [1, 2, 3, 4, 5]),
    (Category::SmStraight, [1, 2, 3, 4, 6]),
    (Category::Sixes, [6, 6, 6, 6, 6]),
    (Category::Fives, [5, 5, 5, 5, 5]),
    (Category::Fours, [4, 4, 4, 4, 4]),
    (Category::Threes, [3, 3, 3, 3, 3]),
    (Category::Twos, [2, 2, 2, 2, 2]),
    (Category::Ones, [1, 1, 1, 1, 1]),
    (Category::FullHouse, [6, 6, 6, 5, 5]),
    (Category::FourKind, [6, 6, 6, 6, 6]),
    (Category::ThreeKind, [6, 6, 6, 6, 6]),
];

/// Hand the top-level HELL bot hands itself: the target of the first open
/// slot in priority order, or five sixes.
pub fn forced_target(open: &[Category]) -> Hand {
    let faces = TARGETS
        .iter()
        .find(|(category, _)| open.contains(category))
        .map(|(_, faces)| *faces)
        .unwrap_or([6; NUM_DICE]);
    Hand::from_faces(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports() {
        let mut locks = LockMask::NONE;
        assert_eq!(locks.toggle(2), Some(true));
        assert!(locks.is_locked(2));
        assert_eq!(locks.toggle(2), Some(false));
        assert_eq!(locks.toggle(9), None);
    }

    #[test]
    fn intensity_bounds() {
        assert!(HellIntensity::new(2).is_err());
        assert!(HellIntensity::new(6).is_err());
        assert_eq!(HellIntensity::new(3).unwrap().cheat_chance(), 0.5);
        assert_eq!(HellIntensity::new(4).unwrap().cheat_chance(), 0.75);
        assert_eq!(HellIntensity::new(5).unwrap().bias(), RollBias::Forced);
    }

    #[test]
    fn drawn_intensity_is_in_range() {
        let mut dice = Dice::from_seed(9);
        for _ in 0..200 {
            let level = HellIntensity::draw(&mut dice).level();
            assert!((3..=5).contains(&level));
        }
    }
}
