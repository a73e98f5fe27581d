use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::HandError;
use crate::sheet::ScoreSheet;

pub const NUM_DICE: usize = 5;

const FULL_HOUSE: u32 = 25;
const SMALL_STRAIGHT: u32 = 30;
const LARGE_STRAIGHT: u32 = 40;
const YATZY: u32 = 50;

/// The twelve scoring slots, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeKind,
    FourKind,
    FullHouse,
    SmStraight,
    LgStraight,
    Yatzy,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeKind,
        Category::FourKind,
        Category::FullHouse,
        Category::SmStraight,
        Category::LgStraight,
        Category::Yatzy,
    ];

    /// Stable id used on the wire and at the prompt.
    pub fn id(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeKind => "threeKind",
            Category::FourKind => "fourKind",
            Category::FullHouse => "fullHouse",
            Category::SmStraight => "smStraight",
            Category::LgStraight => "lgStraight",
            Category::Yatzy => "yatzy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeKind => "3 of a Kind",
            Category::FourKind => "4 of a Kind",
            Category::FullHouse => "House",
            Category::SmStraight => "Small",
            Category::LgStraight => "Large",
            Category::Yatzy => "Yatzy",
        }
    }

    /// Short rule text shown when a player asks what a slot is for.
    pub fn rule(self) -> &'static str {
        match self {
            Category::Ones => "Count and add only the dice with the face '1'.",
            Category::Twos => "Count and add only the dice with the face '2'.",
            Category::Threes => "Count and add only the dice with the face '3'.",
            Category::Fours => "Count and add only the dice with the face '4'.",
            Category::Fives => "Count and add only the dice with the face '5'.",
            Category::Sixes => "Count and add only the dice with the face '6'.",
            Category::ThreeKind => "Score the total sum of all 5 dice if at least 3 dice match.",
            Category::FourKind => "Score the total sum of all 5 dice if at least 4 dice match.",
            Category::FullHouse => "Score 25 points for 3 of one kind and 2 of another.",
            Category::SmStraight => "Score 30 points for a sequence of 4 consecutive dice.",
            Category::LgStraight => "Score 40 points for a sequence of 5 consecutive dice.",
            Category::Yatzy => "Score 50 points if all 5 dice match.",
        }
    }

    /// Face counted by the upper-section slots.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = HandError;

    /// Accepts the id in any case, e.g. `fullHouse` or `fullhouse`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HandError::UnknownCategory(wanted.to_string()))
    }
}

/// Five dice, each showing 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Hand([u8; NUM_DICE]);

impl Hand {
    pub fn new(faces: [u8; NUM_DICE]) -> Result<Self, HandError> {
        if let Some(&bad) = faces.iter().find(|f| !(1..=6).contains(*f)) {
            return Err(HandError::FaceOutOfRange(bad));
        }
        Ok(Self(faces))
    }

    /// Same as [`Hand::new`] for literals known to be in range.
    pub(crate) const fn from_faces(faces: [u8; NUM_DICE]) -> Self {
        Self(faces)
    }

    pub fn faces(&self) -> [u8; NUM_DICE] {
        self.0
    }

    pub(crate) fn set(&mut self, idx: usize, face: u8) {
        self.0[idx] = face;
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&f| f as u32).sum()
    }

    /// `counts()[f]` is how many dice show face `f`; index 0 is unused.
    pub fn counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for &f in &self.0 {
            counts[f as usize] += 1;
        }
        counts
    }

    pub fn distinct_faces(&self) -> usize {
        self.counts().iter().skip(1).filter(|&&c| c > 0).count()
    }

    /// Longest run of consecutive distinct faces.
    pub fn longest_run(&self) -> usize {
        let counts = self.counts();
        let mut best = 0;
        let mut cur = 0;
        for face in 1..=6 {
            if counts[face] > 0 {
                cur += 1;
                best = best.max(cur);
            } else {
                cur = 0;
            }
        }
        best
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self([1, 2, 3, 4, 5])
    }
}

impl TryFrom<&[u8]> for Hand {
    type Error = HandError;

    fn try_from(faces: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; NUM_DICE] = faces
            .try_into()
            .map_err(|_| HandError::WrongLength(faces.len()))?;
        Hand::new(arr)
    }
}

impl TryFrom<Vec<u8>> for Hand {
    type Error = HandError;

    fn try_from(faces: Vec<u8>) -> Result<Self, Self::Error> {
        Hand::try_from(faces.as_slice())
    }
}

impl From<Hand> for Vec<u8> {
    fn from(hand: Hand) -> Self {
        hand.0.to_vec()
    }
}

impl FromStr for Hand {
    type Err = HandError;

    /// Parses `2,2,2,3,3`, `2 2 2 3 3` or `22233`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces: Vec<u8> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(HandError::NotADigit(c))
            })
            .collect::<Result<_, _>>()?;
        Hand::try_from(faces)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a} {b} {c} {d} {e}]")
    }
}

/// Points `hand` earns in `category`.
pub fn score(hand: &Hand, category: Category) -> u32 {
    let counts = hand.counts();
    let has_count = |n: u8| counts.iter().skip(1).any(|&c| c == n);
    let max_count = counts.iter().copied().max().unwrap_or(0);

    if let Some(face) = category.face() {
        return counts[face as usize] as u32 * face as u32;
    }

    match category {
        Category::ThreeKind if max_count >= 3 => hand.sum(),
        Category::FourKind if max_count >= 4 => hand.sum(),
        // Five of a kind has no 3-count and no 2-count, so it is not a house.
        Category::FullHouse if has_count(3) && has_count(2) => FULL_HOUSE,
        Category::SmStraight if hand.longest_run() >= 4 => SMALL_STRAIGHT,
        Category::LgStraight if hand.longest_run() >= 5 => LARGE_STRAIGHT,
        Category::Yatzy if has_count(5) => YATZY,
        _ => 0,
    }
}

/// What each still-open slot on `sheet` would score with `hand`.
pub fn potentials(hand: &Hand, sheet: &ScoreSheet) -> Vec<(Category, u32)> {
    sheet
        .open()
        .map(|category| (category, score(hand, category)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(faces: [u8; 5]) -> Hand {
        Hand::new(faces).unwrap()
    }

    #[test]
    fn upper_slots_count_matching_faces() {
        let h = hand([3, 3, 5, 3, 1]);
        assert_eq!(score(&h, Category::Ones), 1);
        assert_eq!(score(&h, Category::Threes), 9);
        assert_eq!(score(&h, Category::Fives), 5);
        assert_eq!(score(&h, Category::Sixes), 0);
    }

    #[test]
    fn run_length_ignores_duplicates() {
        assert_eq!(hand([1, 2, 2, 3, 4]).longest_run(), 4);
        assert_eq!(hand([1, 2, 4, 5, 6]).longest_run(), 3);
        assert_eq!(hand([6, 6, 6, 6, 6]).longest_run(), 1);
    }

    #[test]
    fn parse_hand_forms() {
        assert_eq!("2,2,2,3,3".parse::<Hand>().unwrap(), hand([2, 2, 2, 3, 3]));
        assert_eq!("6 5 4 3 2".parse::<Hand>().unwrap(), hand([6, 5, 4, 3, 2]));
        assert_eq!("11111".parse::<Hand>().unwrap(), hand([1, 1, 1, 1, 1]));
        assert_eq!("1,2,3".parse::<Hand>(), Err(HandError::WrongLength(3)));
        assert_eq!("1,2,3,4,7".parse::<Hand>(), Err(HandError::FaceOutOfRange(7)));
        assert_eq!("1,2,x,4,5".parse::<Hand>(), Err(HandError::NotADigit('x')));
    }

    #[test]
    fn category_ids_parse_case_insensitively() {
        assert_eq!("fullhouse".parse::<Category>().unwrap(), Category::FullHouse);
        assert_eq!("smStraight".parse::<Category>().unwrap(), Category::SmStraight);
        assert!("chance".parse::<Category>().is_err());
    }
}
