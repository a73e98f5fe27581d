use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Rejected;
use crate::scoring::Category;

/// Seat at the table. `A` is the local player (P1 in PVP), `B` the bot or P2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("side A"),
            Side::B => f.write_str("side B"),
        }
    }
}

/// One side's scores. Entries are kept in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSheet {
    entries: IndexMap<Category, u32>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<u32> {
        self.entries.get(&category).copied()
    }

    pub fn is_open(&self, category: Category) -> bool {
        !self.entries.contains_key(&category)
    }

    /// Writes `points` into an open slot. A written slot never changes again.
    pub fn assign(&mut self, category: Category, points: u32) -> Result<(), Rejected> {
        if !self.is_open(category) {
            return Err(Rejected::CategoryTaken(category));
        }
        self.entries.insert(category, points);
        Ok(())
    }

    /// Open slots in sheet order.
    pub fn open(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_open(*c))
    }

    pub fn filled(&self) -> usize {
        self.entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.entries.len() == Category::ALL.len()
    }

    pub fn total(&self) -> u32 {
        self.entries.values().sum()
    }

    /// `(category, points)` in the order they were scored.
    pub fn history(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        self.entries.iter().map(|(c, p)| (*c, *p))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    A,
    B,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Evaluation {
    pub winner: Winner,
    pub total_a: u32,
    pub total_b: u32,
}

/// Final totals and winner. Plain sums of the twelve slots, no bonuses.
pub fn evaluate(a: &ScoreSheet, b: &ScoreSheet) -> Evaluation {
    let total_a = a.total();
    let total_b = b.total();
    let winner = match total_a.cmp(&total_b) {
        std::cmp::Ordering::Greater => Winner::A,
        std::cmp::Ordering::Less => Winner::B,
        std::cmp::Ordering::Equal => Winner::Tie,
    };
    Evaluation { winner, total_a, total_b }
}

/// Plain-text scoreboard: one row per slot, then totals. Open slots show `-`.
pub fn scoreboard(a: &ScoreSheet, b: &ScoreSheet, headers: (&str, &str)) -> String {
    let cell = |sheet: &ScoreSheet, category: Category| {
        sheet.get(category).map_or_else(|| "-".to_string(), |p| p.to_string())
    };
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>5} {:>5}", "", headers.0, headers.1);
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "{:<12} {:>5} {:>5}",
            category.label(),
            cell(a, category),
            cell(b, category)
        );
    }
    let _ = write!(out, "{:<12} {:>5} {:>5}", "Total", a.total(), b.total());
    out
}
