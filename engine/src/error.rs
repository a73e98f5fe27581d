use thiserror::Error;

use crate::scoring::Category;
use crate::sheet::Side;

/// Bad dice or category input from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("a hand needs exactly 5 dice, got {0}")]
    WrongLength(usize),
    #[error("die face {0} is outside 1..=6")]
    FaceOutOfRange(u8),
    #[error("'{0}' is not a die face")]
    NotADigit(char),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// An input the table refuses. The game state is left untouched; front-ends
/// treat these as disabled controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("no rolls left this turn")]
    NoRollsLeft,
    #[error("{0} is already scored")]
    CategoryTaken(Category),
    #[error("dice can only be locked between rolls")]
    LockWindowClosed,
    #[error("there is no die #{0}")]
    DieOutOfRange(usize),
    #[error("wait for the current step to finish")]
    Busy,
    #[error("it is {0}'s turn")]
    NotYourTurn(Side),
    #[error("the game is over")]
    GameOver,
    #[error("ticket belongs to an earlier game or step")]
    StaleTicket,
    #[error("nothing is scheduled")]
    NothingScheduled,
}

/// Failure while resuming a scheduled step. [`GameError::Rejected`] leaves
/// the game untouched; every other variant means an engine invariant broke and
/// the game cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Rejected(#[from] Rejected),
    #[error("inconsistent state: {side} has no open category to score")]
    NoOpenCategory { side: Side },
    #[error("inconsistent state: {side} tried to score {category} twice")]
    DoubleAssignment { side: Side, category: Category },
}

impl GameError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::Rejected(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("hell intensity must be 3..=5, got {0}")]
    HellIntensity(u8),
    #[error("unknown pacing preset '{0}'")]
    UnknownPreset(String),
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}
