//! Turn orchestration.
//!
//! A [`Game`] owns the [`Table`] and is the only thing that writes dice,
//! locks, or sheets. Human input comes in through the `on_*` methods. Anything
//! that takes time (dice tumbling, the bot thinking) becomes a single
//! [`Scheduled`] step; the driver waits out its delay and hands the ticket back
//! to [`Game::resume`]. While a step is pending, human input is refused.

use std::mem;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::bot::{policy_for, BotPolicy};
use crate::config::{Difficulty, GameConfig, Mode, Pacing};
use crate::error::{GameError, Rejected};
use crate::present::{Banner, Presenter, ResultCard, Sound};
use crate::roll::{roll, HellIntensity, LockMask, RollBias};
use crate::scoring::{potentials, score, Category, Hand, NUM_DICE};
use crate::sheet::{evaluate, Evaluation, ScoreSheet, Side};
use crate::Dice;

pub const ROLLS_PER_TURN: u8 = 3;

/// Who makes the decisions for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Human,
    Bot,
}

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fresh turn, nothing rolled yet.
    AwaitingRoll,
    /// At least one roll landed: lock, roll again, or score.
    AwaitingLockOrSelect,
    /// A human roll is in the air.
    Rolling,
    /// The bot is playing its turn.
    BotThinking,
    GameComplete,
}

/// Delayed work, resumed by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// New faces land for the roll that was started.
    FinishRoll,
    /// A category was clicked before the first roll; roll instead.
    ImplicitRoll,
    BotBeginTurn,
    BotDecideLocks,
    BotChooseCategory,
    BotPassTurn,
}

/// Proof that a step belongs to the running game. Restarting bumps the
/// generation, so anything scheduled before it is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Ticket {
    generation: u64,
    serial: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scheduled {
    pub ticket: Ticket,
    pub step: Step,
    #[serde(skip)]
    pub delay: Duration,
}

/// What an accepted input or resumed step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Transition {
    RollStarted { side: Side, rolls_remaining: u8 },
    RollSettled { side: Side, hand: Hand, forced: bool },
    ImplicitRoll { side: Side, category: Category },
    LockToggled { index: usize, locked: bool },
    LocksChosen { side: Side, locks: LockMask },
    Scored { side: Side, category: Category, points: u32 },
    TurnPassed { to: Side },
    GameComplete(Evaluation),
}

/// The state of play. Read-only from outside the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    hand: Hand,
    locks: LockMask,
    rolls_remaining: u8,
    active: Side,
    mode: Mode,
    difficulty: Difficulty,
    hell_intensity: Option<HellIntensity>,
    sheet_a: ScoreSheet,
    sheet_b: ScoreSheet,
}

impl Table {
    fn new(mode: Mode, difficulty: Difficulty, first: Side, hell: Option<HellIntensity>) -> Self {
        Self {
            hand: Hand::default(),
            locks: LockMask::NONE,
            rolls_remaining: ROLLS_PER_TURN,
            active: first,
            mode,
            difficulty,
            hell_intensity: hell,
            sheet_a: ScoreSheet::new(),
            sheet_b: ScoreSheet::new(),
        }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn locks(&self) -> &LockMask {
        &self.locks
    }

    pub fn rolls_remaining(&self) -> u8 {
        self.rolls_remaining
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn hell_intensity(&self) -> Option<HellIntensity> {
        self.hell_intensity
    }

    pub fn sheet(&self, side: Side) -> &ScoreSheet {
        match side {
            Side::A => &self.sheet_a,
            Side::B => &self.sheet_b,
        }
    }

    fn sheet_mut(&mut self, side: Side) -> &mut ScoreSheet {
        match side {
            Side::A => &mut self.sheet_a,
            Side::B => &mut self.sheet_b,
        }
    }

    pub fn seat(&self, side: Side) -> Seat {
        match (self.mode, side) {
            (Mode::SoloVsBot, Side::B) => Seat::Bot,
            _ => Seat::Human,
        }
    }

    pub fn has_rolled(&self) -> bool {
        self.rolls_remaining < ROLLS_PER_TURN
    }

    pub fn is_over(&self) -> bool {
        self.sheet_a.is_complete() && self.sheet_b.is_complete()
    }
}

pub struct Game {
    table: Table,
    dice: Dice,
    bot: Option<Box<dyn BotPolicy>>,
    pacing: Pacing,
    generation: u64,
    serial: u64,
    scheduled: Option<Scheduled>,
    outcome: Option<Evaluation>,
}

impl Game {
    /// Sets up a new table and announces the first turn. If the bot opens,
    /// its first step is already scheduled on return.
    pub fn start(config: &GameConfig, out: &mut dyn Presenter) -> Self {
        Self::start_generation(config, Dice::from_seed(config.seed), 0, out)
    }

    /// Like [`Game::start`], but every draw comes from `dice` instead of the
    /// config seed.
    pub fn start_with_dice(config: &GameConfig, dice: Dice, out: &mut dyn Presenter) -> Self {
        Self::start_generation(config, dice, 0, out)
    }

    /// Throws away the running game. Tickets from it no longer resume.
    ///
    /// The new game keeps drawing from the running dice, so a restart with
    /// the same config flips a fresh coin and rolls fresh hands, while a
    /// seeded session as a whole still replays exactly.
    pub fn restart(&mut self, config: &GameConfig, out: &mut dyn Presenter) {
        let generation = self.generation + 1;
        if let Some(pending) = self.scheduled {
            debug!(step = ?pending.step, "dropping pending step on restart");
        }
        let dice = mem::replace(&mut self.dice, Dice::from_seed(config.seed));
        *self = Self::start_generation(config, dice, generation, out);
    }

    fn start_generation(
        config: &GameConfig,
        mut dice: Dice,
        generation: u64,
        out: &mut dyn Presenter,
    ) -> Self {
        let first = config
            .first_side
            .unwrap_or_else(|| if dice.chance(0.5) { Side::A } else { Side::B });
        let solo = config.mode == Mode::SoloVsBot;
        let hell = (solo && config.difficulty == Difficulty::Hell)
            .then(|| config.hell_intensity.unwrap_or_else(|| HellIntensity::draw(&mut dice)));
        let bot = solo.then(|| policy_for(config.difficulty, hell));

        info!(
            difficulty = %config.difficulty,
            mode = ?config.mode,
            seed = config.seed,
            first = %first,
            hell = hell.map(|h| h.level()),
            generation,
            "game started"
        );

        let mut game = Self {
            table: Table::new(config.mode, config.difficulty, first, hell),
            dice,
            bot,
            pacing: config.pacing,
            generation,
            serial: 0,
            scheduled: None,
            outcome: None,
        };

        if let Some(intensity) = hell {
            out.announce_hell(intensity);
        }
        game.render_all(out);
        game.announce_turn(out);
        game.hand_off_if_bot();
        game
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn pending(&self) -> Option<&Scheduled> {
        self.scheduled.as_ref()
    }

    pub fn outcome(&self) -> Option<&Evaluation> {
        self.outcome.as_ref()
    }

    pub fn bot_name(&self) -> Option<&'static str> {
        self.bot.as_ref().map(|b| b.name())
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            return Phase::GameComplete;
        }
        if self.table.seat(self.table.active) == Seat::Bot {
            return Phase::BotThinking;
        }
        match self.scheduled.map(|s| s.step) {
            Some(Step::FinishRoll | Step::ImplicitRoll) => Phase::Rolling,
            _ if self.table.has_rolled() => Phase::AwaitingLockOrSelect,
            _ => Phase::AwaitingRoll,
        }
    }

    /// Open-slot scores for the side to move, once it has rolled.
    pub fn potentials(&self) -> Vec<(Category, u32)> {
        if !self.table.has_rolled() {
            return Vec::new();
        }
        potentials(&self.table.hand, self.table.sheet(self.table.active))
    }

    pub fn on_roll_requested(&mut self, out: &mut dyn Presenter) -> Result<Transition, Rejected> {
        self.check_human_input()?;
        if self.table.rolls_remaining == 0 {
            return Err(Rejected::NoRollsLeft);
        }
        Ok(self.begin_roll(out))
    }

    pub fn on_die_toggled(&mut self, index: usize, out: &mut dyn Presenter) -> Result<Transition, Rejected> {
        self.check_human_input()?;
        if index >= NUM_DICE {
            return Err(Rejected::DieOutOfRange(index));
        }
        if !self.table.has_rolled() || self.table.rolls_remaining == 0 {
            return Err(Rejected::LockWindowClosed);
        }
        let locked = self.table.locks.toggle(index).ok_or(Rejected::DieOutOfRange(index))?;
        debug!(index, locked, "die toggled");
        out.play(Sound::Lock);
        out.render_dice(&self.table.hand, &self.table.locks);
        Ok(Transition::LockToggled { index, locked })
    }

    /// Scores `category` for the side to move, or, if nothing has been rolled
    /// yet, starts the first roll instead.
    pub fn on_category_selected(
        &mut self,
        category: Category,
        out: &mut dyn Presenter,
    ) -> Result<Transition, Rejected> {
        self.check_human_input()?;
        let side = self.table.active;
        if !self.table.sheet(side).is_open(category) {
            return Err(Rejected::CategoryTaken(category));
        }
        if !self.table.has_rolled() {
            debug!(%side, %category, "category picked before rolling; rolling first");
            self.schedule(Step::ImplicitRoll, self.pacing.implicit_roll());
            return Ok(Transition::ImplicitRoll { side, category });
        }

        let points = score(&self.table.hand, category);
        self.table.sheet_mut(side).assign(category, points)?;
        info!(%side, %category, points, hand = %self.table.hand, "scored");
        self.render_scoreboard(out);
        out.play(Sound::Score);
        self.end_turn(out);
        Ok(Transition::Scored { side, category, points })
    }

    /// Runs the step `ticket` was issued for.
    pub fn resume(&mut self, ticket: Ticket, out: &mut dyn Presenter) -> Result<Transition, GameError> {
        let pending = self.scheduled.ok_or(Rejected::NothingScheduled)?;
        if pending.ticket != ticket {
            warn!(?ticket, current = ?pending.ticket, "stale ticket refused");
            return Err(Rejected::StaleTicket.into());
        }
        self.scheduled = None;
        debug!(step = ?pending.step, "resuming");

        match pending.step {
            Step::FinishRoll => Ok(self.finish_roll(out)),
            Step::ImplicitRoll | Step::BotBeginTurn => Ok(self.begin_roll(out)),
            Step::BotDecideLocks => Ok(self.bot_decide_locks(out)),
            Step::BotChooseCategory => self.bot_choose_category(out),
            Step::BotPassTurn => {
                out.play(Sound::Score);
                Ok(self.end_turn(out))
            }
        }
    }

    /// Resumes scheduled steps until the game needs a human or is over,
    /// calling `wait` with each step's delay first.
    pub fn run_pending(
        &mut self,
        out: &mut dyn Presenter,
        mut wait: impl FnMut(Duration),
    ) -> Result<Vec<Transition>, GameError> {
        let mut done = Vec::new();
        while let Some(pending) = self.scheduled {
            wait(pending.delay);
            done.push(self.resume(pending.ticket, out)?);
        }
        Ok(done)
    }

    fn check_human_input(&self) -> Result<(), Rejected> {
        if self.outcome.is_some() {
            return Err(Rejected::GameOver);
        }
        if self.scheduled.is_some() {
            return Err(Rejected::Busy);
        }
        if self.table.seat(self.table.active) == Seat::Bot {
            return Err(Rejected::NotYourTurn(self.table.active));
        }
        Ok(())
    }

    fn schedule(&mut self, step: Step, delay: Duration) {
        self.serial += 1;
        let ticket = Ticket { generation: self.generation, serial: self.serial };
        debug!(?step, delay_ms = delay.as_millis() as u64, "scheduled");
        self.scheduled = Some(Scheduled { ticket, step, delay });
    }

    fn begin_roll(&mut self, out: &mut dyn Presenter) -> Transition {
        let side = self.table.active;
        self.table.rolls_remaining -= 1;
        debug!(%side, rolls_remaining = self.table.rolls_remaining, "roll started");
        out.play(Sound::Roll);
        self.render_scoreboard(out);
        self.schedule(Step::FinishRoll, self.pacing.roll());
        Transition::RollStarted { side, rolls_remaining: self.table.rolls_remaining }
    }

    fn finish_roll(&mut self, out: &mut dyn Presenter) -> Transition {
        let side = self.table.active;
        let bias = match (&self.bot, self.table.seat(side)) {
            (Some(bot), Seat::Bot) => bot.roll_bias(),
            _ => RollBias::Fair,
        };
        let open: Vec<Category> = self.table.sheet(side).open().collect();
        let outcome = roll(&self.table.hand, &self.table.locks, bias, &open, &mut self.dice);
        self.table.hand = outcome.hand;
        self.table.locks = outcome.locks;
        debug!(%side, hand = %outcome.hand, forced = outcome.forced, "roll settled");
        out.render_dice(&self.table.hand, &self.table.locks);

        let bot_rerolls = match (&self.bot, self.table.seat(side)) {
            (Some(bot), Seat::Bot) => Some(bot.rerolls()),
            _ => None,
        };
        match bot_rerolls {
            Some(rerolls) => {
                let rolls_taken = ROLLS_PER_TURN - self.table.rolls_remaining;
                let may_reroll = rolls_taken <= rerolls && self.table.rolls_remaining > 0;
                let next = if may_reroll { Step::BotDecideLocks } else { Step::BotChooseCategory };
                self.schedule(next, self.pacing.bot_think());
            }
            None => out.render_potentials(side, &self.potentials()),
        }
        Transition::RollSettled { side, hand: outcome.hand, forced: outcome.forced }
    }

    fn bot_decide_locks(&mut self, out: &mut dyn Presenter) -> Transition {
        let side = self.table.active;
        if let Some(bot) = &self.bot {
            let wanted = bot.choose_locks(&self.table.hand, &self.table.locks);
            self.table.locks = self.table.locks.union(wanted);
        }
        debug!(%side, held = self.table.locks.count(), "bot chose locks");
        out.render_dice(&self.table.hand, &self.table.locks);

        if self.table.locks.all_locked() {
            self.schedule(Step::BotChooseCategory, self.pacing.bot_think());
        } else {
            self.begin_roll(out);
        }
        Transition::LocksChosen { side, locks: self.table.locks }
    }

    fn bot_choose_category(&mut self, out: &mut dyn Presenter) -> Result<Transition, GameError> {
        let side = self.table.active;
        let sheet = self.table.sheet(side);
        let category = self
            .bot
            .as_ref()
            .and_then(|bot| bot.choose_category(&self.table.hand, sheet))
            .ok_or(GameError::NoOpenCategory { side })?;
        let points = score(&self.table.hand, category);
        self.table
            .sheet_mut(side)
            .assign(category, points)
            .map_err(|_| GameError::DoubleAssignment { side, category })?;
        info!(%side, %category, points, hand = %self.table.hand, "bot scored");
        self.render_scoreboard(out);
        self.schedule(Step::BotPassTurn, self.pacing.bot_score());
        Ok(Transition::Scored { side, category, points })
    }

    fn end_turn(&mut self, out: &mut dyn Presenter) -> Transition {
        if self.table.is_over() {
            let evaluation = evaluate(&self.table.sheet_a, &self.table.sheet_b);
            let card = ResultCard::new(&evaluation, self.table.mode);
            info!(
                winner = ?evaluation.winner,
                total_a = evaluation.total_a,
                total_b = evaluation.total_b,
                "game complete"
            );
            self.outcome = Some(evaluation);
            out.announce_result(&evaluation, &card);
            out.play(card.sound);
            return Transition::GameComplete(evaluation);
        }

        let to = self.table.active.other();
        self.table.active = to;
        self.table.rolls_remaining = ROLLS_PER_TURN;
        self.table.locks = LockMask::NONE;
        info!(%to, "turn passed");
        self.render_all(out);
        self.announce_turn(out);
        self.hand_off_if_bot();
        Transition::TurnPassed { to }
    }

    fn hand_off_if_bot(&mut self) {
        if self.table.seat(self.table.active) == Seat::Bot {
            self.schedule(Step::BotBeginTurn, self.pacing.bot_start());
        }
    }

    fn announce_turn(&self, out: &mut dyn Presenter) {
        let banner = Banner::for_turn(
            self.table.active,
            self.table.mode,
            self.table.difficulty,
            self.pacing.banner(),
        );
        out.announce_turn(&banner);
    }

    fn render_scoreboard(&self, out: &mut dyn Presenter) {
        out.render_scoreboard(
            &self.table.sheet_a,
            &self.table.sheet_b,
            self.table.active,
            self.table.rolls_remaining,
        );
    }

    fn render_all(&self, out: &mut dyn Presenter) {
        out.render_dice(&self.table.hand, &self.table.locks);
        self.render_scoreboard(out);
    }
}
