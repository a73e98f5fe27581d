use engine::{
    scoreboard, Banner, Category, Evaluation, Hand, HellIntensity, LockMask, Mode, Presenter,
    ResultCard, ScoreSheet, Side, Sound,
};

/// Draws the table as plain lines on stdout.
pub struct TermPresenter {
    mode: Mode,
    a: ScoreSheet,
    b: ScoreSheet,
}

impl TermPresenter {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            a: ScoreSheet::new(),
            b: ScoreSheet::new(),
        }
    }

    pub fn reset(&mut self, mode: Mode) {
        *self = Self::new(mode);
    }

    pub fn headers(&self) -> (&'static str, &'static str) {
        match self.mode {
            Mode::Pvp => ("P1", "P2"),
            Mode::SoloVsBot => ("You", "Bot"),
        }
    }

    fn side_name(&self, side: Side) -> &'static str {
        match side {
            Side::A => self.headers().0,
            Side::B => self.headers().1,
        }
    }

    /// Full scoreboard as last rendered.
    pub fn print_table(&self) {
        println!("{}", scoreboard(&self.a, &self.b, self.headers()));
    }
}

pub fn dice_line(hand: &Hand, locks: &LockMask) -> String {
    hand.faces()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if locks.is_locked(i) {
                format!("[{}]", f)
            } else {
                format!(" {} ", f)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Presenter for TermPresenter {
    fn render_dice(&mut self, hand: &Hand, locks: &LockMask) {
        println!("dice: {}", dice_line(hand, locks));
    }

    fn render_scoreboard(&mut self, a: &ScoreSheet, b: &ScoreSheet, active: Side, rolls_remaining: u8) {
        self.a = a.clone();
        self.b = b.clone();
        let (ha, hb) = self.headers();
        println!(
            "{} to move, rolls left {} | {} {} - {} {}",
            self.side_name(active),
            rolls_remaining,
            ha,
            a.total(),
            hb,
            b.total()
        );
    }

    fn render_potentials(&mut self, _side: Side, potentials: &[(Category, u32)]) {
        let line = potentials
            .iter()
            .map(|(c, p)| format!("{}={}", c.id(), p))
            .collect::<Vec<_>>()
            .join(" ");
        println!("could score: {}", line);
    }

    fn announce_turn(&mut self, banner: &Banner) {
        println!("== {} ==", banner.text);
    }

    fn announce_hell(&mut self, intensity: HellIntensity) {
        println!("HELL MODE LEVEL {}", intensity.level());
    }

    fn announce_result(&mut self, _evaluation: &Evaluation, card: &ResultCard) {
        self.print_table();
        let (ha, hb) = self.headers();
        for (header, sheet) in [(ha, &self.a), (hb, &self.b)] {
            let order = sheet.history().map(|(c, _)| c.id()).collect::<Vec<_>>().join(" ");
            println!("{} order: {}", header, order);
        }
        println!("{}", card.title);
        println!("{}", card.details);
    }

    fn play(&mut self, sound: Sound) {
        tracing::trace!(?sound, "sound");
    }
}
