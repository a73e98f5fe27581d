use clap::Parser;
use engine::game::ROLLS_PER_TURN;
use engine::scoring::NUM_DICE;
use engine::{
    policy_for, BotPolicy, Category, Difficulty, Game, GameConfig, HellIntensity, Pacing, Phase,
    Side, Winner,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: one bot tier playing side A against the bot on side B")]
struct Args {
    /// Strategy driving side A: easy | medium | hard | hell (fair dice either way)
    #[arg(long, default_value = "medium")]
    a: String,

    /// Difficulty of the table bot on side B: easy | medium | hard | hell
    #[arg(long, default_value = "hard")]
    b: String,

    /// Number of games
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (game i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Pin the HELL intensity (3..=5); drawn per game when omitted
    #[arg(long)]
    hell: Option<u8>,
}

/// Plays side A's turn through the same inputs a person would use.
fn drive_side_a(game: &mut Game, policy: &dyn BotPolicy) -> anyhow::Result<()> {
    loop {
        match game.phase() {
            Phase::AwaitingRoll => {
                game.on_roll_requested(&mut ())?;
            }
            Phase::AwaitingLockOrSelect => {
                let table = game.table();
                let rolls_taken = ROLLS_PER_TURN - table.rolls_remaining();
                let may_reroll = rolls_taken <= policy.rerolls() && table.rolls_remaining() > 0;
                let wanted = policy
                    .choose_locks(table.hand(), table.locks())
                    .union(*table.locks());
                if may_reroll && !wanted.all_locked() {
                    let held = *table.locks();
                    for idx in 0..NUM_DICE {
                        if wanted.is_locked(idx) != held.is_locked(idx) {
                            game.on_die_toggled(idx, &mut ())?;
                        }
                    }
                    game.on_roll_requested(&mut ())?;
                } else {
                    let category = policy
                        .choose_category(table.hand(), table.sheet(Side::A))
                        .ok_or_else(|| anyhow::anyhow!("side A has no open category"))?;
                    game.on_category_selected(category, &mut ())?;
                    return Ok(());
                }
            }
            Phase::Rolling => {
                game.run_pending(&mut (), |_| {})?;
            }
            Phase::BotThinking | Phase::GameComplete => return Ok(()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let a_difficulty: Difficulty = args.a.parse()?;
    let b_difficulty: Difficulty = args.b.parse()?;
    let pinned = args.hell.map(HellIntensity::new).transpose()?;
    let a_policy = policy_for(a_difficulty, pinned);

    let mut a_wins = 0u32;
    let mut b_wins = 0u32;
    let mut ties = 0u32;
    let mut a_points = 0u64;
    let mut b_points = 0u64;
    let mut b_yatzys = 0u32;

    for i in 0..args.trials {
        let mut cfg = GameConfig::solo(b_difficulty, args.seed.wrapping_add(i as u64))
            .with_pacing(Pacing::instant());
        cfg.hell_intensity = pinned;
        let mut game = Game::start(&cfg, &mut ());

        while game.outcome().is_none() {
            game.run_pending(&mut (), |_| {})?;
            drive_side_a(&mut game, a_policy.as_ref())?;
        }

        let Some(eval) = game.outcome().copied() else {
            anyhow::bail!("game {} ended without a result", i);
        };
        match eval.winner {
            Winner::A => a_wins += 1,
            Winner::B => b_wins += 1,
            Winner::Tie => ties += 1,
        }
        a_points += eval.total_a as u64;
        b_points += eval.total_b as u64;
        if game.table().sheet(Side::B).get(Category::Yatzy) == Some(50) {
            b_yatzys += 1;
        }
    }

    let trials_f = args.trials.max(1) as f64;
    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", args.trials);
    println!("side A strategy:    {} ({})", a_difficulty, a_policy.name());
    println!("side B bot:         {}", b_difficulty);
    println!();
    println!("A win rate:         {:.1}%", a_wins as f64 / trials_f * 100.0);
    println!("B win rate:         {:.1}%", b_wins as f64 / trials_f * 100.0);
    println!("tie rate:           {:.1}%", ties as f64 / trials_f * 100.0);
    println!("avg total A:        {:.2}", a_points as f64 / trials_f);
    println!("avg total B:        {:.2}", b_points as f64 / trials_f);
    println!("B yatzy rate:       {:.1}%", b_yatzys as f64 / trials_f * 100.0);

    Ok(())
}
