use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use engine::config::config_from_str;
use engine::{
    score, Category, Difficulty, Game, GameConfig, Hand, HellIntensity, Mode, Pacing, Side,
};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    thread,
};
use tracing_subscriber::EnvFilter;

mod term;

use term::TermPresenter;

#[derive(Copy, Clone, ValueEnum)]
enum Tier {
    Easy,
    Medium,
    Hard,
    Hell,
    Pvp,
}

#[derive(Copy, Clone, ValueEnum)]
enum First {
    A,
    B,
}

#[derive(Subcommand)]
enum Cmd {
    /// Score a hand in every category
    Score {
        /// Five dice, e.g. 2,2,2,3,3
        #[arg(long)]
        dice: String,
        /// Only print this category (id, e.g. fullHouse)
        #[arg(long)]
        category: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print every category with its rule
    Rules,
    /// Play at the terminal against the bot or a friend
    Play {
        #[command(flatten)]
        setup: Setup,
        /// Skip all delays
        #[arg(long, default_value_t = false)]
        fast: bool,
    },
    /// Print the effective game config as JSON
    ConfigDump {
        #[command(flatten)]
        setup: Setup,
    },
}

#[derive(clap::Args)]
struct Setup {
    /// Lobby choice
    #[arg(long, value_enum, default_value_t = Tier::Easy)]
    difficulty: Tier,
    /// RNG seed for determinism
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Who opens (coin flip when omitted)
    #[arg(long, value_enum)]
    first: Option<First>,
    /// Pin the HELL intensity (3..=5)
    #[arg(long)]
    hell: Option<u8>,
    /// Pacing preset: default | instant
    #[arg(long, default_value = "default")]
    pacing: String,
    /// Game config file (JSON, or YAML by extension); replaces the flags above
    #[arg(long)]
    config: Option<PathBuf>,
    /// Built-in game config by name (hell_max, pvp)
    #[arg(long, conflicts_with = "config")]
    builtin: Option<String>,
}

#[derive(Parser)]
#[command(name = "yatzy")]
#[command(about = "Yatzy table: score hands or play against the bot")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_difficulty(t: Tier) -> (Difficulty, Mode) {
    match t {
        Tier::Easy => (Difficulty::Easy, Mode::SoloVsBot),
        Tier::Medium => (Difficulty::Medium, Mode::SoloVsBot),
        Tier::Hard => (Difficulty::Hard, Mode::SoloVsBot),
        Tier::Hell => (Difficulty::Hell, Mode::SoloVsBot),
        Tier::Pvp => (Difficulty::Easy, Mode::Pvp),
    }
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn build_config(setup: &Setup) -> anyhow::Result<GameConfig> {
    if let Some(path) = setup.config.as_ref() {
        let text = read_text_auto(path)?;
        return config_from_str(&text, path);
    }
    if let Some(name) = setup.builtin.as_ref() {
        return GameConfig::builtin(name);
    }
    let (difficulty, mode) = to_difficulty(setup.difficulty);
    let mut cfg = GameConfig {
        difficulty,
        mode,
        seed: setup.seed,
        ..GameConfig::default()
    }
    .with_pacing(Pacing::preset(&setup.pacing)?);
    if let Some(first) = setup.first {
        cfg = cfg.with_first_side(match first {
            First::A => Side::A,
            First::B => Side::B,
        });
    }
    if let Some(level) = setup.hell {
        cfg = cfg.with_hell_intensity(HellIntensity::new(level)?);
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Score {
            dice,
            category,
            json,
        } => {
            let hand: Hand = dice.parse()?;
            let cats: Vec<Category> = match category {
                Some(id) => vec![id.parse()?],
                None => Category::ALL.to_vec(),
            };
            if json {
                let map: serde_json::Map<String, serde_json::Value> = cats
                    .iter()
                    .map(|c| (c.id().to_string(), score(&hand, *c).into()))
                    .collect();
                println!("{}", serde_json::to_string(&map)?);
            } else {
                println!("hand {}", hand);
                for c in cats {
                    println!("{:<12} {:>3}", c.id(), score(&hand, c));
                }
            }
        }
        Cmd::Rules => {
            for c in Category::ALL {
                println!("{:<12} {:<12} {}", c.id(), c.label(), c.rule());
            }
        }
        Cmd::Play { setup, fast } => {
            let mut cfg = build_config(&setup)?;
            if fast {
                cfg.pacing = Pacing::instant();
            }
            play(cfg)?;
        }
        Cmd::ConfigDump { setup } => {
            let cfg = build_config(&setup)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }
    Ok(())
}

enum Input {
    Roll,
    Toggle(usize),
    Select(Category),
    Table,
    Potentials,
    Restart,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or("").to_lowercase();
    let arg = words.next();
    match (head.as_str(), arg) {
        ("r" | "roll", _) => Ok(Input::Roll),
        ("l" | "lock", Some(n)) => n
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=5).contains(n))
            .map(|n| Input::Toggle(n - 1))
            .ok_or_else(|| format!("die must be 1-5, got {}", n)),
        ("s" | "score", Some(id)) => id.parse().map(Input::Select).map_err(|e| format!("{}", e)),
        ("t" | "table", _) => Ok(Input::Table),
        ("p" | "potentials", _) => Ok(Input::Potentials),
        ("n" | "new", _) => Ok(Input::Restart),
        ("h" | "help" | "?", _) => Ok(Input::Help),
        ("q" | "quit", _) => Ok(Input::Quit),
        _ => Err(format!("unknown command '{}', try 'help'", line.trim())),
    }
}

const HELP: &str = "commands: r(oll) | l(ock) <1-5> | s(core) <category> | t(able) | p(otentials) | n(ew) | q(uit)";

fn play(cfg: GameConfig) -> anyhow::Result<()> {
    let mut out = TermPresenter::new(cfg.mode);
    let mut game = Game::start(&cfg, &mut out);
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        game.run_pending(&mut out, |delay| thread::sleep(delay))?;
        if game.outcome().is_some() {
            break;
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        let result = match input {
            Input::Roll => game.on_roll_requested(&mut out),
            Input::Toggle(idx) => game.on_die_toggled(idx, &mut out),
            Input::Select(category) => game.on_category_selected(category, &mut out),
            Input::Table => {
                out.print_table();
                continue;
            }
            Input::Potentials => {
                let pots = game.potentials();
                if pots.is_empty() {
                    println!("roll first");
                }
                for (c, p) in pots {
                    println!("{:<12} {:>3}", c.id(), p);
                }
                continue;
            }
            Input::Restart => {
                out.reset(cfg.mode);
                game.restart(&cfg, &mut out);
                continue;
            }
            Input::Help => {
                println!("{}", HELP);
                continue;
            }
            Input::Quit => break,
        };
        if let Err(rejected) = result {
            tracing::debug!(%rejected, "input ignored");
            println!("({})", rejected);
        }
    }
    Ok(())
}
