use std::{fmt, fs, path::Path, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::content::{builtin_games, builtin_pacing};
use crate::error::ConfigError;
use crate::roll::HellIntensity;
use crate::sheet::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Hell];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Hell => "HELL",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    SoloVsBot,
    Pvp,
}

/// Delays between table steps, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Hand-off to the bot until its first roll.
    pub bot_start_ms: u64,
    /// Dice tumbling before the new faces land.
    pub roll_ms: u64,
    /// Bot looking at the dice before each decision.
    pub bot_think_ms: u64,
    /// Bot's pick shown on the sheet before the turn passes.
    pub bot_score_ms: u64,
    /// Category clicked before anything was rolled.
    pub implicit_roll_ms: u64,
    /// How long a turn banner stays up. Only passed to the presenter.
    pub banner_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            bot_start_ms: 1000,
            roll_ms: 600,
            bot_think_ms: 800,
            bot_score_ms: 1000,
            implicit_roll_ms: 200,
            banner_ms: 1200,
        }
    }
}

impl Pacing {
    pub fn instant() -> Self {
        Self {
            bot_start_ms: 0,
            roll_ms: 0,
            bot_think_ms: 0,
            bot_score_ms: 0,
            implicit_roll_ms: 0,
            banner_ms: 0,
        }
    }

    /// One of the presets bundled under `content/pacing`.
    pub fn preset(name: &str) -> Result<Self> {
        let presets = builtin_pacing();
        let text = presets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        serde_yaml::from_str(text).with_context(|| format!("failed to parse pacing preset: {}", name))
    }

    pub fn bot_start(&self) -> Duration {
        Duration::from_millis(self.bot_start_ms)
    }

    pub fn roll(&self) -> Duration {
        Duration::from_millis(self.roll_ms)
    }

    pub fn bot_think(&self) -> Duration {
        Duration::from_millis(self.bot_think_ms)
    }

    pub fn bot_score(&self) -> Duration {
        Duration::from_millis(self.bot_score_ms)
    }

    pub fn implicit_roll(&self) -> Duration {
        Duration::from_millis(self.implicit_roll_ms)
    }

    pub fn banner(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }
}

/// Everything chosen in the lobby before the first roll.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GameConfig {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub seed: u64,
    /// Drawn from the seed when absent. Only read under HELL.
    #[serde(default)]
    pub hell_intensity: Option<HellIntensity>,
    /// Coin flip when absent.
    #[serde(default)]
    pub first_side: Option<Side>,
    #[serde(default)]
    pub pacing: Pacing,
}

impl GameConfig {
    pub fn solo(difficulty: Difficulty, seed: u64) -> Self {
        Self { difficulty, seed, ..Self::default() }
    }

    pub fn pvp(seed: u64) -> Self {
        Self { mode: Mode::Pvp, seed, ..Self::default() }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_first_side(mut self, side: Side) -> Self {
        self.first_side = Some(side);
        self
    }

    pub fn with_hell_intensity(mut self, intensity: HellIntensity) -> Self {
        self.hell_intensity = Some(intensity);
        self
    }

    /// One of the games bundled under `content/games`.
    pub fn builtin(name: &str) -> Result<Self> {
        let games = builtin_games();
        let (file, text) = games
            .get(name)
            .with_context(|| format!("unknown built-in game: {}", name))?;
        config_from_str(text, Path::new(file))
            .with_context(|| format!("failed to load built-in game: {}", name))
    }
}

/// Reads a game config from JSON, or YAML when the extension says so.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config: {}", path.display()))?;
    config_from_str(&text, path)
}

/// Parses already-loaded config text; `path` only picks the format.
pub fn config_from_str(text: &str, path: &Path) -> Result<GameConfig> {
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    parse_config(text, !yaml)
        .with_context(|| format!("failed to parse game config: {}", path.display()))
}

fn parse_config(text: &str, json: bool) -> Result<GameConfig> {
    if json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}
