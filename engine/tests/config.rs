use std::path::Path;

use engine::config::config_from_str;
use engine::{load_config, Difficulty, GameConfig, HellIntensity, Mode, Pacing, Side};

#[test]
fn yaml_config_with_defaults() {
    let text = "difficulty: hell\nseed: 9\nhell_intensity: 4\n";
    let cfg = config_from_str(text, Path::new("game.yaml")).unwrap();
    assert_eq!(cfg.difficulty, Difficulty::Hell);
    assert_eq!(cfg.mode, Mode::SoloVsBot);
    assert_eq!(cfg.seed, 9);
    assert_eq!(cfg.hell_intensity, Some(HellIntensity::new(4).unwrap()));
    assert_eq!(cfg.first_side, None);
    assert_eq!(cfg.pacing, Pacing::default());
}

#[test]
fn json_config_with_partial_pacing() {
    let text = r#"{"mode":"pvp","first_side":"b","pacing":{"roll_ms":50}}"#;
    let cfg = config_from_str(text, Path::new("game.json")).unwrap();
    assert_eq!(cfg.mode, Mode::Pvp);
    assert_eq!(cfg.first_side, Some(Side::B));
    assert_eq!(cfg.pacing.roll_ms, 50);
    assert_eq!(cfg.pacing.bot_think_ms, 800);
}

#[test]
fn intensity_outside_three_to_five_is_refused() {
    let err = config_from_str("difficulty: hell\nhell_intensity: 9\n", Path::new("bad.yml"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("bad.yml"));
    assert!(config_from_str(r#"{"hell_intensity":2}"#, Path::new("bad.json")).is_err());
}

#[test]
fn config_file_from_disk() {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_config(&manifest.join("content/games/hell_max.yaml")).unwrap();
    assert_eq!(cfg, GameConfig::builtin("hell_max").unwrap());
    assert!(load_config(&manifest.join("content/games/missing.yaml")).is_err());
}

#[test]
fn builtin_games() {
    let hell = GameConfig::builtin("hell_max").unwrap();
    assert_eq!(hell.difficulty, Difficulty::Hell);
    assert_eq!(hell.hell_intensity, Some(HellIntensity::new(5).unwrap()));
    assert_eq!(hell.first_side, Some(Side::B));

    let pvp = GameConfig::builtin("pvp").unwrap();
    assert_eq!(pvp.mode, Mode::Pvp);
    assert_eq!(pvp.seed, 7);

    assert!(GameConfig::builtin("nope").is_err());
}

#[test]
fn pacing_presets() {
    assert_eq!(Pacing::preset("default").unwrap(), Pacing::default());
    assert_eq!(Pacing::preset("instant").unwrap(), Pacing::instant());
    assert!(Pacing::preset("glacial").is_err());
    assert_eq!(Pacing::default().roll().as_millis(), 600);
    assert_eq!(Pacing::default().implicit_roll().as_millis(), 200);
}

#[test]
fn difficulty_names() {
    assert_eq!("hell".parse::<Difficulty>().unwrap(), Difficulty::Hell);
    assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
    assert!("nightmare".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Hard.to_string(), "HARD");
}

#[test]
fn config_serializes_back_to_the_same_value() {
    let cfg = GameConfig::solo(Difficulty::Hell, 3)
        .with_first_side(Side::A)
        .with_hell_intensity(HellIntensity::new(5).unwrap());
    let text = serde_json::to_string(&cfg).unwrap();
    assert!(text.contains(r#""hell_intensity":5"#));
    let back: GameConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn every_builtin_game_parses_by_its_file_name() {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    for (name, (file, _)) in engine::content::builtin_games() {
        let builtin = GameConfig::builtin(name).unwrap();
        let on_disk = load_config(&manifest.join("content/games").join(file)).unwrap();
        assert_eq!(builtin, on_disk, "{name}");
    }
}
