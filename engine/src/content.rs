use std::collections::HashMap;

pub fn builtin_pacing() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("default", include_str!("../content/pacing/default.yaml")),
        ("instant", include_str!("../content/pacing/instant.yaml")),
    ])
}

/// Built-in games by name, as `(file name, text)`. The file name's
/// extension picks the parser.
pub fn builtin_games() -> HashMap<&'static str, (&'static str, &'static str)> {
    HashMap::from([
        ("hell_max", ("hell_max.yaml", include_str!("../content/games/hell_max.yaml"))),
        ("pvp", ("pvp.json", include_str!("../content/games/pvp.json"))),
    ])
}
