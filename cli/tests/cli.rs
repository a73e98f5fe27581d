use assert_cmd::Command;
use predicates::prelude::*;

fn yatzy() -> Command {
    Command::cargo_bin("yatzy").expect("yatzy binary")
}

#[test]
fn score_json_has_every_slot() {
    yatzy()
        .args(["score", "--dice", "2,2,2,3,3", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fullHouse":25"#))
        .stdout(predicate::str::contains(r#""threeKind":12"#))
        .stdout(predicate::str::contains(r#""yatzy":0"#));
}

#[test]
fn score_single_category() {
    yatzy()
        .args(["score", "--dice", "6 6 6 6 6", "--category", "YATZY"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hand [6 6 6 6 6]"))
        .stdout(predicate::str::contains("yatzy"))
        .stdout(predicate::str::contains("50"))
        .stdout(predicate::str::contains("fullHouse").not());
}

#[test]
fn bad_hand_is_an_error() {
    yatzy()
        .args(["score", "--dice", "1,2,3,4,9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 1..=6"));
}

#[test]
fn rules_lists_labels() {
    yatzy()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("House"))
        .stdout(predicate::str::contains("Score 50 points if all 5 dice match."));
}

#[test]
fn config_dump_of_builtin() {
    yatzy()
        .args(["config-dump", "--builtin", "hell_max"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""difficulty": "hell""#))
        .stdout(predicate::str::contains(r#""hell_intensity": 5"#));
}

#[test]
fn config_dump_rejects_bad_intensity() {
    yatzy()
        .args(["config-dump", "--difficulty", "hell", "--hell", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hell intensity must be 3..=5"));
}

#[test]
fn pvp_session_from_stdin() {
    yatzy()
        .args(["play", "--difficulty", "pvp", "--fast", "--first", "a", "--seed", "3"])
        .write_stdin("l 1\nr\ns chance\ns ones\nt\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== PLAYER 1 TURN =="))
        .stdout(predicate::str::contains("(dice can only be locked between rolls)"))
        .stdout(predicate::str::contains("could score:"))
        .stdout(predicate::str::contains("unknown category 'chance'"))
        .stdout(predicate::str::contains("== PLAYER 2 TURN =="))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn bot_opens_when_it_wins_the_toss() {
    yatzy()
        .args(["play", "--difficulty", "medium", "--fast", "--first", "b"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== BOT IS THINKING... =="))
        .stdout(predicate::str::contains("== YOUR TURN =="));
}

#[test]
fn simulate_vs_prints_rates() {
    Command::cargo_bin("simulate-vs")
        .expect("simulate-vs binary")
        .args(["--a", "medium", "--b", "hell", "--trials", "5", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trials:             5"))
        .stdout(predicate::str::contains("B win rate:"));
}

#[test]
fn finished_game_lists_scoring_order() {
    let ids = [
        "ones", "twos", "threes", "fours", "fives", "sixes", "threeKind", "fourKind",
        "fullHouse", "smStraight", "lgStraight", "yatzy",
    ];
    let mut script = String::new();
    for (a, b) in ids.iter().zip(ids.iter().rev()) {
        script.push_str(&format!("r\ns {a}\nr\ns {b}\n"));
    }
    let reversed = ids.iter().rev().copied().collect::<Vec<_>>().join(" ");

    yatzy()
        .args(["play", "--difficulty", "pvp", "--fast", "--first", "a", "--seed", "8"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("P1 order: {}", ids.join(" "))))
        .stdout(predicate::str::contains(format!("P2 order: {}", reversed)))
        .stdout(predicate::str::contains("P1: "));
}
