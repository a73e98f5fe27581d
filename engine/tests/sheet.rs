use engine::{evaluate, scoreboard, Category, Rejected, ScoreSheet, Winner};
use proptest::prelude::*;

fn sheet(entries: &[(Category, u32)]) -> ScoreSheet {
    let mut s = ScoreSheet::new();
    for (c, p) in entries {
        s.assign(*c, *p).unwrap();
    }
    s
}

#[test]
fn written_slot_never_changes() {
    let mut s = sheet(&[(Category::Sixes, 18)]);
    assert_eq!(s.assign(Category::Sixes, 30), Err(Rejected::CategoryTaken(Category::Sixes)));
    assert_eq!(s.get(Category::Sixes), Some(18));
    assert_eq!(s.filled(), 1);
}

#[test]
fn zero_counts_as_filled() {
    let s = sheet(&[(Category::Yatzy, 0)]);
    assert!(!s.is_open(Category::Yatzy));
    assert_eq!(s.get(Category::Yatzy), Some(0));
    assert_eq!(s.open().count(), 11);
}

#[test]
fn history_keeps_scoring_order() {
    let s = sheet(&[(Category::Yatzy, 50), (Category::Ones, 2), (Category::FullHouse, 25)]);
    let order: Vec<_> = s.history().map(|(c, _)| c).collect();
    assert_eq!(order, vec![Category::Yatzy, Category::Ones, Category::FullHouse]);
    assert_eq!(s.open().next(), Some(Category::Twos));
    assert_eq!(s.total(), 77);
}

#[test]
fn sheet_json_is_a_plain_map() {
    let s = sheet(&[(Category::FullHouse, 25), (Category::Ones, 0)]);
    let text = serde_json::to_string(&s).unwrap();
    assert_eq!(text, r#"{"fullHouse":25,"ones":0}"#);
    let back: ScoreSheet = serde_json::from_str(&text).unwrap();
    assert_eq!(back, s);
}

#[test]
fn evaluation_cases() {
    let a = sheet(&[(Category::Sixes, 24), (Category::Yatzy, 50)]);
    let b = sheet(&[(Category::FullHouse, 25), (Category::LgStraight, 40)]);
    let e = evaluate(&a, &b);
    assert_eq!(e.winner, Winner::A);
    assert_eq!((e.total_a, e.total_b), (74, 65));

    let tie = evaluate(&ScoreSheet::new(), &ScoreSheet::new());
    assert_eq!(tie.winner, Winner::Tie);
}

#[test]
fn scoreboard_layout() {
    let a = sheet(&[(Category::Ones, 3), (Category::FullHouse, 25), (Category::Yatzy, 50)]);
    let b = sheet(&[(Category::Sixes, 18), (Category::SmStraight, 30), (Category::Yatzy, 0)]);
    insta::assert_snapshot!(scoreboard(&a, &b, ("You", "Bot")), @r"
                   You   Bot
    Ones             3     -
    Twos             -     -
    Threes           -     -
    Fours            -     -
    Fives            -     -
    Sixes            -    18
    3 of a Kind      -     -
    4 of a Kind      -     -
    House           25     -
    Small            -    30
    Large            -     -
    Yatzy           50     0
    Total           78    48
    ");
}

fn arb_sheet() -> impl Strategy<Value = ScoreSheet> {
    prop::collection::vec(0u32..=50, 12).prop_map(|points| {
        let mut s = ScoreSheet::new();
        for (c, p) in Category::ALL.into_iter().zip(points) {
            s.assign(c, p).unwrap();
        }
        s
    })
}

proptest! {
    #[test]
    fn swapping_sides_swaps_the_winner(a in arb_sheet(), b in arb_sheet()) {
        let ab = evaluate(&a, &b);
        let ba = evaluate(&b, &a);
        prop_assert_eq!(ab.total_a, ba.total_b);
        prop_assert_eq!(ab.total_b, ba.total_a);
        let mirrored = match ab.winner {
            Winner::A => Winner::B,
            Winner::B => Winner::A,
            Winner::Tie => Winner::Tie,
        };
        prop_assert_eq!(ba.winner, mirrored);
    }

    #[test]
    fn a_sheet_against_itself_ties(a in arb_sheet()) {
        prop_assert_eq!(evaluate(&a, &a).winner, Winner::Tie);
    }

    #[test]
    fn evaluating_does_not_touch_the_sheets(a in arb_sheet(), b in arb_sheet()) {
        let (before_a, before_b) = (a.clone(), b.clone());
        let _ = evaluate(&a, &b);
        prop_assert_eq!(a, before_a);
        prop_assert_eq!(b, before_b);
    }
}
