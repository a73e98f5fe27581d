use engine::bot::{best_category, lock_most_frequent, lock_straight_draw, Weighting};
use engine::{
    policy_for, BotPolicy, Category, Difficulty, Hand, HellIntensity, LockMask, RollBias,
    ScoreSheet,
};

fn hand(faces: [u8; 5]) -> Hand {
    Hand::new(faces).expect("valid hand")
}

fn filled_except(open: &[Category]) -> ScoreSheet {
    let mut sheet = ScoreSheet::new();
    for c in Category::ALL {
        if !open.contains(&c) {
            sheet.assign(c, 0).unwrap();
        }
    }
    sheet
}

#[test]
fn most_frequent_face_ties_go_low() {
    let locks = lock_most_frequent(&hand([5, 2, 5, 2, 1]));
    assert_eq!(locks, LockMask::new([false, true, false, true, false]));
}

#[test]
fn singletons_are_not_held() {
    assert_eq!(lock_most_frequent(&hand([1, 2, 3, 4, 6])), LockMask::NONE);
}

#[test]
fn straight_draw_frees_duplicates() {
    let locks = lock_straight_draw(&hand([1, 2, 2, 3, 4])).unwrap();
    assert_eq!(locks, LockMask::new([true, true, false, true, true]));
    assert_eq!(lock_straight_draw(&hand([1, 1, 2, 2, 3])), None);
}

#[test]
fn roll_budgets_per_difficulty() {
    assert_eq!(policy_for(Difficulty::Easy, None).rerolls(), 0);
    assert_eq!(policy_for(Difficulty::Medium, None).rerolls(), 2);
    assert_eq!(policy_for(Difficulty::Hard, None).rerolls(), 2);
    assert_eq!(policy_for(Difficulty::Hell, None).rerolls(), 2);
}

#[test]
fn easy_keeps_what_it_holds() {
    let easy = policy_for(Difficulty::Easy, None);
    let held = LockMask::new([true, false, false, false, false]);
    assert_eq!(easy.choose_locks(&hand([6, 6, 6, 6, 1]), &held), held);
}

#[test]
fn hard_prefers_high_upper_slots() {
    let h = hand([6, 6, 6, 2, 3]);
    let sheet = ScoreSheet::new();
    assert_eq!(best_category(&h, &sheet, Weighting::Plain), Some(Category::ThreeKind));
    assert_eq!(best_category(&h, &sheet, Weighting::HighFaces), Some(Category::Sixes));
    let hard = policy_for(Difficulty::Hard, None);
    assert_eq!(hard.choose_category(&h, &sheet), Some(Category::Sixes));
    let medium = policy_for(Difficulty::Medium, None);
    assert_eq!(medium.choose_category(&h, &sheet), Some(Category::ThreeKind));
}

#[test]
fn hard_goes_for_the_straight_draw() {
    let hard = policy_for(Difficulty::Hard, None);
    let locks = hard.choose_locks(&hand([6, 5, 4, 3, 3]), &LockMask::NONE);
    assert_eq!(locks, LockMask::new([true, true, true, true, false]));
    let locks = hard.choose_locks(&hand([6, 6, 1, 3, 3]), &LockMask::NONE);
    assert_eq!(locks, LockMask::new([false, false, false, true, true]));
}

#[test]
fn live_yatzy_beats_big_upper_score() {
    let h = hand([5, 5, 5, 5, 5]);
    let sheet = ScoreSheet::new();
    assert_eq!(best_category(&h, &sheet, Weighting::HighFaces), Some(Category::Yatzy));
}

#[test]
fn all_zero_hand_lands_in_first_open_slot() {
    let sheet = filled_except(&[Category::FourKind, Category::Yatzy]);
    let h = hand([1, 2, 3, 4, 6]);
    assert_eq!(best_category(&h, &sheet, Weighting::Plain), Some(Category::FourKind));
    assert_eq!(best_category(&h, &sheet, Weighting::HighFaces), Some(Category::FourKind));
}

#[test]
fn ties_go_to_sheet_order() {
    let sheet = filled_except(&[Category::Twos, Category::Threes]);
    let h = hand([3, 3, 2, 2, 2]);
    assert_eq!(best_category(&h, &sheet, Weighting::Plain), Some(Category::Twos));
}

#[test]
fn full_sheet_has_no_choice() {
    let sheet = filled_except(&[]);
    let bot = policy_for(Difficulty::Medium, None);
    assert_eq!(bot.choose_category(&Hand::default(), &sheet), None);
}

#[test]
fn hell_policy_follows_intensity() {
    let top = policy_for(Difficulty::Hell, Some(HellIntensity::new(5).unwrap()));
    assert_eq!(top.roll_bias(), RollBias::Forced);
    assert_eq!(top.choose_locks(&hand([1, 2, 3, 4, 6]), &LockMask::NONE), LockMask::ALL);

    let mid = policy_for(Difficulty::Hell, Some(HellIntensity::new(4).unwrap()));
    assert_eq!(mid.roll_bias(), RollBias::Loaded { chance: 0.75 });

    let unset = policy_for(Difficulty::Hell, None);
    assert_eq!(unset.roll_bias(), RollBias::Loaded { chance: 0.5 });
    assert_eq!(policy_for(Difficulty::Hard, None).roll_bias(), RollBias::Fair);
}
