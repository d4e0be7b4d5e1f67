// Copyright (C) 2020-2026 Andy Kurnia.

use xwords::alphabet::ENGLISH_ALPHABET;
use xwords::board_layout::{self, BonusOverlay};
use xwords::dictionary::WordList;
use xwords::game_config::{self, RuleSet, SearchLimits};
use xwords::matrix::{Dim, Direction, Pos};
use xwords::tile::Tile;
use xwords::{board, movegen, play_scorer, rack, validator};

fn plain_board(seed: Pos, letter: u8) -> board::Board {
    let dim = Dim { rows: 15, cols: 15 };
    board::Board::with_seed_tile(dim, BonusOverlay::new(dim), seed, Tile::letter(letter, &ENGLISH_ALPHABET)).unwrap()
}

fn place(b: &mut board::Board, from: Pos, direction: Direction, letters: &str) {
    for (i, letter) in (0i8..).zip(letters.bytes()) {
        if letter != b'.' {
            b.place(from.offset(direction, i), Tile::letter(letter, &ENGLISH_ALPHABET))
                .unwrap();
        }
    }
}

fn plain_config() -> game_config::GameConfig {
    game_config::make_crosswords_game_config().with_rules(RuleSet::default())
}

#[test]
fn far_away_words_are_not_connected() {
    let words = WordList::from_words(["CAT"]).unwrap();
    let mut b = plain_board(Pos::new(8, 8), b'A');
    place(&mut b, Pos::new(2, 2), Direction::S, "CAT");
    let result = validator::validate(&mut b, &words, &RuleSet::default(), true).unwrap();
    assert!(!result.ok);
    assert_eq!(result.reason, Some(validator::InvalidReason::NotConnected));
    assert_eq!(result.tile_count, 1);
    // the board is left as it was.
    assert_eq!(b.placed().len(), 3);
    assert_eq!(b.num_tiles(), 4);
}

#[test]
fn second_dog_is_a_duplicate() {
    let words = WordList::from_words(["DOG"]).unwrap();
    let rules = RuleSet {
        no_duplicates: true,
        ..RuleSet::default()
    };
    let mut b = plain_board(Pos::new(7, 7), b'O');
    place(&mut b, Pos::new(6, 7), Direction::E, "D.G");
    let first = validator::validate(&mut b, &words, &rules, true).unwrap();
    assert!(first.ok, "{:?}", first.reason);
    assert_eq!(first.score_delta, Some(2 + 1 + 2));
    b.accept_placement();

    // down from the G of the first.
    place(&mut b, Pos::new(8, 5), Direction::S, "DO");
    let second = validator::validate(&mut b, &words, &rules, true).unwrap();
    assert!(!second.ok);
    assert_eq!(
        second.reason,
        Some(validator::InvalidReason::DuplicateWord("DOG".into()))
    );
    b.rollback();
    let again = validator::validate(&mut b, &words, &rules, false).unwrap();
    assert_eq!(again.all_words.len(), 1);
}

// A at the center, I below it, X left of the I.
fn bx_board() -> board::Board {
    let mut b = plain_board(Pos::new(7, 7), b'A');
    b.set_tile(Pos::new(7, 8), Tile::letter(b'I', &ENGLISH_ALPHABET)).unwrap();
    b.set_tile(Pos::new(6, 8), Tile::letter(b'X', &ENGLISH_ALPHABET)).unwrap();
    b
}

#[test]
fn incidental_non_word_discards_the_candidate() {
    let b = bx_board();
    let rack = rack::Rack::from_letters(7, "BT", &ENGLISH_ALPHABET).unwrap();
    let words = WordList::from_words(["BAT", "AI", "XI"]).unwrap();
    let list = movegen::generate_candidates(&plain_config(), &words, SearchLimits::default(), &b, &rack).unwrap();
    assert!(list.entries().iter().all(|w| w.name != "BAT"));
    assert!(list.declined > 0);

    // the same play is fine once BX is a word.
    let words = WordList::from_words(["BAT", "AI", "XI", "BX"]).unwrap();
    let list = movegen::generate_candidates(&plain_config(), &words, SearchLimits::default(), &b, &rack).unwrap();
    let bat = list.entries().iter().find(|w| w.name == "BAT").unwrap();
    assert_eq!(bat.seed, Pos::new(6, 7));
    assert_eq!(bat.direction, Direction::E);
    // BAT, then BX.
    assert_eq!(bat.points, (3 + 1 + 1) + (3 + 8));
}

#[test]
fn crossword_check_on_a_tentative_word() {
    let mut b = bx_board();
    place(&mut b, Pos::new(6, 7), Direction::E, "B.T");
    let words = WordList::from_words(["BAT", "AI", "XI"]).unwrap();
    let mut scorer = play_scorer::PlayScorer::new();
    assert_eq!(scorer.score_word(&b, Pos::new(6, 7), Direction::E), 5);
    assert_eq!(
        scorer.check_illegal_crosswords(&b, &words, &RuleSet::default(), Pos::new(6, 7), Direction::E, 3),
        None
    );
    let result = validator::validate(&mut b, &words, &RuleSet::default(), false).unwrap();
    assert_eq!(result.reason, Some(validator::InvalidReason::NotWords));
    assert_eq!(result.non_words[0].name, "BX");
}

#[test]
fn cat_from_the_rack_crosses_the_seed() {
    let game_config = plain_config();
    let b = plain_board(game_config.dim().center(), b'A');
    let rack = rack::Rack::from_letters(7, "CAT", &ENGLISH_ALPHABET).unwrap();
    let words = WordList::from_words(["CAT", "TACT", "AA", "ZA"]).unwrap();
    let list = movegen::generate_candidates(&game_config, &words, SearchLimits::default(), &b, &rack).unwrap();
    let best = &list.entries()[0];
    assert_eq!(best.name, "CAT");
    assert!(best.points > 0);
    assert_eq!(best.provenance, Some(xwords::word::Provenance::OrdinaryCrossword));
    assert!(best.contains(game_config.dim().center()));
    for w in list.entries() {
        let mut tally = rack.tally();
        for (i, letter) in (0i8..).zip(w.name.bytes()) {
            if !b.is_occupied(w.seed.offset(w.direction, i)) {
                assert!(tally.take(letter), "{} needs {}", w.name, letter as char);
            }
        }
    }
    assert!(list.entries().iter().all(|w| w.name != "TACT" && w.name != "ZA"));
}

#[test]
fn blank_scores_nothing_but_reads_as_its_letter() {
    let words = WordList::from_words(["AT", "AX"]).unwrap();
    let rules = RuleSet::default();
    let mut b = plain_board(Pos::new(7, 7), b'A');
    b.place(Pos::new(8, 7), Tile::blank()).unwrap();
    b.assign_blank(Pos::new(8, 7), b'T').unwrap();
    let as_t = validator::validate(&mut b, &words, &rules, true).unwrap();
    assert!(as_t.ok);
    assert_eq!(as_t.score_delta, Some(1));
    b.assign_blank(Pos::new(8, 7), b'X').unwrap();
    let as_x = validator::validate(&mut b, &words, &rules, true).unwrap();
    b.rollback();

    place(&mut b, Pos::new(8, 7), Direction::E, "X");
    let real_x = validator::validate(&mut b, &words, &rules, true).unwrap();
    assert_eq!(as_x.ok, real_x.ok);
    assert_eq!(as_x.reason, real_x.reason);
    assert_eq!(as_x.new_words[0].name, real_x.new_words[0].name);
    assert_eq!(
        as_x.score_delta.unwrap() + ENGLISH_ALPHABET.score(b'X') as i32,
        real_x.score_delta.unwrap()
    );
}

#[test]
fn blank_keeps_bonus_bookkeeping() {
    let dim = Dim { rows: 15, cols: 15 };
    let mut overlay = BonusOverlay::new(dim);
    // touches (8, 7) only among the cells used.
    overlay.set(Pos::new(8, 6), board_layout::DWS);
    let mut b = board::Board::with_seed_tile(dim, overlay, Pos::new(7, 7), Tile::letter(b'A', &ENGLISH_ALPHABET)).unwrap();
    b.place(Pos::new(8, 7), Tile::blank()).unwrap();
    b.assign_blank(Pos::new(8, 7), b'T').unwrap();
    let words = WordList::from_words(["AT"]).unwrap();
    let result = validator::validate(&mut b, &words, &RuleSet::default(), true).unwrap();
    assert_eq!(result.score_delta, Some(2));
}

#[test]
fn validating_twice_agrees() {
    let words = WordList::from_words(["CAT", "AT"]).unwrap();
    let mut b = plain_board(Pos::new(7, 7), b'A');
    place(&mut b, Pos::new(6, 7), Direction::E, "C.TQ");
    let once = validator::validate(&mut b, &words, &RuleSet::default(), false).unwrap();
    let twice = validator::validate(&mut b, &words, &RuleSet::default(), false).unwrap();
    assert_eq!(once.ok, twice.ok);
    assert_eq!(once.reason, twice.reason);
    assert_eq!(once.tile_count, twice.tile_count);
}

#[test]
fn shortlist_stays_bounded_during_search() {
    let game_config = plain_config();
    let b = plain_board(game_config.dim().center(), b'A');
    let rack = rack::Rack::from_letters(7, "BCDEHMT", &ENGLISH_ALPHABET).unwrap();
    let words = WordList::from_words([
        "AB", "AD", "AE", "AH", "AM", "AT", "BA", "DA", "HA", "MA", "TA", "BAD", "BAT", "CAB", "CAD",
        "CAT", "DAB", "HAT", "MAT", "TAB", "BATH", "MATCH", "BATCH", "HATED", "BATHED",
    ])
    .unwrap();
    let limits = SearchLimits {
        size_limit: 4,
        threshold: 0.0,
        ..SearchLimits::default()
    };
    let list = movegen::generate_candidates(&game_config, &words, limits, &b, &rack).unwrap();
    assert!(list.len() <= 4);
    assert!(!list.is_empty());
    assert!(list.entries().iter().all(|w| w.points > list.least_score));
    assert!(list.entries().windows(2).all(|p| p[0].points >= p[1].points));
    assert_eq!(list.entries()[0].points, list.best_score);
}
