// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, dictionary, game_config, matrix};

// Word bonuses already applied to the word being scored. Four is enough:
// one letter touches at most four corners.
#[derive(Default)]
struct BonusRing {
    posts: [Option<matrix::Pos>; 4],
}

impl BonusRing {
    #[inline(always)]
    fn clear(&mut self) {
        self.posts = [None; 4];
    }

    // true iff post was not seen yet.
    #[inline(always)]
    fn add(&mut self, post: matrix::Pos) -> bool {
        if self.posts.contains(&Some(post)) {
            return false;
        }
        self.posts.rotate_left(1);
        self.posts[3] = Some(post);
        true
    }
}

#[derive(Default)]
pub struct PlayScorer {
    ring: BonusRing,
    word_multiplier: i32,
}

impl PlayScorer {
    pub fn new() -> Self {
        Self::default()
    }

    // letter bonuses stack on every touching corner, word bonuses count once.
    fn score_new_letter(&mut self, board: &board::Board, pos: matrix::Pos, value: i32) -> i32 {
        let mut letter_score = value;
        for (post, premium) in board.bonuses().touching(pos) {
            letter_score *= premium.tile_multiplier as i32;
            if premium.is_word_bonus() && self.ring.add(post) {
                self.word_multiplier *= premium.word_multiplier as i32;
            }
        }
        letter_score
    }

    // Scores the run from `from` until the first empty cell. Only tiles of
    // the current move get bonuses.
    pub fn score_word(
        &mut self,
        board: &board::Board,
        from: matrix::Pos,
        direction: matrix::Direction,
    ) -> i32 {
        self.ring.clear();
        self.word_multiplier = 1;
        let mut score = 0;
        let mut at = from;
        while let Some(tile) = board.tile_at(at) {
            score += if board.is_placed(at) {
                self.score_new_letter(board, at, tile.value())
            } else {
                tile.value()
            };
            at = at.offset(direction, 1);
        }
        score * self.word_multiplier
    }

    // How many times a run is recorded as a word: once per reading that is
    // in the dictionary. A palindrome counts once.
    pub fn readings(
        dictionary: &dyn dictionary::Dictionary,
        rules: &game_config::RuleSet,
        letters: &[u8],
    ) -> i32 {
        let mut count = dictionary.lookup_bytes(letters).is_some() as i32;
        if rules.backwards {
            let reversed = letters.iter().rev().copied().collect::<Vec<_>>();
            if reversed != letters && dictionary.lookup_bytes(&reversed).is_some() {
                count += 1;
            }
        }
        count
    }

    // Perpendicular runs formed by the current move's tiles along the word
    // from head. None if any of them is not a word, otherwise their total
    // score, each reading counted. The dictionary is consulted without a
    // vocabulary limit.
    pub fn check_illegal_crosswords(
        &mut self,
        board: &board::Board,
        dictionary: &dyn dictionary::Dictionary,
        rules: &game_config::RuleSet,
        head: matrix::Pos,
        direction: matrix::Direction,
        len: usize,
    ) -> Option<i32> {
        let mut extra_score = 0;
        for at in (0..len as i8).map(|i| head.offset(direction, i)) {
            if !board.is_placed(at) {
                continue;
            }
            for &axis in matrix::ALL_DIRECTIONS[..4].iter() {
                if axis.same_axis(direction) || (axis.is_diagonal() && !rules.diagonals) {
                    continue;
                }
                let reading = if rules.reads(axis) { axis } else { axis.opposite() };
                let mut start = at;
                while let Some(prev) = board.occupied_neighbor(start, reading.opposite()) {
                    start = prev;
                }
                let (letters, _) = board.collect_run(start, reading);
                if letters.len() < 2 {
                    continue;
                }
                let readings = Self::readings(dictionary, rules, &letters);
                if readings == 0 {
                    tracing::trace!(
                        "illegal crossword {} at {}",
                        String::from_utf8_lossy(&letters),
                        start
                    );
                    return None;
                }
                // either end scores the same.
                extra_score += self.score_word(board, start, reading) * readings;
            }
        }
        Some(extra_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use crate::board_layout::{BonusOverlay, DLS, DWS, TWS};
    use crate::dictionary::WordList;
    use crate::matrix::{Dim, Direction, Pos};
    use crate::tile::Tile;

    fn board_with(bonuses: &[(Pos, crate::board_layout::Premium)]) -> board::Board {
        let dim = Dim { rows: 9, cols: 9 };
        let mut overlay = BonusOverlay::new(dim);
        for &(post, premium) in bonuses {
            overlay.set(post, premium);
        }
        board::Board::new(dim, overlay)
    }

    fn place_word(b: &mut board::Board, from: Pos, direction: Direction, word: &str) {
        for (i, letter) in (0i8..).zip(word.bytes()) {
            let tile = if letter.is_ascii_lowercase() {
                Tile::Blank {
                    assigned: Some(letter.to_ascii_uppercase()),
                }
            } else {
                Tile::letter(letter, &ENGLISH_ALPHABET)
            };
            b.place(from.offset(direction, i), tile).unwrap();
        }
    }

    #[test]
    fn word_bonus_counts_once_per_word() {
        // the corner between C and A touches both letters.
        let mut b = board_with(&[(Pos::new(1, 1), DWS)]);
        place_word(&mut b, Pos::new(1, 2), Direction::E, "CAT");
        let mut scorer = PlayScorer::new();
        assert_eq!(scorer.score_word(&b, Pos::new(1, 2), Direction::E), (3 + 1 + 1) * 2);
    }

    #[test]
    fn letter_bonus_applies_to_every_touching_letter() {
        let mut b = board_with(&[(Pos::new(1, 1), DLS)]);
        place_word(&mut b, Pos::new(1, 2), Direction::E, "CAT");
        let mut scorer = PlayScorer::new();
        assert_eq!(scorer.score_word(&b, Pos::new(1, 2), Direction::E), 3 * 2 + 2 + 1);
    }

    #[test]
    fn old_letters_get_no_bonus() {
        let mut b = board_with(&[(Pos::new(1, 1), TWS)]);
        b.set_word(&ENGLISH_ALPHABET, Pos::new(1, 2), Direction::E, "CA").unwrap();
        place_word(&mut b, Pos::new(3, 2), Direction::E, "T");
        let mut scorer = PlayScorer::new();
        assert_eq!(scorer.score_word(&b, Pos::new(1, 2), Direction::E), 5);
    }

    #[test]
    fn blanks_are_worth_nothing_but_keep_word_bonus() {
        let mut b = board_with(&[(Pos::new(1, 1), DWS)]);
        place_word(&mut b, Pos::new(1, 2), Direction::E, "cAT");
        let mut scorer = PlayScorer::new();
        assert_eq!(scorer.score_word(&b, Pos::new(1, 2), Direction::E), (1 + 1) * 2);
    }

    #[test]
    fn crosswords_must_be_words() {
        let words = WordList::from_words(["BAT", "BE", "AT", "TO"]).unwrap();
        let rules = game_config::RuleSet::default();
        let mut b = board_with(&[]);
        b.set_word(&ENGLISH_ALPHABET, Pos::new(2, 3), Direction::E, "X").unwrap();
        b.set_word(&ENGLISH_ALPHABET, Pos::new(4, 3), Direction::E, "O").unwrap();
        b.accept_placement();
        let mut scorer = PlayScorer::new();

        // T above O makes TO.
        place_word(&mut b, Pos::new(2, 2), Direction::E, "BAT");
        // B above X makes BX.
        assert_eq!(
            scorer.check_illegal_crosswords(&b, &words, &rules, Pos::new(2, 2), Direction::E, 3),
            None
        );
        b.rollback();

        place_word(&mut b, Pos::new(3, 2), Direction::E, "AT");
        assert_eq!(
            scorer.check_illegal_crosswords(&b, &words, &rules, Pos::new(3, 2), Direction::E, 2),
            Some(2)
        );
    }

    #[test]
    fn crosswords_count_each_reading() {
        let words = WordList::from_words(["AT", "TA", "ABA"]).unwrap();
        let backwards = game_config::RuleSet {
            backwards: true,
            ..game_config::RuleSet::default()
        };
        let mut b = board_with(&[]);
        b.set_word(&ENGLISH_ALPHABET, Pos::new(3, 3), Direction::E, "A").unwrap();
        b.accept_placement();
        let mut scorer = PlayScorer::new();

        // TA down, AT up.
        place_word(&mut b, Pos::new(3, 2), Direction::E, "T");
        assert_eq!(
            scorer.check_illegal_crosswords(
                &b,
                &words,
                &game_config::RuleSet::default(),
                Pos::new(3, 2),
                Direction::E,
                1
            ),
            Some(2)
        );
        assert_eq!(
            scorer.check_illegal_crosswords(&b, &words, &backwards, Pos::new(3, 2), Direction::E, 1),
            Some(4)
        );

        assert_eq!(PlayScorer::readings(&words, &backwards, b"ABA"), 1);
        assert_eq!(PlayScorer::readings(&words, &backwards, b"TA"), 2);
        assert_eq!(PlayScorer::readings(&words, &backwards, b"TB"), 0);
    }
}
