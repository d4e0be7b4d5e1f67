// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, error, game_config, matrix, rack, tile, validator, word};

// note: in this representation an uppercase letter is a real tile and a
// lowercase letter is a blank standing for that letter. "?" on a rack is an
// unassigned blank.

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct JsonWord {
    pub col: i8,
    pub row: i8,
    pub direction: matrix::Direction,
    pub word: String,
}

impl From<&word::Word> for JsonWord {
    #[inline(always)]
    fn from(w: &word::Word) -> Self {
        Self {
            col: w.seed.col,
            row: w.seed.row,
            direction: w.direction,
            word: w.name.clone(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct JsonCandidate {
    #[serde(flatten)]
    pub word: JsonWord,
    pub points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<word::Provenance>,
}

impl From<&word::Word> for JsonCandidate {
    #[inline(always)]
    fn from(w: &word::Word) -> Self {
        Self {
            word: w.into(),
            points: w.points,
            order: w.order,
            provenance: w.provenance,
        }
    }
}

impl From<&JsonCandidate> for word::Word {
    #[inline(always)]
    fn from(c: &JsonCandidate) -> Self {
        let mut w = word::Word::new(
            matrix::Pos::new(c.word.col, c.word.row),
            c.word.word.to_ascii_uppercase(),
            c.word.direction,
        );
        w.points = c.points;
        w.order = c.order;
        w.provenance = c.provenance;
        w
    }
}

#[derive(serde::Serialize, Debug)]
pub struct JsonValidation {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<validator::InvalidReason>,
    pub new_words: Vec<JsonCandidate>,
    pub all_words: Vec<JsonWord>,
    pub non_words: Vec<JsonWord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_delta: Option<i32>,
}

impl From<&validator::ValidationResult> for JsonValidation {
    fn from(result: &validator::ValidationResult) -> Self {
        Self {
            ok: result.ok,
            reason: result.reason.clone(),
            new_words: result.new_words.iter().map(|w| w.into()).collect(),
            all_words: result.all_words.iter().map(|w| w.into()).collect(),
            non_words: result.non_words.iter().map(|w| w.into()).collect(),
            score_delta: result.score_delta,
        }
    }
}

// Rebuilds a position from words on the board and a rack, checking that
// the tile set can supply them.
pub struct Kibitzer {
    pub available_tally: Vec<u8>,
    pub available_blanks: u8,
}

impl Kibitzer {
    pub fn new() -> Self {
        Self {
            available_tally: Vec::new(),
            available_blanks: 0,
        }
    }

    fn use_tile(&mut self, alphabet: &alphabet::Alphabet, t: tile::Tile) -> error::Returns<()> {
        if t.is_blank() {
            if self.available_blanks == 0 {
                return_error!(format!(
                    "too many blanks (bag contains only {})",
                    alphabet.blank_freq()
                ));
            }
            self.available_blanks -= 1;
            return Ok(());
        }
        let Some(letter) = t.face() else {
            return_error!("tile without a letter".into());
        };
        let Some(idx) = alphabet::letter_index(letter) else {
            return_error!(format!("invalid tile {:?}", letter as char));
        };
        let available = &mut self.available_tally[idx as usize];
        if *available == 0 {
            return_error!(format!(
                "too many tile {} (bag contains only {})",
                letter as char,
                alphabet.freq(letter)
            ));
        }
        *available -= 1;
        Ok(())
    }

    // the first word laid also places the seed. bonus_key of None means a plain board.
    pub fn prepare(
        &mut self,
        game_config: &game_config::GameConfig,
        rack_letters: &str,
        board_words: &[JsonWord],
        bonus_key: Option<u64>,
    ) -> error::Returns<(board::Board, rack::Rack)> {
        let alphabet = game_config.alphabet();
        let dim = game_config.dim();
        self.available_tally.clear();
        self.available_tally
            .extend((0..alphabet::NUM_LETTERS).map(|i| alphabet.freq(alphabet::letter_from_index(i))));
        self.available_blanks = alphabet.blank_freq();

        let rack_size = game_config.rack_size() as usize;
        if rack_letters.len() > rack_size {
            return_error!(format!(
                "rack: need at most {} tiles, found {}",
                rack_size,
                rack_letters.len()
            ));
        }
        let rack = rack::Rack::from_letters(rack_size, rack_letters, alphabet)?;
        for t in rack.tiles() {
            self.use_tile(alphabet, t)?;
        }

        let bonuses = match bonus_key {
            Some(key) => board_layout::BonusOverlay::randomized(dim, key),
            None => board_layout::BonusOverlay::new(dim),
        };
        let mut board = board::Board::new(dim, bonuses);
        for (word_num, w) in (0..).zip(board_words) {
            let at = matrix::Pos::new(w.col, w.row);
            let last = at.offset(w.direction, (w.word.len() as i8 - 1).max(0));
            if !dim.contains(at) || !dim.contains(last) {
                return_error!(format!("board word {} (0-based): {} does not fit at {}", word_num, w.word, at));
            }
            board.set_word(alphabet, at, w.direction, &w.word)?;
        }
        for pos in board.occupied().collect::<Vec<_>>() {
            if let Some(t) = board.tile_at(pos) {
                self.use_tile(alphabet, t)?;
            }
        }
        Ok((board, rack))
    }
}

impl Default for Kibitzer {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}
