// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, dictionary, error, game_config, matrix, play_scorer, word};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum InvalidReason {
    NotConnected,
    NotALine,
    NotWords,
    NotNewConnected,
    DuplicateWord(String),
    NoNewWord,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidReason::NotConnected => write!(f, "tiles are not connected"),
            InvalidReason::NotALine => write!(f, "new tiles are not in a line"),
            InvalidReason::NotWords => write!(f, "not all words are words"),
            InvalidReason::NotNewConnected => write!(f, "new words are not connected"),
            InvalidReason::DuplicateWord(w) => write!(f, "{} is a duplicate", w),
            InvalidReason::NoNewWord => write!(f, "no new word"),
        }
    }
}

// An empty cell just before the start or just after the end of standing words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cap {
    pub pos: matrix::Pos,
    // axis bits of the words capped here.
    pub directions: u8,
    // into ValidationResult::all_words.
    pub words: Vec<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct WordCaps {
    pub start_caps: Vec<Cap>,
    pub end_caps: Vec<Cap>,
    // per board cell, axis bits of words through it.
    pub word_directions: Box<[u8]>,
}

impl WordCaps {
    fn add(caps: &mut Vec<Cap>, pos: matrix::Pos, directions: u8, word_idx: usize) {
        match caps.iter_mut().find(|c| c.pos == pos) {
            Some(cap) => {
                cap.directions |= directions;
                cap.words.push(word_idx);
            }
            None => caps.push(Cap {
                pos,
                directions,
                words: vec![word_idx],
            }),
        }
    }

    fn find(board: &board::Board, all_words: &[word::Word]) -> WordCaps {
        let dim = board.dim();
        let mut caps = WordCaps {
            word_directions: vec![0u8; dim.len()].into_boxed_slice(),
            ..WordCaps::default()
        };
        for (idx, w) in all_words.iter().enumerate() {
            let mask = w.direction.axis_mask();
            for c in w.cells() {
                caps.word_directions[dim.at(c)] |= mask;
            }
            if let Some(before) = dim.neighbor(w.seed, w.direction.opposite()) {
                if !board.is_occupied(before) {
                    Self::add(&mut caps.start_caps, before, mask, idx);
                }
            }
            if let Some(after) = dim.neighbor(w.last_letter(), w.direction) {
                if !board.is_occupied(after) {
                    Self::add(&mut caps.end_caps, after, mask, idx);
                }
            }
        }
        caps
    }

    #[inline(always)]
    pub fn directions_at(&self, dim: matrix::Dim, pos: matrix::Pos) -> u8 {
        self.word_directions.get(dim.at(pos)).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    pub ok: bool,
    pub reason: Option<InvalidReason>,
    pub new_words: Vec<word::Word>,
    pub all_words: Vec<word::Word>,
    pub non_words: Vec<word::Word>,
    pub score_delta: Option<i32>,
    pub caps: Option<WordCaps>,
    // occupied cells reached from the seed.
    pub tile_count: usize,
}

// true if the current move's tiles share a row, a column, or a diagonal.
fn is_drop_line(placed: &[matrix::Pos], diagonals: bool) -> bool {
    let Some((&root, rest)) = placed.split_first() else {
        return true;
    };
    if rest.iter().all(|p| p.row == root.row) || rest.iter().all(|p| p.col == root.col) {
        return true;
    }
    diagonals
        && (rest.iter().all(|p| p.col - root.col == p.row - root.row)
            || rest.iter().all(|p| p.col - root.col == root.row - p.row))
}

// every new word must share a cell with another, transitively.
fn is_new_connected(new_words: &[word::Word]) -> bool {
    if new_words.len() <= 1 {
        return true;
    }
    let mut linked = vec![false; new_words.len()];
    linked[0] = true;
    let mut num_linked = 1;
    while num_linked < new_words.len() {
        let found = (0..new_words.len()).find(|&i| {
            !linked[i]
                && (0..new_words.len()).any(|j| linked[j] && new_words[j].connects_to(&new_words[i]))
        });
        match found {
            Some(i) => {
                linked[i] = true;
                num_linked += 1;
            }
            None => return false,
        }
    }
    true
}

// a name standing twice, other than the same tiles read both ways.
fn find_duplicate_word(all_words: &[word::Word]) -> Option<&word::Word> {
    all_words.iter().enumerate().find_map(|(i, w)| {
        all_words[..i]
            .iter()
            .any(|earlier| earlier.name == w.name && !earlier.same_word(w))
            .then_some(w)
    })
}

// Walks everything reachable from the seed, reading every maximal run in a
// reading direction. A bad move is reported in the result, not as an error.
pub fn validate(
    board: &mut board::Board,
    dictionary: &dyn dictionary::Dictionary,
    rules: &game_config::RuleSet,
    score_requested: bool,
) -> error::Returns<ValidationResult> {
    let Some(seed) = board.seed() else {
        return_error!("board has no seed".into());
    };
    if !board.is_occupied(seed) {
        return_error!(format!("seed {} is empty", seed));
    }

    let mut result = ValidationResult {
        score_delta: score_requested.then_some(0),
        ..ValidationResult::default()
    };
    let mut scorer = play_scorer::PlayScorer::new();
    let generation = board.next_sweep();
    board.mark_swept(seed, generation);
    let mut stack = vec![seed];
    while let Some(at) = stack.pop() {
        result.tile_count += 1;
        for &direction in rules.neighbor_directions() {
            if let Some(next) = board.occupied_neighbor(at, direction) {
                if board.mark_swept(next, generation) {
                    stack.push(next);
                }
                continue;
            }
            // nothing precedes at when reading the other way.
            let reading = direction.opposite();
            if !rules.reads(reading) {
                continue;
            }
            let (mut letters, is_new) = board.collect_run(at, reading);
            if letters.len() < 2 {
                continue;
            }
            let name = String::from_utf8_lossy(&letters).into_owned();
            let mut w = word::Word::new(at, name, reading);
            if let Some(entry) = dictionary.lookup_bytes(&letters) {
                w.order = Some(entry.order);
                result.all_words.push(w.clone());
                if is_new
                    && (!rules.backwards || !result.new_words.iter().any(|n| n.same_word(&w)))
                {
                    if let Some(delta) = result.score_delta.as_mut() {
                        w.points = scorer.score_word(board, w.seed, w.direction);
                        *delta += w.points;
                    }
                    result.new_words.push(w);
                }
            } else {
                // readable from the other end, it gets recorded from there.
                if rules.backwards {
                    letters.reverse();
                    if dictionary.lookup_bytes(&letters).is_some() {
                        continue;
                    }
                }
                result.non_words.push(w);
            }
        }
    }

    let connected = result.tile_count == board.num_tiles();
    let all_words_ok = result.non_words.is_empty();
    let drop_line = rules.all_connected || is_drop_line(board.placed(), rules.diagonals);
    let new_connected = is_new_connected(&result.new_words);
    let has_new = !result.new_words.is_empty();
    let duplicate = if rules.no_duplicates {
        find_duplicate_word(&result.all_words).map(|w| w.name.clone())
    } else {
        None
    };
    result.reason = if !connected {
        Some(InvalidReason::NotConnected)
    } else if !drop_line {
        Some(InvalidReason::NotALine)
    } else if !all_words_ok {
        Some(InvalidReason::NotWords)
    } else if !new_connected {
        Some(InvalidReason::NotNewConnected)
    } else if let Some(name) = duplicate.clone() {
        Some(InvalidReason::DuplicateWord(name))
    } else if !has_new {
        Some(InvalidReason::NoNewWord)
    } else {
        None
    };
    result.ok = connected
        && all_words_ok
        && (rules.legacy_mixed_legality || result.reason.is_none())
        && (rules.legacy_duplicates_tolerated || duplicate.is_none())
        && has_new;
    if score_requested {
        result.caps = Some(WordCaps::find(board, &result.all_words));
    }
    tracing::trace!(
        "validated {} tiles, {} words, ok={} reason={:?}",
        result.tile_count,
        result.all_words.len(),
        result.ok,
        result.reason
    );
    Ok(result)
}
