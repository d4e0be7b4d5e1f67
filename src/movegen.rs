// Copyright (C) 2020-2026 Andy Kurnia.

use super::{
    alphabet, board, board_layout, candidates, dictionary, error, game_config, matrix, play_scorer,
    rack, validator, word,
};

// the rack being searched with, and what it can supply.
struct Hand<'r> {
    rack: &'r rack::Rack,
    tally: rack::RackTally,
    mask: u32,
}

impl<'r> Hand<'r> {
    fn new(rack: &'r rack::Rack) -> Self {
        Self {
            rack,
            tally: rack.tally(),
            mask: rack.letter_mask(),
        }
    }
}

// a dictionary word laid from head.
struct Placement<'e> {
    entry: &'e dictionary::Entry,
    head: matrix::Pos,
    direction: matrix::Direction,
}

pub struct MoveGenerator<'a> {
    dictionary: &'a dyn dictionary::Dictionary,
    rules: game_config::RuleSet,
    alphabet: &'static alphabet::Alphabet,
    rack_size: usize,
    limits: game_config::SearchLimits,
    // private copy; the caller's board is never touched.
    board: board::Board,
    standing: validator::ValidationResult,
    scorer: play_scorer::PlayScorer,
    candidates: candidates::CandidateList,
    deadline: Option<std::time::Instant>,
    attempts: usize,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(
        game_config: &game_config::GameConfig,
        dictionary: &'a dyn dictionary::Dictionary,
        limits: game_config::SearchLimits,
    ) -> Self {
        let dim = game_config.dim();
        Self {
            dictionary,
            rules: *game_config.rules(),
            alphabet: game_config.alphabet(),
            rack_size: game_config.rack_size() as usize,
            limits,
            board: board::Board::new(dim, board_layout::BonusOverlay::new(dim)),
            standing: validator::ValidationResult::default(),
            scorer: play_scorer::PlayScorer::new(),
            candidates: candidates::CandidateList::new(&limits),
            deadline: None,
            attempts: 0,
        }
    }

    // Ranked placements for rack on board. Running out of time is not an
    // error; the list then holds what was found and says so.
    pub fn generate_candidates(
        &mut self,
        board: &board::Board,
        rack: &rack::Rack,
    ) -> error::Returns<&candidates::CandidateList> {
        if !board.placed().is_empty() {
            return_error!("board has tentative tiles".into());
        }
        self.board.clone_from(board);
        self.standing = validator::validate(&mut self.board, self.dictionary, &self.rules, true)?;
        self.candidates = candidates::CandidateList::new(&self.limits);
        self.deadline = self
            .limits
            .time_budget_ms
            .map(|ms| std::time::Instant::now() + std::time::Duration::from_millis(ms));
        self.attempts = 0;
        self.check_words(rack);
        self.candidates.finish();
        tracing::debug!(
            "{} candidates, {} attempts, accepted {} declined {}{}",
            self.candidates.len(),
            self.attempts,
            self.candidates.accepted,
            self.candidates.declined,
            if self.candidates.timed_out { ", timed out" } else { "" }
        );
        Ok(&self.candidates)
    }

    pub fn candidates(&self) -> &candidates::CandidateList {
        &self.candidates
    }

    pub fn take_candidates(&mut self) -> candidates::CandidateList {
        std::mem::replace(&mut self.candidates, candidates::CandidateList::new(&self.limits))
    }

    #[inline(always)]
    fn time_exceeded(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| std::time::Instant::now() >= deadline)
    }

    // each blank is tried as every letter in turn.
    fn check_words(&mut self, rack: &rack::Rack) {
        if rack.first_unassigned_blank().is_none() {
            self.check_ordinary_crosswords(rack);
            self.check_cap_words(rack, true);
            self.check_cap_words(rack, false);
            self.check_extension_words(rack);
            return;
        }
        for letter in self.alphabet.letters() {
            let Some(assigned) = rack.with_blank_as(0, letter) else {
                return;
            };
            self.check_words(&assigned);
            if self.candidates.timed_out {
                return;
            }
            if self.time_exceeded() {
                tracing::warn!(
                    "time exceeded after blank as {}, keeping {} candidates",
                    letter as char,
                    self.candidates.len()
                );
                self.candidates.timed_out = true;
                return;
            }
        }
    }

    // Head of the word when letter idx sits on anchor. Every cell must be
    // empty or already hold the right letter, at least one must be empty, and
    // the cells just outside the word must be empty or off the board.
    fn can_place_word(
        &self,
        letters: &[u8],
        idx: usize,
        anchor: matrix::Pos,
        direction: matrix::Direction,
    ) -> Option<matrix::Pos> {
        let dim = self.board.dim();
        let head = anchor.offset(direction, -(idx as i8));
        let mut num_empty = 0;
        for (i, &letter) in (0i8..).zip(letters) {
            let at = head.offset(direction, i);
            if !dim.contains(at) {
                return None;
            }
            match self.board.letter_at(at) {
                None if self.board.is_occupied(at) => return None,
                None => num_empty += 1,
                Some(existing) if existing == letter => {}
                Some(_) => return None,
            }
        }
        if num_empty == 0
            || self.board.is_occupied(head.offset(direction, -1))
            || self.board.is_occupied(head.offset(direction, letters.len() as i8))
        {
            return None;
        }
        Some(head)
    }

    // lays the missing letters from the rack, scores them with their
    // crosswords, then picks them back up. Every reading the validator
    // would record is counted.
    fn score_placement(&mut self, placement: &Placement<'_>, rack: &rack::Rack) -> Option<i32> {
        let letters = placement.entry.word.as_bytes();
        let mut remaining = rack.clone();
        for (i, &letter) in (0i8..).zip(letters) {
            let at = placement.head.offset(placement.direction, i);
            if self.board.is_occupied(at) {
                continue;
            }
            let placed = remaining
                .take_letter(letter)
                .map(|tile| self.board.place(at, tile));
            if !matches!(placed, Some(Ok(()))) {
                self.board.rollback();
                return None;
            }
        }
        let base = self
            .scorer
            .score_word(&self.board, placement.head, placement.direction)
            * play_scorer::PlayScorer::readings(self.dictionary, &self.rules, letters);
        let extra = self.scorer.check_illegal_crosswords(
            &self.board,
            self.dictionary,
            &self.rules,
            placement.head,
            placement.direction,
            letters.len(),
        );
        self.board.rollback();
        extra.map(|extra| base + extra)
    }

    fn try_placement(
        &mut self,
        hand: &Hand<'_>,
        entry: &dictionary::Entry,
        idx: usize,
        anchor: matrix::Pos,
        direction: matrix::Direction,
        provenance: word::Provenance,
    ) {
        let letters = entry.word.as_bytes();
        let Some(head) = self.can_place_word(letters, idx, anchor, direction) else {
            return;
        };
        let needed = (0i8..)
            .zip(letters)
            .filter(|&(i, _)| !self.board.is_occupied(head.offset(direction, i)))
            .map(|(_, &letter)| letter)
            .collect::<Vec<_>>();
        if !hand.tally.can_supply(&needed) {
            return;
        }
        self.attempts += 1;
        let placement = Placement {
            entry,
            head,
            direction,
        };
        match self.score_placement(&placement, hand.rack) {
            Some(points) => {
                let mut candidate = word::Word::new(head, entry.word.clone(), direction);
                candidate.points = points;
                candidate.order = Some(entry.order);
                candidate.provenance = Some(provenance);
                self.candidates.record_candidate(candidate);
            }
            None => {
                self.candidates.declined += 1;
            }
        }
    }

    // directions a new word may be laid in through anchor.
    fn free_directions(&self, anchor: matrix::Pos) -> Vec<matrix::Direction> {
        let used = self
            .standing
            .caps
            .as_ref()
            .map_or(0, |caps| caps.directions_at(self.board.dim(), anchor));
        self.rules
            .reading_directions()
            .iter()
            .copied()
            .filter(|d| used & d.bit() == 0)
            .collect()
    }

    // words through one standing letter, using rack letters for the rest.
    fn check_ordinary_crosswords(&mut self, rack: &rack::Rack) {
        let lexicon = self.dictionary;
        let hand = Hand::new(rack);
        let anchors = self
            .board
            .occupied()
            .filter_map(|pos| self.board.letter_at(pos).map(|letter| (pos, letter)))
            .collect::<Vec<_>>();
        for len in 2..=self.rack_size + 1 {
            let sub = lexicon.subdictionary(len);
            for &(anchor, target) in &anchors {
                let directions = self.free_directions(anchor);
                if directions.is_empty() {
                    continue;
                }
                let mask = dictionary::letter_mask_add(hand.mask, target);
                for entry in sub {
                    if !entry.within_vocabulary(self.limits.vocabulary_limit) || !entry.fits_mask(mask) {
                        continue;
                    }
                    for (idx, _) in entry.word.bytes().enumerate().filter(|&(_, l)| l == target) {
                        for &direction in &directions {
                            self.try_placement(
                                &hand,
                                entry,
                                idx,
                                anchor,
                                direction,
                                word::Provenance::OrdinaryCrossword,
                            );
                        }
                    }
                }
            }
        }
    }

    // One rack letter just before or after a standing word, alone or as part
    // of a new word across the cap.
    fn check_cap_words(&mut self, rack: &rack::Rack, at_start: bool) {
        let lexicon = self.dictionary;
        let vocabulary_limit = self.limits.vocabulary_limit;
        let hand = Hand::new(rack);
        let Some(caps) = self.standing.caps.as_ref() else {
            return;
        };
        let caps = if at_start {
            caps.start_caps.clone()
        } else {
            caps.end_caps.clone()
        };
        let mut faces = rack.tiles().filter_map(|t| t.face()).collect::<Vec<_>>();
        faces.sort_unstable();
        faces.dedup();
        for cap in &caps {
            for &word_idx in &cap.words {
                let standing = self.standing.all_words[word_idx].clone();
                for &letter in &faces {
                    let capped = if at_start {
                        format!("{}{}", letter as char, standing.name)
                    } else {
                        format!("{}{}", standing.name, letter as char)
                    };
                    let Some(entry) = lexicon.lookup_limited(&capped, vocabulary_limit) else {
                        continue;
                    };
                    self.try_placement(
                        &hand,
                        entry,
                        if at_start { 1 } else { 0 },
                        standing.seed,
                        standing.direction,
                        word::Provenance::CapWord,
                    );
                    let directions = self
                        .rules
                        .reading_directions()
                        .iter()
                        .copied()
                        .filter(|d| !d.same_axis(standing.direction))
                        .collect::<Vec<_>>();
                    for len in 2..self.rack_size {
                        for cross in lexicon.subdictionary(len) {
                            if !cross.within_vocabulary(vocabulary_limit) || !cross.fits_mask(hand.mask) {
                                continue;
                            }
                            for (idx, _) in cross.word.bytes().enumerate().filter(|&(_, l)| l == letter) {
                                for &direction in &directions {
                                    self.try_placement(
                                        &hand,
                                        cross,
                                        idx,
                                        cap.pos,
                                        direction,
                                        word::Provenance::CapWord,
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // longer words containing a standing word, built out in its direction.
    fn check_extension_words(&mut self, rack: &rack::Rack) {
        let lexicon = self.dictionary;
        let vocabulary_limit = self.limits.vocabulary_limit;
        let hand = Hand::new(rack);
        let standing_words = self.standing.all_words.clone();
        for standing in &standing_words {
            let Some(known) = lexicon.lookup_limited(&standing.name, vocabulary_limit) else {
                continue;
            };
            let mask = hand.mask | known.letter_mask;
            let name_len = standing.len();
            let max_len = dictionary::MAX_WORD_LEN.min(name_len + self.rack_size);
            for len in name_len + 2..=max_len {
                for entry in lexicon.subdictionary(len) {
                    if !entry.within_vocabulary(vocabulary_limit) || !entry.fits_mask(mask) {
                        continue;
                    }
                    for (position, _) in entry.word.match_indices(standing.name.as_str()) {
                        self.try_placement(
                            &hand,
                            entry,
                            position,
                            standing.seed,
                            standing.direction,
                            word::Provenance::ExtensionWord,
                        );
                    }
                }
            }
        }
    }
}

// one-shot convenience over a fresh generator.
pub fn generate_candidates(
    game_config: &game_config::GameConfig,
    dictionary: &dyn dictionary::Dictionary,
    limits: game_config::SearchLimits,
    board: &board::Board,
    rack: &rack::Rack,
) -> error::Returns<candidates::CandidateList> {
    let mut move_generator = MoveGenerator::new(game_config, dictionary, limits);
    move_generator.generate_candidates(board, rack)?;
    Ok(move_generator.take_candidates())
}
