// Copyright (C) 2020-2026 Andy Kurnia.

use super::{game_config, word};

// Best few placements found so far. Anything not above least_score, or
// below threshold times best_score, is declined.
pub struct CandidateList {
    entries: Vec<word::Word>,
    pub best_score: i32,
    pub least_score: i32,
    size_limit: usize,
    trim_size: f64,
    threshold: f64,
    pub accepted: usize,
    pub declined: usize,
    pub timed_out: bool,
}

impl CandidateList {
    pub fn new(limits: &game_config::SearchLimits) -> Self {
        Self {
            entries: Vec::with_capacity(limits.size_limit + 1),
            best_score: 0,
            least_score: 0,
            size_limit: limits.size_limit.max(1),
            trim_size: limits.trim_size,
            threshold: limits.threshold,
            accepted: 0,
            declined: 0,
            timed_out: false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.best_score = 0;
        self.least_score = 0;
        self.accepted = 0;
        self.declined = 0;
        self.timed_out = false;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn entries(&self) -> &[word::Word] {
        &self.entries
    }

    pub fn into_words(self) -> Vec<word::Word> {
        self.entries
    }

    #[inline(always)]
    fn meets_threshold(&self, score: i32) -> bool {
        score as f64 >= self.best_score as f64 * self.threshold
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.points.cmp(&a.points));
    }

    // Keeps the top trim_size share. Ties with the first dropped entry go
    // too, unless that would drop the whole share. A single slot goes to
    // incoming only if it beats the holder. false if there is no room.
    fn trim_to_size(&mut self, incoming: i32) -> bool {
        if self.entries.len() < self.size_limit {
            return true;
        }
        self.sort();
        let keep = ((self.size_limit as f64 * self.trim_size) as usize).min(self.size_limit - 1);
        let cut = self.entries[keep].points;
        let above = self.entries.iter().take_while(|w| w.points > cut).count();
        if above > 0 {
            self.entries.truncate(above);
            self.least_score = self.least_score.max(cut);
            return true;
        }
        let keep = keep.max(1).min(self.size_limit - 1);
        if keep == 0 {
            if incoming <= cut {
                return false;
            }
            self.entries.clear();
            self.least_score = self.least_score.max(cut);
            return true;
        }
        self.entries.truncate(keep);
        self.least_score = self.least_score.max(cut - 1);
        true
    }

    // true iff accepted into the list.
    pub fn record_candidate(&mut self, candidate: word::Word) -> bool {
        let score = candidate.points;
        if !(score > self.least_score && self.meets_threshold(score)) {
            self.declined += 1;
            return false;
        }
        if self.entries.iter().any(|w| w.same_placement(&candidate)) {
            return false;
        }
        if !self.trim_to_size(score) || score <= self.least_score {
            self.declined += 1;
            return false;
        }
        self.entries.push(candidate);
        self.accepted += 1;
        if score > self.best_score {
            self.best_score = score;
            let best_score = self.best_score;
            let threshold = self.threshold;
            self.entries
                .retain(|w| w.points as f64 >= best_score as f64 * threshold);
        }
        true
    }

    // best first.
    pub fn finish(&mut self) {
        self.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Direction, Pos};

    fn candidate(name: &str, col: i8, points: i32) -> word::Word {
        let mut w = word::Word::new(Pos::new(col, 0), name.into(), Direction::S);
        w.points = points;
        w
    }

    #[test]
    fn list_stays_bounded_and_above_least() {
        let mut list = CandidateList::new(&game_config::SearchLimits {
            size_limit: 5,
            trim_size: 0.8,
            threshold: 0.0,
            ..game_config::SearchLimits::default()
        });
        for (i, points) in (0i8..).zip([5, 9, 3, 7, 7, 8, 1, 6, 10, 4, 7, 12, 2]) {
            list.record_candidate(candidate("W", i, points));
            assert!(list.len() <= 5);
            assert!(list.entries().iter().all(|w| w.points > list.least_score));
        }
        list.finish();
        let scores = list.entries().iter().map(|w| w.points).collect::<Vec<_>>();
        assert_eq!(scores[0], 12);
        assert!(scores.windows(2).all(|p| p[0] >= p[1]));
    }

    #[test]
    fn ties_at_the_top_survive_a_trim() {
        let mut list = CandidateList::new(&game_config::SearchLimits {
            size_limit: 4,
            threshold: 0.0,
            ..game_config::SearchLimits::default()
        });
        for i in 0..6 {
            list.record_candidate(candidate("W", i, 5));
        }
        assert!(!list.is_empty());
        assert!(list.len() <= 4);
        assert!(list.entries().iter().all(|w| w.points > list.least_score));
        assert!(!list.record_candidate(candidate("X", 9, 3)));
    }

    #[test]
    fn one_slot_holds_the_best() {
        let mut list = CandidateList::new(&game_config::SearchLimits {
            size_limit: 1,
            threshold: 0.0,
            ..game_config::SearchLimits::default()
        });
        for (i, points) in (0i8..).zip([5, 6, 7]) {
            assert!(list.record_candidate(candidate("W", i, points)));
            assert_eq!(list.len(), 1);
        }
        assert!(!list.record_candidate(candidate("W", 5, 7)));
        assert!(!list.record_candidate(candidate("W", 6, 3)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].points, 7);
        assert_eq!(list.entries()[0].seed, Pos::new(2, 0));
        assert!(list.entries().iter().all(|w| w.points > list.least_score));
    }

    #[test]
    fn weak_candidates_are_declined() {
        let mut list = CandidateList::new(&game_config::SearchLimits::default());
        assert!(list.record_candidate(candidate("A", 0, 4)));
        assert!(list.record_candidate(candidate("B", 1, 20)));
        // 4 is now below half of 20.
        assert_eq!(list.len(), 1);
        assert!(!list.record_candidate(candidate("C", 2, 9)));
        assert!(list.record_candidate(candidate("D", 3, 10)));
        assert_eq!(list.declined, 1);
        assert_eq!(list.accepted, 3);
    }

    #[test]
    fn same_placement_is_not_added_twice() {
        let mut list = CandidateList::new(&game_config::SearchLimits::default());
        assert!(list.record_candidate(candidate("CAT", 1, 5)));
        assert!(!list.record_candidate(candidate("CAT", 1, 5)));
        assert!(list.record_candidate(candidate("CAT", 2, 5)));
        assert_eq!(list.len(), 2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.best_score, 0);
    }
}
