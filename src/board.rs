// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout, error, matrix, tile};

#[derive(Clone)]
pub struct Board {
    dim: matrix::Dim,
    cells: Box<[Option<tile::Tile>]>,
    bonuses: board_layout::BonusOverlay,
    seed: Option<matrix::Pos>,
    // tiles dropped this move, in order, not yet accepted.
    placed: Vec<matrix::Pos>,
    num_tiles: usize,
    // a cell is visited in the current sweep iff its stamp equals the generation.
    sweep_stamps: Box<[u32]>,
    sweep_generation: u32,
}

impl Board {
    pub fn new(dim: matrix::Dim, bonuses: board_layout::BonusOverlay) -> Self {
        Self {
            dim,
            cells: vec![None; dim.len()].into_boxed_slice(),
            bonuses,
            seed: None,
            placed: Vec::new(),
            num_tiles: 0,
            sweep_stamps: vec![0; dim.len()].into_boxed_slice(),
            sweep_generation: 0,
        }
    }

    // the game starts with one letter already down, which anchors connectivity.
    pub fn with_seed_tile(
        dim: matrix::Dim,
        bonuses: board_layout::BonusOverlay,
        seed: matrix::Pos,
        tile: tile::Tile,
    ) -> error::Returns<Self> {
        let mut board = Self::new(dim, bonuses);
        board.set_tile(seed, tile)?;
        board.seed = Some(seed);
        Ok(board)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn bonuses(&self) -> &board_layout::BonusOverlay {
        &self.bonuses
    }

    #[inline(always)]
    pub fn seed(&self) -> Option<matrix::Pos> {
        self.seed
    }

    pub fn set_seed(&mut self, seed: matrix::Pos) -> error::Returns<()> {
        if !self.dim.contains(seed) {
            return_error!(format!("seed {} is off the board", seed));
        }
        self.seed = Some(seed);
        Ok(())
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    #[inline(always)]
    pub fn tile_at(&self, pos: matrix::Pos) -> Option<tile::Tile> {
        if self.dim.contains(pos) {
            self.cells[self.dim.at(pos)]
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn letter_at(&self, pos: matrix::Pos) -> Option<u8> {
        self.tile_at(pos).and_then(|t| t.face())
    }

    #[inline(always)]
    pub fn is_occupied(&self, pos: matrix::Pos) -> bool {
        self.tile_at(pos).is_some()
    }

    // an occupied neighbor, if there is one.
    #[inline(always)]
    pub fn occupied_neighbor(&self, pos: matrix::Pos, direction: matrix::Direction) -> Option<matrix::Pos> {
        self.dim
            .neighbor(pos, direction)
            .filter(|&next| self.is_occupied(next))
    }

    pub fn occupied(&self) -> impl Iterator<Item = matrix::Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(move |(idx, _)| self.dim.pos_of(idx))
    }

    #[inline(always)]
    pub fn placed(&self) -> &[matrix::Pos] {
        &self.placed
    }

    #[inline(always)]
    pub fn is_placed(&self, pos: matrix::Pos) -> bool {
        self.placed.contains(&pos)
    }

    fn check_empty(&self, pos: matrix::Pos) -> error::Returns<usize> {
        if !self.dim.contains(pos) {
            return_error!(format!("{} is off the board", pos));
        }
        let idx = self.dim.at(pos);
        if self.cells[idx].is_some() {
            return_error!(format!("{} is already occupied", pos));
        }
        Ok(idx)
    }

    // an already-accepted tile, as when setting up a position.
    pub fn set_tile(&mut self, pos: matrix::Pos, tile: tile::Tile) -> error::Returns<()> {
        let idx = self.check_empty(pos)?;
        self.cells[idx] = Some(tile);
        self.num_tiles += 1;
        if self.seed.is_none() {
            self.seed = Some(pos);
        }
        Ok(())
    }

    // lays letters from pos onwards, skipping cells that already hold the same letter.
    pub fn set_word(
        &mut self,
        alphabet: &alphabet::Alphabet,
        pos: matrix::Pos,
        direction: matrix::Direction,
        word: &str,
    ) -> error::Returns<()> {
        for (i, letter) in (0i8..).zip(word.bytes()) {
            let at = pos.offset(direction, i);
            match self.letter_at(at) {
                Some(existing) if existing == letter.to_ascii_uppercase() => {}
                Some(existing) => {
                    return_error!(format!(
                        "{} holds {} not {}",
                        at, existing as char, letter as char
                    ));
                }
                None => {
                    let tile = if letter.is_ascii_lowercase() {
                        tile::Tile::Blank {
                            assigned: Some(letter.to_ascii_uppercase()),
                        }
                    } else {
                        tile::Tile::letter(letter, alphabet)
                    };
                    self.set_tile(at, tile)?;
                }
            }
        }
        Ok(())
    }

    // a tentative tile for the current move.
    pub fn place(&mut self, pos: matrix::Pos, tile: tile::Tile) -> error::Returns<()> {
        self.set_tile(pos, tile)?;
        self.placed.push(pos);
        Ok(())
    }

    // only tiles of the current move can be picked back up.
    pub fn lift(&mut self, pos: matrix::Pos) -> error::Returns<tile::Tile> {
        let Some(which) = self.placed.iter().position(|&p| p == pos) else {
            return_error!(format!("{} was not placed this move", pos));
        };
        self.placed.remove(which);
        let idx = self.dim.at(pos);
        let Some(tile) = self.cells[idx].take() else {
            return_error!(format!("{} is empty", pos));
        };
        self.num_tiles -= 1;
        if self.num_tiles == 0 {
            self.seed = None;
        }
        Ok(tile.reset())
    }

    pub fn assign_blank(&mut self, pos: matrix::Pos, letter: u8) -> error::Returns<()> {
        let letter = letter.to_ascii_uppercase();
        if alphabet::letter_index(letter).is_none() {
            return_error!(format!("cannot assign {:?} to a blank", letter as char));
        }
        let assigned = self
            .tile_at(pos)
            .and_then(|tile| tile.assigned_as(letter))
            .ok_or_else(|| format!("{} does not hold a blank", pos))?;
        let idx = self.dim.at(pos);
        self.cells[idx] = Some(assigned);
        Ok(())
    }

    pub fn accept_placement(&mut self) {
        self.placed.clear();
    }

    // takes the current move's tiles back off, most recent last in the result.
    pub fn rollback(&mut self) -> Vec<tile::Tile> {
        let mut returned = Vec::with_capacity(self.placed.len());
        while let Some(&pos) = self.placed.last() {
            match self.lift(pos) {
                Ok(tile) => returned.push(tile),
                Err(_) => {
                    self.placed.pop();
                }
            }
        }
        returned.reverse();
        returned
    }

    // starts a new sweep; every stamp from earlier sweeps reads as unvisited.
    pub fn next_sweep(&mut self) -> u32 {
        if self.sweep_generation == u32::MAX {
            self.sweep_stamps.iter_mut().for_each(|m| *m = 0);
            self.sweep_generation = 0;
        }
        self.sweep_generation += 1;
        self.sweep_generation
    }

    // true iff newly marked.
    #[inline(always)]
    pub fn mark_swept(&mut self, pos: matrix::Pos, generation: u32) -> bool {
        let idx = self.dim.at(pos);
        if self.sweep_stamps[idx] == generation {
            false
        } else {
            self.sweep_stamps[idx] = generation;
            true
        }
    }

    // the maximal run starting at from, as letters. unassigned blanks read as '?'.
    pub fn collect_run(&self, from: matrix::Pos, direction: matrix::Direction) -> (Vec<u8>, bool) {
        let mut letters = Vec::new();
        let mut is_new = false;
        let mut at = from;
        while let Some(tile) = self.tile_at(at) {
            letters.push(tile.face().unwrap_or(b'?'));
            is_new |= self.is_placed(at);
            at = at.offset(direction, 1);
        }
        (letters, is_new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use crate::matrix::{Dim, Direction, Pos};
    use crate::tile::Tile;

    fn empty_board() -> Board {
        let dim = Dim { rows: 9, cols: 9 };
        Board::new(dim, board_layout::BonusOverlay::new(dim))
    }

    #[test]
    fn first_tile_becomes_seed() {
        let mut board = empty_board();
        assert_eq!(board.seed(), None);
        board.place(Pos::new(3, 4), Tile::letter(b'A', &ENGLISH_ALPHABET)).unwrap();
        assert_eq!(board.seed(), Some(Pos::new(3, 4)));
        assert_eq!(board.num_tiles(), 1);
        assert!(board.place(Pos::new(3, 4), Tile::blank()).is_err());
        assert!(board.place(Pos::new(9, 4), Tile::blank()).is_err());
    }

    #[test]
    fn off_board_positions_are_errors() {
        let mut board = empty_board();
        for pos in [Pos::new(-1, 3), Pos::new(3, -1), Pos::new(-128, -128), Pos::new(9, 9)] {
            let err = board.place(pos, Tile::blank()).unwrap_err();
            assert!(err.to_string().ends_with("is off the board"), "{}", err);
            assert!(board.set_tile(pos, Tile::blank()).is_err());
        }
        assert_eq!(
            board.place(Pos::new(-1, 3), Tile::blank()).unwrap_err().to_string(),
            "(-1,3) is off the board"
        );
        assert_eq!(board.num_tiles(), 0);
        assert!(board.set_seed(Pos::new(-1, 0)).is_err());
    }

    #[test]
    fn rollback_returns_tiles_in_order() {
        let mut board = empty_board();
        board.set_word(&ENGLISH_ALPHABET, Pos::new(2, 2), Direction::E, "AT").unwrap();
        board.place(Pos::new(1, 2), Tile::letter(b'C', &ENGLISH_ALPHABET)).unwrap();
        board.place(Pos::new(4, 2), Tile::blank()).unwrap();
        board.assign_blank(Pos::new(4, 2), b's').unwrap();
        assert_eq!(board.letter_at(Pos::new(4, 2)), Some(b'S'));
        let (run, is_new) = board.collect_run(Pos::new(1, 2), Direction::E);
        assert_eq!(run, b"CATS");
        assert!(is_new);
        let returned = board.rollback();
        assert_eq!(returned, vec![Tile::letter(b'C', &ENGLISH_ALPHABET), Tile::blank()]);
        assert_eq!(board.num_tiles(), 2);
        assert!(board.placed().is_empty());
        assert!(board.lift(Pos::new(2, 2)).is_err());
    }

    #[test]
    fn blanks_only() {
        let mut board = empty_board();
        board.place(Pos::new(0, 0), Tile::letter(b'A', &ENGLISH_ALPHABET)).unwrap();
        assert!(board.assign_blank(Pos::new(0, 0), b'B').is_err());
        assert!(board.assign_blank(Pos::new(1, 0), b'B').is_err());
    }

    #[test]
    fn sweeps_are_generations() {
        let mut board = empty_board();
        let g1 = board.next_sweep();
        assert!(board.mark_swept(Pos::new(1, 1), g1));
        assert!(!board.mark_swept(Pos::new(1, 1), g1));
        let g2 = board.next_sweep();
        assert_ne!(g1, g2);
        assert!(board.mark_swept(Pos::new(1, 1), g2));
        assert!(!board.mark_swept(Pos::new(1, 1), g2));
    }
}
