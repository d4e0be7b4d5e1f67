// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use super::{bag, board, board_layout, dictionary, error, game_config, matrix, rack, validator, word};
use rand::prelude::*;

// every game opens with this letter at the center.
pub const SEED_LETTER: u8 = b'A';

#[derive(Clone)]
pub struct GamePlayer {
    pub score: i32,
    pub rack: rack::Rack,
}

#[derive(Clone)]
pub struct GameState<'a> {
    pub game_config: &'a game_config::GameConfig,
    pub players: Box<[GamePlayer]>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: u8,
    pub num_consecutive_passes: u8,
}

impl<'a> GameState<'a> {
    // bonuses are placed from key; the bag is shuffled with rng.
    pub fn new(
        game_config: &'a game_config::GameConfig,
        key: u64,
        mut rng: &mut dyn RngCore,
    ) -> error::Returns<Self> {
        let dim = game_config.dim();
        let alphabet = game_config.alphabet();
        let rack_size = game_config.rack_size() as usize;
        let mut bag = bag::Bag::new(alphabet);
        bag.shuffle(&mut rng);
        let seed_tile = bag
            .take_letter(SEED_LETTER)
            .ok_or("no seed letter in the bag")?;
        let board = board::Board::with_seed_tile(
            dim,
            board_layout::BonusOverlay::randomized(dim, key),
            dim.center(),
            seed_tile,
        )?;
        let mut players = (0..game_config.num_players())
            .map(|_| GamePlayer {
                score: 0,
                rack: rack::Rack::new(rack_size),
            })
            .collect::<Box<_>>();
        for player in players.iter_mut() {
            bag.replenish(&mut player.rack);
        }
        Ok(Self {
            game_config,
            players,
            board,
            bag,
            turn: 0,
            num_consecutive_passes: 0,
        })
    }

    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    fn current_rack_mut(&mut self) -> &mut rack::Rack {
        &mut self.players[self.turn as usize].rack
    }

    // one tile from the current rack onto the board, tentatively.
    pub fn drop_tile(&mut self, slot: usize, pos: matrix::Pos) -> error::Returns<()> {
        let tile = self.current_rack_mut().take(slot)?;
        if let Err(e) = self.board.place(pos, tile) {
            self.current_rack_mut().put(tile)?;
            return Err(e);
        }
        Ok(())
    }

    pub fn lift_tile(&mut self, pos: matrix::Pos) -> error::Returns<()> {
        let tile = self.board.lift(pos)?;
        self.current_rack_mut().put(tile)?;
        Ok(())
    }

    pub fn assign_blank(&mut self, pos: matrix::Pos, letter: u8) -> error::Returns<()> {
        self.board.assign_blank(pos, letter)
    }

    // Lays the letters word needs from the current rack, real tiles first.
    // Nothing is left on the board if the rack cannot supply them.
    pub fn place_word(&mut self, w: &word::Word) -> error::Returns<()> {
        for (i, letter) in (0i8..).zip(w.name.bytes()) {
            let at = w.seed.offset(w.direction, i);
            match self.board.letter_at(at) {
                Some(existing) if existing == letter => continue,
                Some(_) => {
                    self.undo_tentative()?;
                    return_error!(format!("{} does not fit at {}", w.name, at));
                }
                None => {}
            }
            let Some(tile) = self.current_rack_mut().take_letter(letter) else {
                self.undo_tentative()?;
                return_error!(format!("no {} on the rack for {}", letter as char, w.name));
            };
            if let Err(e) = self.board.place(at, tile) {
                self.current_rack_mut().put(tile)?;
                self.undo_tentative()?;
                return Err(e);
            }
        }
        Ok(())
    }

    // the current move's tiles go back to the rack.
    pub fn undo_tentative(&mut self) -> error::Returns<()> {
        for tile in self.board.rollback() {
            self.current_rack_mut().put(tile)?;
        }
        Ok(())
    }

    pub fn validate(
        &mut self,
        dictionary: &dyn dictionary::Dictionary,
        score_requested: bool,
    ) -> error::Returns<validator::ValidationResult> {
        validator::validate(
            &mut self.board,
            dictionary,
            self.game_config.rules(),
            score_requested,
        )
    }

    // Commits a valid move: score, accept tiles, refill. An invalid move
    // goes back to the rack and the result says why.
    pub fn confirm(
        &mut self,
        dictionary: &dyn dictionary::Dictionary,
    ) -> error::Returns<validator::ValidationResult> {
        let result = self.validate(dictionary, true)?;
        if result.ok {
            let turn = self.turn as usize;
            self.players[turn].score += result.score_delta.unwrap_or(0);
            self.board.accept_placement();
            self.bag.replenish(&mut self.players[turn].rack);
            self.num_consecutive_passes = 0;
        } else {
            self.undo_tentative()?;
        }
        Ok(result)
    }

    pub fn pass(&mut self) -> error::Returns<()> {
        self.undo_tentative()?;
        self.num_consecutive_passes += 1;
        Ok(())
    }

    // swaps rack tiles with the bag; needs a full rack's worth in the bag.
    pub fn exchange(&mut self, mut rng: &mut dyn RngCore, slots: &[usize]) -> error::Returns<()> {
        if self.bag.len() < self.game_config.rack_size() as usize {
            return_error!("not enough tiles in the bag".into());
        }
        self.undo_tentative()?;
        let turn = self.turn as usize;
        let mut returned = Vec::with_capacity(slots.len());
        for &slot in slots {
            returned.push(self.players[turn].rack.take(slot)?);
        }
        self.bag.replenish(&mut self.players[turn].rack);
        self.bag.put_back(&mut rng, &returned);
        self.num_consecutive_passes += 1;
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        (self.bag.is_empty() && self.players.iter().any(|p| p.rack.is_empty()))
            || self.num_consecutive_passes as usize >= 2 * self.players.len()
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        self.turn -= num_players & -((self.turn >= num_players) as i8) as u8;
    }
}
