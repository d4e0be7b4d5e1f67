// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use super::{alphabet, rack, tile};
use rand::prelude::*;

#[derive(Clone)]
pub struct Bag(pub Vec<tile::Tile>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for letter in alphabet.letters() {
            for _ in 0..alphabet.freq(letter) {
                bag.push(tile::Tile::letter(letter, alphabet));
            }
        }
        for _ in 0..alphabet.blank_freq() {
            bag.push(tile::Tile::blank());
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    pub fn pop(&mut self) -> Option<tile::Tile> {
        self.0.pop()
    }

    // a specific letter, as for the opening tile.
    pub fn take_letter(&mut self, letter: u8) -> Option<tile::Tile> {
        let idx = self.0.iter().rposition(|t| !t.is_blank() && t.face() == Some(letter))?;
        Some(self.0.remove(idx))
    }

    // fills free rack slots from the end of the bag. returns how many were drawn.
    pub fn replenish(&mut self, rack: &mut rack::Rack) -> usize {
        let mut drawn = 0;
        while !rack.is_full() {
            let Some(t) = self.pop() else {
                break;
            };
            if rack.put(t).is_err() {
                self.0.push(t);
                break;
            }
            drawn += 1;
        }
        drawn
    }

    // put back the tiles in random order. keep the rest of the bag in the same order.
    pub fn put_back(&mut self, mut rng: &mut dyn RngCore, tiles: &[tile::Tile]) {
        let mut num_new_tiles = tiles.len();
        match num_new_tiles {
            0 => {
                return;
            }
            1 => {
                self.0
                    .insert(rng.random_range(0..=self.0.len()), tiles[0].reset());
                return;
            }
            _ => {}
        }
        let mut num_old_tiles = self.0.len();
        let new_len = num_new_tiles + num_old_tiles;
        self.0.reserve(num_new_tiles + new_len); // cap = old+(new+old)+new
        self.0.resize(new_len + num_old_tiles, tile::Tile::blank()); // [old,_,_]
        let mut p_old_tiles = new_len; // after old+new
        self.0.copy_within(0..num_old_tiles, p_old_tiles); // [old,_,old]
        let mut p_new_tiles = self.0.len(); // after old+new+old
        self.0.extend(tiles.iter().map(|t| t.reset())); // [old,_,old,new]
        self.0[p_new_tiles..].shuffle(&mut rng);
        for wp in 0..new_len {
            if if num_new_tiles == 0 {
                true
            } else if num_old_tiles == 0 {
                false
            } else {
                rng.random_range(0..num_old_tiles + num_new_tiles) < num_old_tiles
            } {
                self.0[wp] = self.0[p_old_tiles];
                p_old_tiles += 1;
                num_old_tiles -= 1;
            } else {
                self.0[wp] = self.0[p_new_tiles];
                p_new_tiles += 1;
                num_new_tiles -= 1;
            }
        }
        self.0.truncate(new_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use rand::SeedableRng;

    #[test]
    fn tiles_are_conserved() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
        let mut bag = Bag::new(&ENGLISH_ALPHABET);
        assert_eq!(bag.len(), ENGLISH_ALPHABET.num_tiles() as usize);
        bag.shuffle(&mut rng);
        let a = bag.take_letter(b'A').unwrap();
        assert_eq!(a.face(), Some(b'A'));
        let mut rack = rack::Rack::new(7);
        assert_eq!(bag.replenish(&mut rack), 7);
        assert_eq!(bag.len() + rack.len() + 1, ENGLISH_ALPHABET.num_tiles() as usize);
        let returned = (0..3).map(|i| rack.take(i).unwrap()).collect::<Vec<_>>();
        bag.put_back(&mut rng, &returned);
        assert_eq!(bag.len() + rack.len() + 1, ENGLISH_ALPHABET.num_tiles() as usize);
        assert_eq!(bag.0.iter().filter(|t| t.is_blank()).count(), ENGLISH_ALPHABET.blank_freq() as usize);
    }
}
