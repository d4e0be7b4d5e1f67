// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, dictionary, error, tile};

// how many of each face a rack can supply. unassigned blanks are wildcards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RackTally {
    pub counts: [u8; alphabet::NUM_LETTERS as usize],
    pub wildcards: u8,
}

impl RackTally {
    #[inline(always)]
    pub fn count(&self, letter: u8) -> u8 {
        alphabet::letter_index(letter).map_or(0, |idx| self.counts[idx as usize])
    }

    // consumes one of letter, falling back to a wildcard.
    #[inline(always)]
    pub fn take(&mut self, letter: u8) -> bool {
        match alphabet::letter_index(letter) {
            Some(idx) if self.counts[idx as usize] > 0 => {
                self.counts[idx as usize] -= 1;
                true
            }
            Some(_) if self.wildcards > 0 => {
                self.wildcards -= 1;
                true
            }
            _ => false,
        }
    }

    // true iff every letter in needed can be supplied at once.
    pub fn can_supply(&self, needed: &[u8]) -> bool {
        let mut remaining = *self;
        needed.iter().all(|&letter| remaining.take(letter))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rack {
    slots: Box<[Option<tile::Tile>]>,
}

impl Rack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    pub fn from_tiles(capacity: usize, tiles: &[tile::Tile]) -> error::Returns<Self> {
        if tiles.len() > capacity {
            return_error!(format!("{} tiles do not fit a rack of {}", tiles.len(), capacity));
        }
        let mut rack = Self::new(capacity);
        for (slot, &tile) in rack.slots.iter_mut().zip(tiles) {
            *slot = Some(tile.reset());
        }
        Ok(rack)
    }

    // uppercase letters are tiles, '?' is a blank.
    pub fn from_letters(capacity: usize, letters: &str, alphabet: &alphabet::Alphabet) -> error::Returns<Self> {
        let mut tiles = Vec::with_capacity(letters.len());
        for letter in letters.bytes() {
            if letter == b'?' {
                tiles.push(tile::Tile::blank());
            } else if alphabet::letter_index(letter.to_ascii_uppercase()).is_some() {
                tiles.push(tile::Tile::letter(letter.to_ascii_uppercase(), alphabet));
            } else {
                return_error!(format!("invalid rack letter {:?}", letter as char));
            }
        }
        Self::from_tiles(capacity, &tiles)
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    #[inline(always)]
    pub fn slots(&self) -> &[Option<tile::Tile>] {
        &self.slots
    }

    pub fn tiles(&self) -> impl Iterator<Item = tile::Tile> + '_ {
        self.slots.iter().filter_map(|&s| s)
    }

    pub fn take(&mut self, slot: usize) -> error::Returns<tile::Tile> {
        match self.slots.get_mut(slot).and_then(Option::take) {
            Some(tile) => Ok(tile),
            None => {
                return_error!(format!("rack slot {} is empty", slot));
            }
        }
    }

    // into the first free slot.
    pub fn put(&mut self, tile: tile::Tile) -> error::Returns<usize> {
        match self.slots.iter().position(|s| s.is_none()) {
            Some(slot) => {
                self.slots[slot] = Some(tile.reset());
                Ok(slot)
            }
            None => {
                return_error!("rack is full".into());
            }
        }
    }

    // a real tile of that letter if there is one, otherwise a blank assigned to it.
    pub fn take_letter(&mut self, letter: u8) -> Option<tile::Tile> {
        let letter = letter.to_ascii_uppercase();
        let real = self
            .slots
            .iter()
            .position(|s| matches!(s, Some(t) if !t.is_blank() && t.face() == Some(letter)));
        let slot = real.or_else(|| {
            self.slots
                .iter()
                .position(|s| matches!(s, Some(t) if t.is_blank() && t.face().is_none_or(|f| f == letter)))
        })?;
        self.slots[slot]
            .take()
            .map(|t| t.assigned_as(letter).unwrap_or(t))
    }

    pub fn num_blanks(&self) -> usize {
        self.tiles().filter(|t| t.is_blank()).count()
    }

    // bit per face on the rack. unassigned blanks contribute nothing.
    pub fn letter_mask(&self) -> u32 {
        self.tiles()
            .filter_map(|t| t.face())
            .fold(0, dictionary::letter_mask_add)
    }

    pub fn tally(&self) -> RackTally {
        let mut tally = RackTally::default();
        for t in self.tiles() {
            match t.face().and_then(alphabet::letter_index) {
                Some(idx) => tally.counts[idx as usize] += 1,
                None => tally.wildcards += 1,
            }
        }
        tally
    }

    // the same rack, with the nth unassigned blank standing for letter.
    pub fn with_blank_as(&self, nth: usize, letter: u8) -> Option<Rack> {
        let slot = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Some(tile::Tile::Blank { assigned: None })))
            .nth(nth)?
            .0;
        let mut rack = self.clone();
        rack.slots[slot] = rack.slots[slot].and_then(|t| t.assigned_as(letter));
        Some(rack)
    }

    pub fn first_unassigned_blank(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| matches!(s, Some(tile::Tile::Blank { assigned: None })))
    }

    pub fn labels(&self, alphabet: &alphabet::Alphabet) -> String {
        self.tiles().map(|t| t.label(alphabet)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;
    use crate::tile::Tile;

    #[test]
    fn prefers_real_tiles_over_blanks() {
        let mut rack = Rack::from_letters(7, "A?AT", &ENGLISH_ALPHABET).unwrap();
        assert_eq!(rack.len(), 4);
        assert_eq!(rack.take_letter(b'A'), Some(Tile::letter(b'A', &ENGLISH_ALPHABET)));
        assert_eq!(rack.take_letter(b'a'), Some(Tile::letter(b'A', &ENGLISH_ALPHABET)));
        assert_eq!(rack.take_letter(b'A'), Some(Tile::Blank { assigned: Some(b'A') }));
        assert_eq!(rack.take_letter(b'A'), None);
        assert_eq!(rack.labels(&ENGLISH_ALPHABET), "T");
    }

    #[test]
    fn tally_uses_wildcards() {
        let rack = Rack::from_letters(7, "CAT?", &ENGLISH_ALPHABET).unwrap();
        let tally = rack.tally();
        assert_eq!(tally.wildcards, 1);
        assert!(tally.can_supply(b"CATS"));
        assert!(!tally.can_supply(b"CATSS"));
        assert_eq!(rack.letter_mask(), dictionary::letter_mask(b"CAT"));
        let assigned = rack.with_blank_as(0, b'S').unwrap();
        assert_eq!(assigned.letter_mask(), dictionary::letter_mask(b"CATS"));
        assert_eq!(assigned.tally().wildcards, 0);
        assert_eq!(assigned.first_unassigned_blank(), None);
        assert_eq!(rack.first_unassigned_blank(), Some(3));
    }

    #[test]
    fn slots_are_bounded() {
        let mut rack = Rack::from_letters(2, "AB", &ENGLISH_ALPHABET).unwrap();
        assert!(rack.is_full());
        assert!(rack.put(Tile::blank()).is_err());
        let b = rack.take(1).unwrap();
        assert!(rack.take(1).is_err());
        assert_eq!(rack.put(b).unwrap(), 1);
        assert!(Rack::from_letters(1, "AB", &ENGLISH_ALPHABET).is_err());
        assert!(Rack::from_letters(7, "A1", &ENGLISH_ALPHABET).is_err());
    }
}
