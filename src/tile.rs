// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;

// A blank is worth nothing no matter what letter it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Letter { letter: u8, value: i8 },
    Blank { assigned: Option<u8> },
}

impl Tile {
    #[inline(always)]
    pub fn letter(letter: u8, alphabet: &alphabet::Alphabet) -> Tile {
        Tile::Letter {
            letter,
            value: alphabet.score(letter),
        }
    }

    #[inline(always)]
    pub fn blank() -> Tile {
        Tile::Blank { assigned: None }
    }

    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank { .. })
    }

    // the letter this tile currently reads as, if any.
    #[inline(always)]
    pub fn face(&self) -> Option<u8> {
        match *self {
            Tile::Letter { letter, .. } => Some(letter),
            Tile::Blank { assigned } => assigned,
        }
    }

    #[inline(always)]
    pub fn value(&self) -> i32 {
        match *self {
            Tile::Letter { value, .. } => value as i32,
            Tile::Blank { .. } => 0,
        }
    }

    // a copy of this blank standing for the given letter.
    #[inline(always)]
    pub fn assigned_as(&self, letter: u8) -> Option<Tile> {
        match self {
            Tile::Blank { .. } => Some(Tile::Blank {
                assigned: Some(letter),
            }),
            Tile::Letter { .. } => None,
        }
    }

    // back to the unassigned form when it returns to a rack.
    #[inline(always)]
    pub fn reset(self) -> Tile {
        match self {
            Tile::Blank { .. } => Tile::blank(),
            x => x,
        }
    }

    pub fn label(&self, alphabet: &alphabet::Alphabet) -> &'static str {
        match *self {
            Tile::Letter { letter, .. } => alphabet.label(letter).unwrap_or(alphabet::BLANK_LABEL),
            Tile::Blank {
                assigned: Some(letter),
            } => alphabet
                .blank_label(letter)
                .unwrap_or(alphabet::BLANK_LABEL),
            Tile::Blank { assigned: None } => alphabet::BLANK_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::ENGLISH_ALPHABET;

    #[test]
    fn blank_keeps_zero_value_when_assigned() {
        let blank = Tile::blank();
        assert_eq!(blank.face(), None);
        let x = blank.assigned_as(b'X').unwrap();
        assert_eq!(x.face(), Some(b'X'));
        assert_eq!(x.value(), 0);
        assert!(x.is_blank());
        assert_eq!(x.reset(), Tile::blank());
        assert_eq!(x.label(&ENGLISH_ALPHABET), "x");
    }

    #[test]
    fn letters_cannot_be_assigned() {
        let q = Tile::letter(b'Q', &ENGLISH_ALPHABET);
        assert_eq!(q.value(), 10);
        assert_eq!(q.assigned_as(b'U'), None);
        assert_eq!(q.reset(), q);
        assert_eq!(q.label(&ENGLISH_ALPHABET), "Q");
    }
}
