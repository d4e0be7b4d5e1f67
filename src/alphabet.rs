// Copyright (C) 2020-2026 Andy Kurnia.

// Letters are plain uppercase ascii bytes everywhere in this crate.
// The blank is not a letter; it has its own row at index 0.

pub struct LetterInfo {
    label: &'static str,
    blank_label: &'static str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet {
    letters: &'static [LetterInfo],
}

pub enum Alphabet {
    Static(StaticAlphabet),
}

pub const BLANK_LABEL: &str = "?";
pub const NUM_LETTERS: u8 = 26;

#[inline(always)]
pub fn letter_index(letter: u8) -> Option<u8> {
    if letter.is_ascii_uppercase() {
        Some(letter - b'A')
    } else {
        None
    }
}

#[inline(always)]
pub fn letter_from_index(idx: u8) -> u8 {
    b'A' + idx
}

impl Alphabet {
    #[inline(always)]
    fn get(&self, idx: usize) -> Option<&'static LetterInfo> {
        match self {
            Alphabet::Static(x) => x.letters.get(idx),
        }
    }

    #[inline(always)]
    fn info(&self, letter: u8) -> Option<&'static LetterInfo> {
        letter_index(letter).and_then(|idx| self.get(idx as usize + 1))
    }

    // number of letters, not counting the blank.
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => (x.letters.len() - 1) as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn letters(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).map(letter_from_index)
    }

    #[inline(always)]
    pub fn score(&self, letter: u8) -> i8 {
        self.info(letter).map_or(0, |x| x.score)
    }

    #[inline(always)]
    pub fn freq(&self, letter: u8) -> u8 {
        self.info(letter).map_or(0, |x| x.freq)
    }

    #[inline(always)]
    pub fn blank_freq(&self) -> u8 {
        self.get(0).map_or(0, |x| x.freq)
    }

    #[inline(always)]
    pub fn label(&self, letter: u8) -> Option<&'static str> {
        self.info(letter).map(|x| x.label)
    }

    #[inline(always)]
    pub fn blank_label(&self, letter: u8) -> Option<&'static str> {
        self.info(letter).map(|x| x.blank_label)
    }

    pub fn num_tiles(&self) -> u16 {
        self.blank_freq() as u16 + self.letters().map(|l| self.freq(l) as u16).sum::<u16>()
    }
}

macro_rules! letter {
    ($label:expr, $blank_label:expr, $freq:expr, $score:expr) => {
        LetterInfo {
            label: $label,
            blank_label: $blank_label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    letters: &[
        letter!("?", "?", 2, 0),
        letter!("A", "a", 9, 1),
        letter!("B", "b", 2, 3),
        letter!("C", "c", 2, 3),
        letter!("D", "d", 4, 2),
        letter!("E", "e", 12, 1),
        letter!("F", "f", 2, 4),
        letter!("G", "g", 3, 2),
        letter!("H", "h", 2, 4),
        letter!("I", "i", 9, 1),
        letter!("J", "j", 1, 8),
        letter!("K", "k", 1, 5),
        letter!("L", "l", 4, 1),
        letter!("M", "m", 2, 3),
        letter!("N", "n", 6, 1),
        letter!("O", "o", 8, 1),
        letter!("P", "p", 2, 3),
        letter!("Q", "q", 1, 10),
        letter!("R", "r", 6, 1),
        letter!("S", "s", 4, 1),
        letter!("T", "t", 6, 1),
        letter!("U", "u", 4, 1),
        letter!("V", "v", 2, 4),
        letter!("W", "w", 2, 4),
        letter!("X", "x", 1, 8),
        letter!("Y", "y", 2, 4),
        letter!("Z", "z", 1, 10),
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_has_a_hundred_tiles() {
        assert_eq!(ENGLISH_ALPHABET.len(), 26);
        assert_eq!(ENGLISH_ALPHABET.num_tiles(), 100);
        assert_eq!(ENGLISH_ALPHABET.blank_freq(), 2);
    }

    #[test]
    fn scores_and_labels() {
        assert_eq!(ENGLISH_ALPHABET.score(b'Q'), 10);
        assert_eq!(ENGLISH_ALPHABET.score(b'E'), 1);
        assert_eq!(ENGLISH_ALPHABET.score(b'?'), 0);
        assert_eq!(ENGLISH_ALPHABET.label(b'K'), Some("K"));
        assert_eq!(ENGLISH_ALPHABET.blank_label(b'K'), Some("k"));
        assert_eq!(ENGLISH_ALPHABET.label(b'k'), None);
    }
}
