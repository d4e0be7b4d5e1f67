// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};

pub const MAX_WORD_LEN: usize = 15;

// bit i set iff letter 'A' + i occurs.
#[inline(always)]
pub fn letter_mask_add(mask: u32, letter: u8) -> u32 {
    match alphabet::letter_index(letter) {
        Some(idx) => mask | (1 << idx),
        None => mask,
    }
}

#[inline(always)]
pub fn letter_mask(word: &[u8]) -> u32 {
    word.iter().fold(0, |mask, &letter| letter_mask_add(mask, letter))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    // frequency rank, lower is more common.
    pub order: u32,
    pub letter_mask: u32,
}

impl Entry {
    pub fn new(word: &str, order: u32) -> Entry {
        let word = word.to_ascii_uppercase();
        let letter_mask = letter_mask(word.as_bytes());
        Entry {
            word,
            order,
            letter_mask,
        }
    }

    #[inline(always)]
    pub fn within_vocabulary(&self, vocabulary_limit: u32) -> bool {
        self.order <= vocabulary_limit
    }

    // true iff every letter of the entry is in the mask.
    #[inline(always)]
    pub fn fits_mask(&self, mask: u32) -> bool {
        self.letter_mask | mask == mask
    }
}

pub trait Dictionary {
    fn lookup(&self, word: &str) -> Option<&Entry>;
    fn subdictionary(&self, len: usize) -> &[Entry];
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    fn lookup_bytes(&self, word: &[u8]) -> Option<&Entry> {
        std::str::from_utf8(word).ok().and_then(|w| self.lookup(w))
    }

    // the robot's view: rare words are unknown.
    #[inline(always)]
    fn lookup_limited(&self, word: &str, vocabulary_limit: u32) -> Option<&Entry> {
        self.lookup(word)
            .filter(|entry| entry.within_vocabulary(vocabulary_limit))
    }
}

#[derive(Clone, Default)]
pub struct WordList {
    by_length: Vec<Vec<Entry>>,
    index: std::collections::HashMap<String, (usize, usize)>,
    num_words: usize,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    // later duplicates are ignored. words must be ascii letters.
    pub fn insert(&mut self, word: &str, order: u32) -> error::Returns<()> {
        if word.is_empty() || word.len() > MAX_WORD_LEN {
            return_error!(format!("bad word length {:?}", word));
        }
        if !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return_error!(format!("invalid letter in {:?}", word));
        }
        let entry = Entry::new(word, order);
        if self.index.contains_key(&entry.word) {
            return Ok(());
        }
        let len = entry.word.len();
        if self.by_length.len() <= len {
            self.by_length.resize_with(len + 1, Vec::new);
        }
        self.index
            .insert(entry.word.clone(), (len, self.by_length[len].len()));
        self.by_length[len].push(entry);
        self.num_words += 1;
        Ok(())
    }

    // one word per line, most common first. blank lines are skipped.
    pub fn from_lines(giant_string: &str) -> error::Returns<WordList> {
        let mut word_list = WordList::new();
        for (order, line) in (0u32..).zip(giant_string.lines().map(str::trim).filter(|s| !s.is_empty())) {
            word_list.insert(line, order)?;
        }
        Ok(word_list)
    }

    pub fn from_words<'a, II: IntoIterator<Item = &'a str>>(words: II) -> error::Returns<WordList> {
        let mut word_list = WordList::new();
        for (order, word) in (0u32..).zip(words) {
            word_list.insert(word, order)?;
        }
        Ok(word_list)
    }

    // records of word,order without headers.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> error::Returns<WordList> {
        let mut word_list = WordList::new();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        for result in csv_reader.records() {
            let record = result?;
            let word = record.get(0).ok_or("missing word")?.trim();
            let order = match record.get(1) {
                Some(s) => s.trim().parse::<u32>()?,
                None => word_list.len() as u32,
            };
            word_list.insert(word, order)?;
        }
        Ok(word_list)
    }

    pub fn from_file(path: &str) -> error::Returns<WordList> {
        if path.ends_with(".csv") {
            Self::from_csv_reader(std::fs::File::open(path)?)
        } else {
            Self::from_lines(&std::fs::read_to_string(path)?)
        }
    }
}

impl Dictionary for WordList {
    fn lookup(&self, word: &str) -> Option<&Entry> {
        let found = self.index.get(word).or_else(|| {
            if word.bytes().any(|b| b.is_ascii_lowercase()) {
                self.index.get(&word.to_ascii_uppercase())
            } else {
                None
            }
        });
        found.map(|&(len, idx)| &self.by_length[len][idx])
    }

    fn subdictionary(&self, len: usize) -> &[Entry] {
        self.by_length.get(len).map_or(&[], |v| &v[..])
    }

    fn len(&self) -> usize {
        self.num_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let words = WordList::from_words(["cat", "Dog", "at"]).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words.lookup("CAT").unwrap().order, 0);
        assert_eq!(words.lookup("dog").unwrap().word, "DOG");
        assert!(words.lookup("TAC").is_none());
        assert_eq!(words.subdictionary(2).len(), 1);
        assert!(words.subdictionary(9).is_empty());
    }

    #[test]
    fn vocabulary_limit_hides_rare_words() {
        let words = WordList::from_lines("CAT\n\nZAX\n").unwrap();
        assert_eq!(words.lookup("ZAX").unwrap().order, 1);
        assert!(words.lookup_limited("ZAX", 0).is_none());
        assert!(words.lookup_limited("CAT", 0).is_some());
    }

    #[test]
    fn masks_prefilter() {
        let entry = Entry::new("TACT", 0);
        assert_eq!(entry.letter_mask, letter_mask(b"CAT"));
        assert!(entry.fits_mask(letter_mask(b"CATS")));
        assert!(!entry.fits_mask(letter_mask(b"CAS")));
    }

    #[test]
    fn rejects_junk() {
        let mut words = WordList::new();
        assert!(words.insert("C4T", 0).is_err());
        assert!(words.insert("", 0).is_err());
        words.insert("cat", 0).unwrap();
        words.insert("CAT", 7).unwrap();
        assert_eq!(words.lookup("CAT").unwrap().order, 0);
    }

    #[test]
    fn loads_csv() {
        let words = WordList::from_csv_reader("cat,10\ndog,3\nemu\n".as_bytes()).unwrap();
        assert_eq!(words.lookup("CAT").unwrap().order, 10);
        assert_eq!(words.lookup("DOG").unwrap().order, 3);
        assert_eq!(words.lookup("EMU").unwrap().order, 2);
    }

    #[test]
    fn loads_file() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "ox,1").unwrap();
        writeln!(f, "zoo,2").unwrap();
        drop(f);
        let words = WordList::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.lookup("ZOO").is_some());
    }
}
