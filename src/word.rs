// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Provenance {
    OrdinaryCrossword,
    CapWord,
    ExtensionWord,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Provenance::OrdinaryCrossword => "ordinary crossword",
            Provenance::CapWord => "cap word",
            Provenance::ExtensionWord => "extension word",
        })
    }
}

// A straight run of letters read from seed in direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    pub name: String,
    pub seed: matrix::Pos,
    pub direction: matrix::Direction,
    pub points: i32,
    pub order: Option<u32>,
    pub provenance: Option<Provenance>,
}

impl Word {
    pub fn new(seed: matrix::Pos, name: String, direction: matrix::Direction) -> Self {
        Self {
            name,
            seed,
            direction,
            points: 0,
            order: None,
            provenance: None,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.name.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    pub fn last_letter(&self) -> matrix::Pos {
        self.seed
            .offset(self.direction, (self.len() as i8 - 1).max(0))
    }

    pub fn cells(&self) -> impl Iterator<Item = matrix::Pos> + '_ {
        (0..self.len() as i8).map(move |i| self.seed.offset(self.direction, i))
    }

    #[inline(always)]
    pub fn contains(&self, pos: matrix::Pos) -> bool {
        self.cells().any(|c| c == pos)
    }

    // the same occurrence, possibly read the other way (palindromes).
    pub fn same_word(&self, other: &Word) -> bool {
        self.name == other.name
            && ((self.seed == other.seed && self.direction == other.direction)
                || (self.seed == other.last_letter() && self.direction == other.direction.opposite()))
    }

    // same text at the same place.
    #[inline(always)]
    pub fn same_placement(&self, other: &Word) -> bool {
        self.name == other.name && self.seed == other.seed && self.direction == other.direction
    }

    // shares at least one cell.
    pub fn connects_to(&self, other: &Word) -> bool {
        self.cells().any(|c| other.contains(c))
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.name, self.seed, self.direction)?;
        if let Some(provenance) = self.provenance {
            write!(f, " {} points:{}", provenance, self.points)?;
            if let Some(order) = self.order {
                write!(f, " order:{}", order)?;
            }
        }
        Ok(())
    }
}
