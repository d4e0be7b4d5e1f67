// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Pos {
    pub col: i8,
    pub row: i8,
}

impl Pos {
    #[inline(always)]
    pub fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    #[inline(always)]
    pub fn offset(&self, direction: Direction, steps: i8) -> Pos {
        let (dx, dy) = direction.delta();
        Pos {
            col: self.col + dx * steps,
            row: self.row + dy * steps,
        }
    }
}

impl std::fmt::Display for Pos {
    // column letter, 1-based row. Anything else as raw coordinates.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match u8::try_from(self.col) {
            Ok(col) if col < 26 && self.row >= 0 => {
                write!(f, "{}{}", (b'A' + col) as char, self.row as i16 + 1)
            }
            _ => write!(f, "({},{})", self.col, self.row),
        }
    }
}

// Clockwise from east. Rows grow downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    E,
    SE,
    S,
    SW,
    W,
    NW,
    N,
    NE,
}

pub static ALL_DIRECTIONS: [Direction; 8] = [
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
    Direction::N,
    Direction::NE,
];

pub static ORTHOGONAL_DIRECTIONS: [Direction; 4] =
    [Direction::E, Direction::S, Direction::W, Direction::N];

impl Direction {
    #[inline(always)]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn from_index(idx: u8) -> Direction {
        ALL_DIRECTIONS[(idx & 7) as usize]
    }

    #[inline(always)]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
        }
    }

    #[inline(always)]
    pub fn opposite(self) -> Direction {
        Direction::from_index(self.index() + 4)
    }

    #[inline(always)]
    pub fn is_diagonal(self) -> bool {
        self.index() & 1 != 0
    }

    #[inline(always)]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    // both ways along the same line.
    #[inline(always)]
    pub fn axis_mask(self) -> u8 {
        self.bit() | self.opposite().bit()
    }

    #[inline(always)]
    pub fn same_axis(self, other: Direction) -> bool {
        self.axis_mask() & other.bit() != 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn len(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn at(&self, pos: Pos) -> usize {
        self.at_row_col(pos.row, pos.col)
    }

    #[inline(always)]
    pub fn pos_of(&self, idx: usize) -> Pos {
        Pos {
            col: (idx % self.cols as usize) as i8,
            row: (idx / self.cols as usize) as i8,
        }
    }

    #[inline(always)]
    pub fn neighbor(&self, pos: Pos, direction: Direction) -> Option<Pos> {
        let next = pos.offset(direction, 1);
        if self.contains(next) { Some(next) } else { None }
    }

    #[inline(always)]
    pub fn center(&self) -> Pos {
        Pos {
            col: self.cols / 2,
            row: self.rows / 2,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.len()).map(move |idx| self.pos_of(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_print_as_labels() {
        assert_eq!(Pos::new(7, 7).to_string(), "H8");
        assert_eq!(Pos::new(25, 126).to_string(), "Z127");
        assert_eq!(Pos::new(0, 127).to_string(), "A128");
        assert_eq!(Pos::new(-1, 3).to_string(), "(-1,3)");
        assert_eq!(Pos::new(26, 0).to_string(), "(26,0)");
        assert_eq!(Pos::new(2, -1).to_string(), "(2,-1)");
    }

    #[test]
    fn opposites_and_axes() {
        for &d in ALL_DIRECTIONS.iter() {
            assert_eq!(d.opposite().opposite(), d);
            assert!(d.same_axis(d.opposite()));
            assert_eq!(d.axis_mask().count_ones(), 2);
        }
        assert_eq!(Direction::E.opposite(), Direction::W);
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert!(!Direction::E.same_axis(Direction::S));
        assert!(Direction::SE.is_diagonal());
    }

    #[test]
    fn neighbors_stop_at_edges() {
        let dim = Dim { rows: 3, cols: 4 };
        assert_eq!(dim.len(), 12);
        assert_eq!(dim.neighbor(Pos::new(0, 0), Direction::W), None);
        assert_eq!(dim.neighbor(Pos::new(0, 0), Direction::SE), Some(Pos::new(1, 1)));
        assert_eq!(dim.neighbor(Pos::new(3, 2), Direction::E), None);
        assert_eq!(dim.pos_of(dim.at(Pos::new(3, 2))), Pos::new(3, 2));
        assert_eq!(dim.center(), Pos::new(2, 1));
        assert_eq!(Pos::new(7, 7).to_string(), "H8");
    }
}
