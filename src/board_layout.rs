// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;
use rand::prelude::*;

// Bonuses sit on the lattice of inner corners between cells. The corner at
// post (c, r) touches cells (c, r), (c + 1, r), (c, r + 1), (c + 1, r + 1).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub tile_multiplier: i8,
}

pub static TWS: Premium = Premium {
    word_multiplier: 3,
    tile_multiplier: 1,
};
pub static DWS: Premium = Premium {
    word_multiplier: 2,
    tile_multiplier: 1,
};
pub static TLS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 3,
};
pub static DLS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 2,
};
pub static FVS: Premium = Premium {
    word_multiplier: 1,
    tile_multiplier: 1,
};

impl Premium {
    #[inline(always)]
    pub fn is_plain(&self) -> bool {
        self.word_multiplier == 1 && self.tile_multiplier == 1
    }

    #[inline(always)]
    pub fn is_word_bonus(&self) -> bool {
        self.word_multiplier != 1
    }

    // rough strength, used to keep an opening tile away from bonuses.
    #[inline(always)]
    pub fn power(&self) -> i32 {
        (self.tile_multiplier as i32) * (self.word_multiplier as i32) * (self.word_multiplier as i32)
    }
}

#[derive(Clone)]
pub struct BonusOverlay {
    posts: matrix::Dim,
    premiums: Box<[Premium]>,
}

impl BonusOverlay {
    pub fn new(board_dim: matrix::Dim) -> Self {
        let posts = matrix::Dim {
            rows: (board_dim.rows - 1).max(0),
            cols: (board_dim.cols - 1).max(0),
        };
        Self {
            posts,
            premiums: vec![FVS; posts.len()].into_boxed_slice(),
        }
    }

    // one bonus per unit of board size, kinds drawn 3:2:3:2 DL:TL:DW:TW.
    pub fn randomized(board_dim: matrix::Dim, key: u64) -> Self {
        let mut overlay = Self::new(board_dim);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(key);
        let mut spots = overlay.posts.positions().collect::<Vec<_>>();
        spots.shuffle(&mut rng);
        let num_bonuses = (board_dim.rows.max(board_dim.cols) as usize).min(spots.len());
        for &post in &spots[..num_bonuses] {
            let premium = match rng.random_range(0..10) {
                0..=2 => DLS,
                3..=4 => TLS,
                5..=7 => DWS,
                _ => TWS,
            };
            overlay.set(post, premium);
        }
        overlay
    }

    #[inline(always)]
    pub fn set(&mut self, post: matrix::Pos, premium: Premium) {
        if self.posts.contains(post) {
            self.premiums[self.posts.at(post)] = premium;
        }
    }

    #[inline(always)]
    pub fn at(&self, post: matrix::Pos) -> Premium {
        if self.posts.contains(post) {
            self.premiums[self.posts.at(post)]
        } else {
            FVS
        }
    }

    // non-plain corners around a board cell.
    pub fn touching(&self, cell: matrix::Pos) -> impl Iterator<Item = (matrix::Pos, Premium)> + '_ {
        (-1..=0i8)
            .flat_map(move |dy| (-1..=0i8).map(move |dx| matrix::Pos::new(cell.col + dx, cell.row + dy)))
            .filter(move |&post| self.posts.contains(post))
            .map(move |post| (post, self.at(post)))
            .filter(|(_, premium)| !premium.is_plain())
    }

    pub fn bonuses(&self) -> impl Iterator<Item = (matrix::Pos, Premium)> + '_ {
        self.posts
            .positions()
            .map(move |post| (post, self.at(post)))
            .filter(|(_, premium)| !premium.is_plain())
    }

    // the cell in the interior farthest from the bonuses, weighted by power.
    pub fn most_distant_from_bonuses(&self, board_dim: matrix::Dim) -> Option<matrix::Pos> {
        let mut best = None;
        let mut best_distance = 0;
        for cell in board_dim.positions() {
            if cell.row > 2
                && cell.row < board_dim.rows - 3
                && cell.col > 2
                && cell.col < board_dim.cols - 3
            {
                let distance = self
                    .bonuses()
                    .map(|(post, premium)| {
                        ((cell.col - post.col).abs() as i32 + (cell.row - post.row).abs() as i32)
                            * premium.power()
                    })
                    .sum::<i32>();
                if distance > best_distance {
                    best_distance = distance;
                    best = Some(cell);
                }
            }
        }
        best
    }
}
