// Copyright (C) 2020-2026 Andy Kurnia. All rights reserved.

use super::{alphabet, board, board_layout, matrix};
use std::fmt::Write;

#[inline(always)]
pub fn premium_label(premium: board_layout::Premium) -> &'static str {
    match premium.word_multiplier {
        3 => "=",
        2 => "-",
        _ => match premium.tile_multiplier {
            3 => "\"",
            2 => "\'",
            _ => " ",
        },
    }
}

#[inline(always)]
pub fn board_label(alphabet: &alphabet::Alphabet, board: &board::Board, pos: matrix::Pos) -> &'static str {
    board.tile_at(pos).map_or(".", |tile| tile.label(alphabet))
}

// Cells on even columns, bonus corners between them on odd rows and columns.
// Tiles of the current move are bracketed.
pub fn format_board(alphabet: &alphabet::Alphabet, board: &board::Board) -> String {
    let dim = board.dim();
    let bonuses = board.bonuses();
    let mut s = String::new();
    s.push_str("   ");
    for c in 0..dim.cols {
        let _ = write!(s, " {} ", ((c as u8) + 0x41) as char);
    }
    s.push('\n');
    for r in 0..dim.rows {
        let _ = write!(s, "{:2} ", r + 1);
        for c in 0..dim.cols {
            let pos = matrix::Pos::new(c, r);
            let label = board_label(alphabet, board, pos);
            if board.is_placed(pos) {
                let _ = write!(s, "[{}]", label);
            } else {
                let _ = write!(s, " {} ", label);
            }
        }
        let _ = writeln!(s, " {}", r + 1);
        if r + 1 < dim.rows {
            s.push_str("   ");
            for c in 0..dim.cols {
                let post = bonuses.at(matrix::Pos::new(c, r));
                let _ = write!(s, "  {}", if c + 1 < dim.cols { premium_label(post) } else { " " });
            }
            s.push('\n');
        }
    }
    s
}

pub fn print_board(alphabet: &alphabet::Alphabet, board: &board::Board) {
    print!("{}", format_board(alphabet, board));
}
