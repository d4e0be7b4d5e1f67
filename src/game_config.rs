// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, matrix};

// 100 is the first format. Revisions that change rules:
// 103 stops tolerating duplicate words,
// 106 turns on backwards words for the plain variation,
// 107 stops accepting a move that is bad in a crossing direction.
pub const CURRENT_REVISION: u16 = 108;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variation {
    Crosswords,
    Crosswords17,
}

impl Variation {
    pub fn board_size(&self) -> i8 {
        match self {
            Variation::Crosswords => 15,
            Variation::Crosswords17 => 17,
        }
    }

    pub fn from_name(name: &str) -> Option<Variation> {
        match name.to_ascii_lowercase().as_str() {
            "crosswords" => Some(Variation::Crosswords),
            "crosswords-17" | "crosswords17" => Some(Variation::Crosswords17),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub diagonals: bool,
    pub backwards: bool,
    // any shape is fine as long as the new tiles connect.
    pub all_connected: bool,
    pub no_duplicates: bool,
    // old games accepted moves whose only flaw was a line or connection problem.
    pub legacy_mixed_legality: bool,
    pub legacy_duplicates_tolerated: bool,
}

impl RuleSet {
    pub fn for_revision(variation: Variation, revision: u16) -> RuleSet {
        let (diagonals, backwards, all_connected) = match variation {
            Variation::Crosswords => (false, revision >= 106, false),
            Variation::Crosswords17 => (true, true, true),
        };
        RuleSet {
            diagonals,
            backwards,
            all_connected,
            no_duplicates: false,
            legacy_mixed_legality: revision < 107,
            legacy_duplicates_tolerated: revision < 103,
        }
    }

    // every direction the board connects in.
    #[inline(always)]
    pub fn neighbor_directions(&self) -> &'static [matrix::Direction] {
        if self.diagonals {
            &matrix::ALL_DIRECTIONS
        } else {
            &matrix::ORTHOGONAL_DIRECTIONS
        }
    }

    // directions a word may be read in.
    #[inline(always)]
    pub fn reading_directions(&self) -> &'static [matrix::Direction] {
        use matrix::Direction::*;
        static FORWARD: [matrix::Direction; 2] = [E, S];
        static FORWARD_DIAGONAL: [matrix::Direction; 4] = [E, SE, S, NE];
        match (self.diagonals, self.backwards) {
            (false, false) => &FORWARD,
            (true, false) => &FORWARD_DIAGONAL,
            _ => self.neighbor_directions(),
        }
    }

    #[inline(always)]
    pub fn reads(&self, direction: matrix::Direction) -> bool {
        self.reading_directions().contains(&direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    // entries ranked above this are unknown to the robot.
    pub vocabulary_limit: u32,
    pub size_limit: usize,
    pub trim_size: f64,
    pub threshold: f64,
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            vocabulary_limit: 999_999,
            size_limit: 10,
            trim_size: 0.8,
            threshold: 0.5,
            time_budget_ms: None,
        }
    }
}

pub struct StaticGameConfig {
    variation: Variation,
    revision: u16,
    rules: RuleSet,
    alphabet: &'static alphabet::Alphabet,
    dim: matrix::Dim,
    rack_size: i8,
    num_players: u8,
}

pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    #[inline(always)]
    pub fn variation(&self) -> Variation {
        match self {
            GameConfig::Static(x) => x.variation,
        }
    }

    #[inline(always)]
    pub fn revision(&self) -> u16 {
        match self {
            GameConfig::Static(x) => x.revision,
        }
    }

    #[inline(always)]
    pub fn rules(&self) -> &RuleSet {
        match self {
            GameConfig::Static(x) => &x.rules,
        }
    }

    #[inline(always)]
    pub fn alphabet(&self) -> &'static alphabet::Alphabet {
        match self {
            GameConfig::Static(x) => x.alphabet,
        }
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        match self {
            GameConfig::Static(x) => x.dim,
        }
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        match self {
            GameConfig::Static(x) => x.rack_size,
        }
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.num_players,
        }
    }

    pub fn with_rules(self, rules: RuleSet) -> Self {
        match self {
            GameConfig::Static(x) => GameConfig::Static(StaticGameConfig { rules, ..x }),
        }
    }
}

pub fn make_game_config(variation: Variation, revision: u16) -> GameConfig {
    let size = variation.board_size();
    GameConfig::Static(StaticGameConfig {
        variation,
        revision,
        rules: RuleSet::for_revision(variation, revision),
        alphabet: &alphabet::ENGLISH_ALPHABET,
        dim: matrix::Dim {
            rows: size,
            cols: size,
        },
        rack_size: 7,
        num_players: 2,
    })
}

pub fn make_crosswords_game_config() -> GameConfig {
    make_game_config(Variation::Crosswords, CURRENT_REVISION)
}

pub fn make_crosswords17_game_config() -> GameConfig {
    make_game_config(Variation::Crosswords17, CURRENT_REVISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Direction;

    #[test]
    fn revisions_select_rules() {
        let old = RuleSet::for_revision(Variation::Crosswords, 102);
        assert!(!old.backwards);
        assert!(old.legacy_mixed_legality);
        assert!(old.legacy_duplicates_tolerated);
        let new = RuleSet::for_revision(Variation::Crosswords, CURRENT_REVISION);
        assert!(new.backwards);
        assert!(!new.legacy_mixed_legality);
        assert!(!new.legacy_duplicates_tolerated);
        let big = RuleSet::for_revision(Variation::Crosswords17, CURRENT_REVISION);
        assert!(big.diagonals && big.all_connected);
    }

    #[test]
    fn reading_directions_follow_rules() {
        let plain = RuleSet::default();
        assert_eq!(plain.reading_directions(), &[Direction::E, Direction::S]);
        assert_eq!(plain.neighbor_directions().len(), 4);
        let backwards = RuleSet {
            backwards: true,
            ..RuleSet::default()
        };
        assert!(backwards.reads(Direction::W));
        assert!(!backwards.reads(Direction::SE));
        let diagonal = RuleSet {
            diagonals: true,
            ..RuleSet::default()
        };
        assert!(diagonal.reads(Direction::NE));
        assert!(!diagonal.reads(Direction::SW));
        assert_eq!(diagonal.neighbor_directions().len(), 8);
    }

    #[test]
    fn search_limits_fill_defaults_from_json() {
        let limits = serde_json::from_str::<SearchLimits>(r#"{"vocabulary_limit": 5000}"#).unwrap();
        assert_eq!(limits.vocabulary_limit, 5000);
        assert_eq!(limits.size_limit, 10);
        assert_eq!(limits.time_budget_ms, None);
    }

    #[test]
    fn configs() {
        let config = make_crosswords_game_config();
        assert_eq!(config.dim().rows, 15);
        assert_eq!(config.rack_size(), 7);
        assert_eq!(config.revision(), CURRENT_REVISION);
        assert_eq!(make_crosswords17_game_config().dim().cols, 17);
        assert_eq!(Variation::from_name("Crosswords-17"), Some(Variation::Crosswords17));
    }
}
