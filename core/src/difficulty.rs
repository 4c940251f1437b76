use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Size of the expert board, the only shape that gets a guaranteed eight-mine cluster.
pub const HARD_SIZE: Coord2 = (16, 30);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Easy => BoardConfig::new_unchecked(9, 9, 10),
            Medium => BoardConfig::new_unchecked(16, 16, 40),
            Hard => BoardConfig::new_unchecked(HARD_SIZE.0, HARD_SIZE.1, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
        }
    }

    /// Key under which the best completion time for this difficulty is stored.
    pub fn best_time_key(self) -> String {
        alloc::format!("minesweeper-best-{}", self.name())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_classic_sizes() {
        assert_eq!(Difficulty::Easy.config(), BoardConfig::new(9, 9, 10).unwrap());
        assert_eq!(Difficulty::Medium.config(), BoardConfig::new(16, 16, 40).unwrap());
        assert_eq!(Difficulty::Hard.config(), BoardConfig::new(16, 30, 99).unwrap());
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("expert".parse::<Difficulty>(), Err(GameError::UnknownDifficulty));
    }

    #[test]
    fn best_time_key_uses_lowercase_name() {
        assert_eq!(Difficulty::Medium.best_time_key(), "minesweeper-best-medium");
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }
}
