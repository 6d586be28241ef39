//! Travel direction of a line.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown direction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?} (expected directionA or directionB)")]
pub struct ParseDirectionError(String);

/// One of the two directions a line runs in.
///
/// Timetable data stores per-direction times as a two-element array, so
/// `A` is index 0 and `B` is index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "directionA")]
    A,
    #[serde(rename = "directionB")]
    B,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::A, Direction::B];

    /// Index into a per-direction pair.
    pub fn index(&self) -> usize {
        match self {
            Direction::A => 0,
            Direction::B => 1,
        }
    }

    /// The opposite direction.
    pub fn other(&self) -> Self {
        match self {
            Direction::A => Direction::B,
            Direction::B => Direction::A,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::A => "directionA",
            Direction::B => "directionB",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts `directionA`/`directionB`, `a`/`b` or the index `0`/`1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "directiona" | "a" | "0" => Ok(Direction::A),
            "directionb" | "b" | "1" => Ok(Direction::B),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_other() {
        assert_eq!(Direction::A.index(), 0);
        assert_eq!(Direction::B.index(), 1);
        assert_eq!(Direction::A.other(), Direction::B);
        assert_eq!(Direction::B.other().other(), Direction::B);
    }

    #[test]
    fn parse_accepted_forms() {
        for s in ["directionA", "a", "A", "0"] {
            assert_eq!(s.parse::<Direction>().unwrap(), Direction::A, "{s}");
        }
        for s in ["directionB", "b", "DIRECTIONB", "1"] {
            assert_eq!(s.parse::<Direction>().unwrap(), Direction::B, "{s}");
        }
        assert!("north".parse::<Direction>().is_err());
        assert!("2".parse::<Direction>().is_err());
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Direction::B).unwrap(), "\"directionB\"");
        let d: Direction = serde_json::from_str("\"directionA\"").unwrap();
        assert_eq!(d, Direction::A);
    }
}
