//! Movement alphabet for the grid chase
//!
//! Four cardinal moves plus `Stay`. The rotation helpers are only defined
//! for cardinal directions and return `None` for `Stay`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ChaseError;
use crate::core::types::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
    #[default]
    #[serde(rename = "X")]
    Stay,
}

impl Direction {
    /// Cardinal directions in clockwise order starting at North
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn is_movement(&self) -> bool {
        !matches!(self, Direction::Stay)
    }

    pub fn opposite(&self) -> Option<Self> {
        match self {
            Direction::North => Some(Direction::South),
            Direction::East => Some(Direction::West),
            Direction::South => Some(Direction::North),
            Direction::West => Some(Direction::East),
            Direction::Stay => None,
        }
    }

    /// Next direction turning right
    pub fn clockwise(&self) -> Option<Self> {
        match self {
            Direction::North => Some(Direction::East),
            Direction::East => Some(Direction::South),
            Direction::South => Some(Direction::West),
            Direction::West => Some(Direction::North),
            Direction::Stay => None,
        }
    }

    /// Next direction turning left
    pub fn counter_clockwise(&self) -> Option<Self> {
        match self {
            Direction::North => Some(Direction::West),
            Direction::West => Some(Direction::South),
            Direction::South => Some(Direction::East),
            Direction::East => Some(Direction::North),
            Direction::Stay => None,
        }
    }

    /// Grid displacement of this move (y grows southward)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::Stay => (0, 0),
        }
    }

    /// Position reached by taking this move from `from`
    pub fn step(&self, from: Position) -> Position {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }

    /// Single-letter wire symbol
    pub fn symbol(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
            Direction::Stay => 'X',
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
            Direction::Stay => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Direction {
    type Err = ChaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Direction::North),
            "E" => Ok(Direction::East),
            "S" => Ok(Direction::South),
            "W" => Ok(Direction::West),
            "X" => Ok(Direction::Stay),
            other => Err(ChaseError::InvalidSnapshot(format!(
                "unknown direction symbol '{}'",
                other
            ))),
        }
    }
}

/// Set of cardinal directions
///
/// Iteration always follows `Direction::CARDINALS` order, independent of
/// insertion order, so index-based random picks are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Direction::CARDINALS.into_iter().collect()
    }

    /// `Stay` is not a member of any set and is ignored
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn remove(&mut self, dir: Direction) {
        self.0 &= !dir.bit();
    }

    pub fn without(mut self, dir: Direction) -> Self {
        self.remove(dir);
        self
    }

    pub fn contains(&self, dir: Direction) -> bool {
        dir.is_movement() && self.0 & dir.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::CARDINALS
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }

    /// The `index`-th member in canonical order
    pub fn nth(&self, index: usize) -> Option<Direction> {
        self.iter().nth(index)
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::empty();
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, dir) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", dir)?;
        }
        f.write_str("}")
    }
}
