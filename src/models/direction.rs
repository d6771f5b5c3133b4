use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// The side of the intersection a vehicle arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Position in [`Direction::ALL`]; used to index per-direction tables.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn group(self) -> LightGroup {
        match self {
            Direction::North | Direction::South => LightGroup::NorthSouth,
            Direction::East | Direction::West => LightGroup::EastWest,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Side a vehicle leaves through after turning to its own left.
    pub fn left_of(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Unit vector from the intersection centre towards this side, in
    /// canvas coordinates (y grows downwards).
    pub fn offset(self) -> (f64, f64) {
        match self {
            Direction::North => (0.0, -1.0),
            Direction::South => (0.0, 1.0),
            Direction::East => (1.0, 0.0),
            Direction::West => (-1.0, 0.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "NORTH",
            Direction::South => "SOUTH",
            Direction::East => "EAST",
            Direction::West => "WEST",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORTH" | "N" => Ok(Direction::North),
            "SOUTH" | "S" => Ok(Direction::South),
            "EAST" | "E" => Ok(Direction::East),
            "WEST" | "W" => Ok(Direction::West),
            _ => Err(SimError::UnknownDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    Straight,
    Left,
    Right,
}

impl MovementType {
    pub const ALL: [MovementType; 3] = [
        MovementType::Straight,
        MovementType::Left,
        MovementType::Right,
    ];

    pub fn index(self) -> usize {
        match self {
            MovementType::Straight => 0,
            MovementType::Left => 1,
            MovementType::Right => 2,
        }
    }

    /// Side of the intersection a vehicle arriving from `from` leaves through.
    pub fn exit_side(self, from: Direction) -> Direction {
        match self {
            MovementType::Straight => from.opposite(),
            MovementType::Left => from.left_of(),
            MovementType::Right => from.left_of().opposite(),
        }
    }

    pub fn is_turn(self) -> bool {
        self != MovementType::Straight
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            MovementType::Straight => "STRAIGHT",
            MovementType::Left => "LEFT",
            MovementType::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

impl FromStr for MovementType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRAIGHT" | "S" => Ok(MovementType::Straight),
            "LEFT" | "L" => Ok(MovementType::Left),
            "RIGHT" | "R" => Ok(MovementType::Right),
            _ => Err(SimError::UnknownMovement(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightPhase {
    Red,
    Yellow,
    Green,
}

/// The two signal groups that alternate right of way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightGroup {
    NorthSouth,
    EastWest,
}

impl LightGroup {
    pub fn directions(self) -> [Direction; 2] {
        match self {
            LightGroup::NorthSouth => [Direction::North, Direction::South],
            LightGroup::EastWest => [Direction::East, Direction::West],
        }
    }

    pub fn other(self) -> LightGroup {
        match self {
            LightGroup::NorthSouth => LightGroup::EastWest,
            LightGroup::EastWest => LightGroup::NorthSouth,
        }
    }
}
