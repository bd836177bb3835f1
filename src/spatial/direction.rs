//! The eight slide directions and their compass geometry

use std::fmt;
use std::str::FromStr;

use crate::io::error::{GameError, invalid_parameter};
use crate::math::geometry::{angular_distance, bearing_degrees};
use crate::spatial::Position;

/// Compass direction of a slide
///
/// Each direction carries a fixed angle in degrees, counter-clockwise from
/// "right", used to rank directions by closeness to a bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 0 degrees
    Right,
    /// 45 degrees
    UpRight,
    /// 90 degrees
    Up,
    /// 135 degrees
    UpLeft,
    /// 180 degrees
    Left,
    /// 225 degrees
    DownLeft,
    /// 270 degrees
    Down,
    /// 315 degrees
    DownRight,
}

impl Direction {
    /// All directions in the order slides are explored when no bearing applies
    pub const ALL: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Right,
        Self::Left,
        Self::UpRight,
        Self::DownRight,
        Self::DownLeft,
        Self::UpLeft,
    ];

    /// Angle of this direction in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Right => 0,
            Self::UpRight => 45,
            Self::Up => 90,
            Self::UpLeft => 135,
            Self::Left => 180,
            Self::DownLeft => 225,
            Self::Down => 270,
            Self::DownRight => 315,
        }
    }

    /// Row and column deltas of a single step
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Right => (0, 1),
            Self::UpRight => (-1, 1),
            Self::Up => (-1, 0),
            Self::UpLeft => (-1, -1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }

    /// Lower-case hyphenated name, also accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::UpRight => "up-right",
            Self::Up => "up",
            Self::UpLeft => "up-left",
            Self::Left => "left",
            Self::DownLeft => "down-left",
            Self::Down => "down",
            Self::DownRight => "down-right",
        }
    }

    /// All directions sorted by angular closeness to the bearing `from -> to`
    ///
    /// Ties keep the order of [`Direction::ALL`].
    pub fn ordered_toward(from: Position, to: Position) -> [Self; 8] {
        let bearing = bearing_degrees(from, to);
        let mut directions = Self::ALL;
        directions.sort_by(|a, b| {
            angular_distance(bearing, f64::from(a.degrees()))
                .total_cmp(&angular_distance(bearing, f64::from(b.degrees())))
        });
        directions
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "right" | "r" | "e" => Ok(Self::Right),
            "up-right" | "ur" | "ne" => Ok(Self::UpRight),
            "up" | "u" | "n" => Ok(Self::Up),
            "up-left" | "ul" | "nw" => Ok(Self::UpLeft),
            "left" | "l" | "w" => Ok(Self::Left),
            "down-left" | "dl" | "sw" => Ok(Self::DownLeft),
            "down" | "d" | "s" => Ok(Self::Down),
            "down-right" | "dr" | "se" => Ok(Self::DownRight),
            _ => Err(invalid_parameter(
                "direction",
                &s,
                &"expected one of up, down, left, right, up-left, up-right, down-left, down-right",
            )),
        }
    }
}
