//! Grid coordinates
//!
//! Cells are addressed as `(x, y)` with `x` growing to the right and `y`
//! growing downward. `(-1, -1)` is reserved as the "not on the board" marker.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the grid, or the off-board sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Marker for entities that are not on the board (collected candies,
    /// anything before the first reset).
    pub const SENTINEL: Position = Position { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn is_sentinel(&self) -> bool {
        self.x == Self::SENTINEL.x && self.y == Self::SENTINEL.y
    }

    /// True if both coordinates lie in `[0, size - 1]`.
    pub const fn in_bounds(&self, size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }

    /// Translate by a delta without any bounds handling.
    pub const fn offset(&self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Clamp each axis independently into `[0, size - 1]`.
    pub fn clamped(&self, size: i32) -> Self {
        let max = (size - 1).max(0);
        Self {
            x: self.x.clamp(0, max),
            y: self.y.clamp(0, max),
        }
    }

    /// L1 (Manhattan) distance.
    pub const fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub const fn to_array(self) -> [i32; 2] {
        [self.x, self.y]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [i32; 2] {
    fn from(pos: Position) -> Self {
        pos.to_array()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel() {
        assert!(Position::SENTINEL.is_sentinel());
        assert!(!Position::new(0, 0).is_sentinel());
        assert!(!Position::SENTINEL.in_bounds(5));
    }

    #[test]
    fn test_clamped_per_axis() {
        assert_eq!(Position::new(-1, 2).clamped(5), Position::new(0, 2));
        assert_eq!(Position::new(5, 5).clamped(5), Position::new(4, 4));
        assert_eq!(Position::new(7, -3).clamped(1), Position::new(0, 0));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(0, 0).manhattan(&Position::new(4, 4)), 8);
        assert_eq!(Position::new(3, 1).manhattan(&Position::new(1, 2)), 3);
        assert_eq!(Position::new(2, 2).manhattan(&Position::new(2, 2)), 0);
    }

    #[test]
    fn test_conversions() {
        let pos: Position = (3, 0).into();
        assert_eq!(pos, Position::new(3, 0));
        let arr: [i32; 2] = pos.into();
        assert_eq!(arr, [3, 0]);
        assert_eq!(pos.to_string(), "(3, 0)");
    }
}
