//! Grid locations.

use std::fmt;

/// A location on the map grid, row-major.
///
/// The reserved [`Point::INVALID`] sentinel marks fixtures that are not
/// placed on the visible grid (the "elsewhere" bucket). A fixture is
/// associated with exactly one location: a real grid point or the
/// sentinel, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: i32,
    pub column: i32,
}

impl Point {
    /// The off-grid sentinel.
    pub const INVALID: Point = Point { row: -1, column: -1 };

    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Whether this is a real grid location rather than the sentinel.
    pub fn is_valid(self) -> bool {
        self.row >= 0 && self.column >= 0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
