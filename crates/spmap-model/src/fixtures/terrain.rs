//! Terrain-feature fixtures: ground, forests, hills, oases.

use crate::Number;

/// The ground underlying a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Ground {
    pub id: i32,
    /// Kind of rock or soil, e.g. "sandstone".
    pub kind: String,
    /// Whether the ground is exposed rather than buried.
    pub exposed: bool,
    pub image: Option<String>,
}

/// A forest on a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    pub id: i32,
    /// Dominant tree kind.
    pub kind: String,
    /// Whether the trees grow in planted rows.
    pub rows: bool,
    /// Extent in acres; -1 when unrecorded.
    pub acres: Number,
    pub image: Option<String>,
}

/// A hill. Purely scenic; mountains are a tile flag instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Hill {
    pub id: i32,
    pub image: Option<String>,
}

/// An oasis.
#[derive(Debug, Clone, PartialEq)]
pub struct Oasis {
    pub id: i32,
    pub image: Option<String>,
}
