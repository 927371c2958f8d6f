//! Explorables and annotations: text notes, adventure hooks, portals,
//! caves, battlefields.

use crate::Point;

/// A free-form note pinned to a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNote {
    pub id: i32,
    pub text: String,
    /// Turn the note refers to; -1 when no turn was recorded.
    pub turn: i32,
    pub image: Option<String>,
}

/// An adventure hook.
#[derive(Debug, Clone, PartialEq)]
pub struct Adventure {
    pub id: i32,
    /// One-line summary.
    pub brief: String,
    /// Full description.
    pub full: String,
    /// Owning player; -1 when unclaimed.
    pub owner: i32,
    pub image: Option<String>,
}

/// A portal to another world.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub id: i32,
    pub destination_world: String,
    /// Destination coordinates; may be the off-grid sentinel when unknown.
    pub destination: Point,
    pub image: Option<String>,
}

/// A cave system. `dc` is the difficulty check to notice it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cave {
    pub id: i32,
    pub dc: i32,
    pub image: Option<String>,
}

/// Remnants of an old battle. `dc` as for [`Cave`].
#[derive(Debug, Clone, PartialEq)]
pub struct Battlefield {
    pub id: i32,
    pub dc: i32,
    pub image: Option<String>,
}
