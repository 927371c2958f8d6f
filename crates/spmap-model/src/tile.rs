//! Per-tile contents: terrain, rivers, roads, bookmarks, fixtures.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::{Fixture, ParseValueError};

/// Kinds of terrain a tile can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileType {
    Tundra,
    Desert,
    Ocean,
    Plains,
    Jungle,
    Steppe,
    Swamp,
}

const TILE_TYPES: &str = "tundra, desert, ocean, plains, jungle, steppe, swamp";

impl TileType {
    /// The token used in the XML `kind` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            TileType::Tundra => "tundra",
            TileType::Desert => "desert",
            TileType::Ocean => "ocean",
            TileType::Plains => "plains",
            TileType::Jungle => "jungle",
            TileType::Steppe => "steppe",
            TileType::Swamp => "swamp",
        }
    }
}

impl FromStr for TileType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tundra" => Ok(TileType::Tundra),
            "desert" => Ok(TileType::Desert),
            "ocean" => Ok(TileType::Ocean),
            "plains" => Ok(TileType::Plains),
            "jungle" => Ok(TileType::Jungle),
            "steppe" => Ok(TileType::Steppe),
            "swamp" => Ok(TileType::Swamp),
            _ => Err(ParseValueError::new("terrain kind", s, TILE_TYPES)),
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A river flowing through one edge of a tile, or a lake on it.
///
/// The `Ord` impl defines the serialization order: cardinal rivers first,
/// lake last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum River {
    North,
    South,
    East,
    West,
    Lake,
}

const RIVER_DIRECTIONS: &str = "north, south, east, west, lake";

impl River {
    pub fn as_str(self) -> &'static str {
        match self {
            River::North => "north",
            River::South => "south",
            River::East => "east",
            River::West => "west",
            River::Lake => "lake",
        }
    }
}

impl FromStr for River {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(River::North),
            "south" => Ok(River::South),
            "east" => Ok(River::East),
            "west" => Ok(River::West),
            "lake" => Ok(River::Lake),
            _ => Err(ParseValueError::new("river direction", s, RIVER_DIRECTIONS)),
        }
    }
}

/// A compass direction a road can leave a tile in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

const DIRECTIONS: &str =
    "north, northeast, east, southeast, south, southwest, west, northwest";

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "northeast" => Ok(Direction::Northeast),
            "east" => Ok(Direction::East),
            "southeast" => Ok(Direction::Southeast),
            "south" => Ok(Direction::South),
            "southwest" => Ok(Direction::Southwest),
            "west" => Ok(Direction::West),
            "northwest" => Ok(Direction::Northwest),
            _ => Err(ParseValueError::new("road direction", s, DIRECTIONS)),
        }
    }
}

/// Everything stored for one tile.
///
/// Tiles are sparse: a fully empty, unexplored tile has no record at all.
/// Ordered collections keep the writer's output deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileRecord {
    pub terrain: Option<TileType>,
    pub mountainous: bool,
    pub rivers: BTreeSet<River>,
    /// Road quality by outgoing direction.
    pub roads: BTreeMap<Direction, i32>,
    /// Player IDs that bookmarked this tile.
    pub bookmarks: BTreeSet<i32>,
    pub fixtures: Vec<Fixture>,
}

impl TileRecord {
    /// Whether the record carries no content and can be skipped on write.
    pub fn is_empty(&self) -> bool {
        self.terrain.is_none()
            && !self.mountainous
            && self.rivers.is_empty()
            && self.roads.is_empty()
            && self.bookmarks.is_empty()
            && self.fixtures.is_empty()
    }
}
