//! The whole-map document.

use std::collections::BTreeMap;

use crate::{Fixture, Player, Point, TileRecord};

/// The only map format version this build understands natively.
pub const SUPPORTED_MAP_VERSION: i32 = 2;

/// Grid size and format version.
///
/// `version` is always [`SUPPORTED_MAP_VERSION`] in memory; the reader
/// coerces anything else with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapDimensions {
    pub rows: i32,
    pub columns: i32,
    pub version: i32,
}

impl MapDimensions {
    pub fn new(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            version: SUPPORTED_MAP_VERSION,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row >= 0 && point.row < self.rows && point.column >= 0 && point.column < self.columns
    }
}

/// The players known to a map, plus which one is current.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerCollection {
    players: BTreeMap<i32, Player>,
    current: Option<i32>,
}

impl PlayerCollection {
    pub fn add(&mut self, player: Player) {
        self.players.insert(player.player_id, player);
    }

    pub fn get(&self, player_id: i32) -> Option<&Player> {
        self.players.get(&player_id)
    }

    pub fn contains(&self, player_id: i32) -> bool {
        self.players.contains_key(&player_id)
    }

    /// Players in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn current(&self) -> Option<&Player> {
        self.current.and_then(|id| self.players.get(&id))
    }

    pub fn current_id(&self) -> Option<i32> {
        self.current
    }

    /// Marks a player as current; `None` clears the marker.
    pub fn set_current(&mut self, player_id: Option<i32>) {
        self.current = player_id;
    }
}

/// A full world map: dimensions, players, the sparse tile grid, and the
/// off-grid "elsewhere" fixtures.
///
/// Built in one streaming pass by the reader; the application mutates it
/// only through the narrow accessors here (e.g. fetching a unit to set
/// orders on).
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub dimensions: MapDimensions,
    pub players: PlayerCollection,
    tiles: BTreeMap<Point, TileRecord>,
    /// Fixtures at the off-grid sentinel location.
    pub elsewhere: Vec<Fixture>,
    /// Current game turn; -1 when no turn has been recorded.
    pub current_turn: i32,
}

impl MapDocument {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            players: PlayerCollection::default(),
            tiles: BTreeMap::new(),
            elsewhere: Vec::new(),
            current_turn: -1,
        }
    }

    /// The record for a tile, if it has any content.
    pub fn tile(&self, point: Point) -> Option<&TileRecord> {
        self.tiles.get(&point)
    }

    /// The record for a tile, created empty on first touch.
    pub fn tile_mut(&mut self, point: Point) -> &mut TileRecord {
        self.tiles.entry(point).or_default()
    }

    /// Non-empty tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Point, &TileRecord)> {
        self.tiles
            .iter()
            .filter(|(_, record)| !record.is_empty())
            .map(|(&point, record)| (point, record))
    }

    /// Total number of fixtures on the grid and elsewhere.
    pub fn fixture_count(&self) -> usize {
        self.tiles.values().map(|t| t.fixtures.len()).sum::<usize>() + self.elsewhere.len()
    }
}
