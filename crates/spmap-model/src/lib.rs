//! In-memory model of a strategy-game world map.
//!
//! This crate holds the pure data types that the XML layer reads and
//! writes: the sparse tile grid, the player roster, and the closed
//! [`Fixture`] sum type covering everything that can sit on (or off) the
//! map. Nothing here knows about XML; `spmap-xml` owns serialization.
//!
//! # Example
//!
//! ```
//! use spmap_model::{MapDocument, MapDimensions, Point, TileType};
//!
//! let mut map = MapDocument::new(MapDimensions::new(2, 2));
//! map.tile_mut(Point::new(0, 1)).terrain = Some(TileType::Plains);
//! assert_eq!(map.tile(Point::new(0, 1)).unwrap().terrain, Some(TileType::Plains));
//! ```

mod error;
mod map;
mod number;
mod player;
mod point;
mod tile;

pub mod fixtures;

pub use error::ParseValueError;
pub use fixtures::{Fixture, FortressMember, UnitMember};
pub use map::{MapDimensions, MapDocument, PlayerCollection, SUPPORTED_MAP_VERSION};
pub use number::Number;
pub use player::Player;
pub use point::Point;
pub use tile::{Direction, River, TileRecord, TileType};
