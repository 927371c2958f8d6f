//! spmap - strategy-game world-map persistence library.
//!
//! This crate provides a unified interface to the spmap crate family for
//! reading and writing versioned world-map XML files.
//!
//! # Crates
//!
//! - [`spmap_model`] - The in-memory map document: tiles, players, fixtures
//! - [`spmap_xml`] - The streaming XML reader/writer framework
//!
//! # Example
//!
//! ```no_run
//! use spmap::prelude::*;
//!
//! let (map, warnings) = spmap::read_map_file("world.map")?;
//! for warning in &warnings {
//!     eprintln!("warning: {warning}");
//! }
//! println!("{} x {}", map.dimensions.rows, map.dimensions.columns);
//! spmap::write_map_file("world.out.map", &map)?;
//! # Ok::<(), spmap::Error>(())
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// Re-export the sub-crates
pub use spmap_model as model;
pub use spmap_xml as xml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use spmap_model::{
        Fixture, MapDimensions, MapDocument, Player, Point, TileRecord, TileType,
    };
    pub use spmap_xml::{read_map, write_map, Warner, Warning};
}

// Re-export commonly used types at the crate root
pub use spmap_model::{MapDocument, Point};
pub use spmap_xml::{read_map, write_map, Error, Result, Warner, Warning};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads a map file under the permissive warning policy.
pub fn read_map_file(path: impl AsRef<Path>) -> Result<(MapDocument, Vec<Warning>)> {
    let file = File::open(path)?;
    read_map(BufReader::new(file), Warner::permissive())
}

/// Reads a map file under the strict warning policy; any recoverable
/// anomaly fails the read.
pub fn read_map_file_strict(path: impl AsRef<Path>) -> Result<MapDocument> {
    let file = File::open(path)?;
    let (map, _) = read_map(BufReader::new(file), Warner::strict())?;
    Ok(map)
}

/// Writes a map document to a file in canonical form.
pub fn write_map_file(path: impl AsRef<Path>, map: &MapDocument) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_map(&mut writer, map)?;
    writer.flush()?;
    Ok(())
}
