//! Harvestable and quantified resources.

use std::fmt;
use std::str::FromStr;

use crate::{Number, ParseValueError};

/// A pile of some resource, either placed on the map, carried by a unit,
/// or listed in a community's production/consumption tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePile {
    pub id: i32,
    /// General category, e.g. "food".
    pub kind: String,
    /// Specific contents, e.g. "wheat".
    pub contents: String,
    pub quantity: Number,
    /// Unit of measure; empty when unitless.
    pub units: String,
    /// Turn the pile was created; -1 when unrecorded.
    pub created: i32,
    pub image: Option<String>,
}

/// A hidden supply cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    pub id: i32,
    pub kind: String,
    pub contents: String,
    pub image: Option<String>,
}

/// A piece of equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Implement {
    pub id: i32,
    pub kind: String,
    /// How many; at least 1.
    pub count: i32,
    pub image: Option<String>,
}

/// A grove or orchard (orchards are the cultivated-fruit spelling).
#[derive(Debug, Clone, PartialEq)]
pub struct Grove {
    pub id: i32,
    /// True when written with the `orchard` tag.
    pub orchard: bool,
    pub kind: String,
    pub cultivated: bool,
    /// Tree count; -1 when unrecorded.
    pub count: i32,
    pub image: Option<String>,
}

/// Growth stage of a meadow or field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldStatus {
    Fallow,
    Seeding,
    Growing,
    Bearing,
}

const FIELD_STATUSES: &str = "fallow, seeding, growing, bearing";

impl FieldStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldStatus::Fallow => "fallow",
            FieldStatus::Seeding => "seeding",
            FieldStatus::Growing => "growing",
            FieldStatus::Bearing => "bearing",
        }
    }
}

impl FromStr for FieldStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fallow" => Ok(FieldStatus::Fallow),
            "seeding" => Ok(FieldStatus::Seeding),
            "growing" => Ok(FieldStatus::Growing),
            "bearing" => Ok(FieldStatus::Bearing),
            _ => Err(ParseValueError::new("field status", s, FIELD_STATUSES)),
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A meadow or cultivated field.
#[derive(Debug, Clone, PartialEq)]
pub struct Meadow {
    pub id: i32,
    /// True when written with the `field` tag.
    pub field: bool,
    pub kind: String,
    pub cultivated: bool,
    pub status: FieldStatus,
    /// Extent in acres; -1 when unrecorded.
    pub acres: Number,
    pub image: Option<String>,
}

/// A mine working some mineral.
#[derive(Debug, Clone, PartialEq)]
pub struct Mine {
    pub id: i32,
    pub kind: String,
    pub status: crate::fixtures::towns::TownStatus,
    pub image: Option<String>,
}

/// A mineral vein.
#[derive(Debug, Clone, PartialEq)]
pub struct MineralVein {
    pub id: i32,
    pub kind: String,
    pub exposed: bool,
    pub dc: i32,
    pub image: Option<String>,
}

/// A patch of shrubs.
#[derive(Debug, Clone, PartialEq)]
pub struct Shrub {
    pub id: i32,
    pub kind: String,
    /// Count; -1 when unrecorded.
    pub count: i32,
    pub image: Option<String>,
}

/// An exposed stone deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct StoneDeposit {
    pub id: i32,
    pub kind: String,
    pub dc: i32,
    pub image: Option<String>,
}
