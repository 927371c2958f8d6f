//! Settlements: towns, cities, fortifications, villages, fortresses, and
//! the community-statistics aggregate.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::fixtures::resource::ResourcePile;
use crate::{FortressMember, ParseValueError};

/// Whether a settlement still functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TownStatus {
    Active,
    Abandoned,
    Burned,
    Ruined,
}

const TOWN_STATUSES: &str = "active, abandoned, burned, ruined";

impl TownStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TownStatus::Active => "active",
            TownStatus::Abandoned => "abandoned",
            TownStatus::Burned => "burned",
            TownStatus::Ruined => "ruined",
        }
    }
}

impl FromStr for TownStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TownStatus::Active),
            "abandoned" => Ok(TownStatus::Abandoned),
            "burned" => Ok(TownStatus::Burned),
            "ruined" => Ok(TownStatus::Ruined),
            _ => Err(ParseValueError::new("town status", s, TOWN_STATUSES)),
        }
    }
}

impl fmt::Display for TownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough scale of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TownSize {
    Small,
    Medium,
    Large,
}

const TOWN_SIZES: &str = "small, medium, large";

impl TownSize {
    pub fn as_str(self) -> &'static str {
        match self {
            TownSize::Small => "small",
            TownSize::Medium => "medium",
            TownSize::Large => "large",
        }
    }
}

impl FromStr for TownSize {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(TownSize::Small),
            "medium" => Ok(TownSize::Medium),
            "large" => Ok(TownSize::Large),
            _ => Err(ParseValueError::new("town size", s, TOWN_SIZES)),
        }
    }
}

impl fmt::Display for TownSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag spelling of an abstract town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TownKind {
    Town,
    City,
    Fortification,
}

impl TownKind {
    pub fn tag(self) -> &'static str {
        match self {
            TownKind::Town => "town",
            TownKind::City => "city",
            TownKind::Fortification => "fortification",
        }
    }
}

/// Population statistics for a settlement.
///
/// Worked-field claims reference resource-pile IDs by number; the
/// references are soft and never validated at parse time, since existing
/// documents rely on forward references that only resolve after the whole
/// map is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityStats {
    pub population: i32,
    /// Highest expertise level per skill name.
    pub expertise: BTreeMap<String, i32>,
    /// Resource-pile IDs of fields this community works (soft references).
    pub worked_fields: Vec<i32>,
    pub yearly_production: Vec<ResourcePile>,
    pub yearly_consumption: Vec<ResourcePile>,
}

impl CommunityStats {
    pub fn new(population: i32) -> Self {
        Self {
            population,
            ..Self::default()
        }
    }
}

/// A town, city, or fortification.
#[derive(Debug, Clone, PartialEq)]
pub struct Town {
    pub id: i32,
    pub kind: TownKind,
    pub status: TownStatus,
    pub size: TownSize,
    /// Empty when the settlement is unnamed.
    pub name: String,
    /// Difficulty check to spot the settlement.
    pub dc: i32,
    /// Owning player; -1 for independent.
    pub owner: i32,
    pub population: Option<CommunityStats>,
    pub image: Option<String>,
    pub portrait: Option<String>,
}

/// A village.
#[derive(Debug, Clone, PartialEq)]
pub struct Village {
    pub id: i32,
    pub status: TownStatus,
    pub name: String,
    pub race: String,
    pub owner: i32,
    pub population: Option<CommunityStats>,
    pub image: Option<String>,
    pub portrait: Option<String>,
}

impl Village {
    pub const DEFAULT_RACE: &'static str = "human";
}

/// A player-built fortress containing units and supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct Fortress {
    pub id: i32,
    pub owner: i32,
    pub name: String,
    pub size: TownSize,
    pub members: Vec<FortressMember>,
    pub image: Option<String>,
    pub portrait: Option<String>,
}
