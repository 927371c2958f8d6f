//! Units and their members.

use std::collections::BTreeMap;

use crate::UnitMember;

/// A mobile group of workers, animals, and equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i32,
    pub owner: i32,
    /// Role of the unit, e.g. "scouts".
    pub kind: String,
    /// Empty when unnamed.
    pub name: String,
    pub members: Vec<UnitMember>,
    /// Orders text keyed by turn number.
    pub orders: BTreeMap<i32, String>,
    /// Results text keyed by turn number.
    pub results: BTreeMap<i32, String>,
    pub image: Option<String>,
    pub portrait: Option<String>,
}

impl Unit {
    pub fn new(id: i32, owner: i32, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            kind: kind.into(),
            name: name.into(),
            members: Vec::new(),
            orders: BTreeMap::new(),
            results: BTreeMap::new(),
            image: None,
            portrait: None,
        }
    }
}

/// A named skill within a job.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    pub level: i32,
    /// Hours of practice toward the next level.
    pub hours: i32,
}

/// A job a worker has trained in.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub name: String,
    pub level: i32,
    pub skills: Vec<Skill>,
}

/// Physical statistics of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

/// An individual worker in a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub id: i32,
    pub name: String,
    pub race: String,
    pub jobs: Vec<Job>,
    pub stats: Option<WorkerStats>,
    /// Per-player notes about this worker.
    pub notes: Vec<(i32, String)>,
    pub image: Option<String>,
    pub portrait: Option<String>,
}

impl Worker {
    pub const DEFAULT_RACE: &'static str = "human";

    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            race: Self::DEFAULT_RACE.to_owned(),
            jobs: Vec::new(),
            stats: None,
            notes: Vec::new(),
            image: None,
            portrait: None,
        }
    }
}
