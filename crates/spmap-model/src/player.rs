//! Players and the independent sentinel.

use std::fmt;

/// A player known to the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub player_id: i32,
    pub code_name: String,
    pub country: Option<String>,
    pub portrait: Option<String>,
}

/// Code name of the well-known "nobody owns this" player.
pub const INDEPENDENT_NAME: &str = "Independent";

impl Player {
    pub fn new(player_id: i32, code_name: impl Into<String>) -> Self {
        Self {
            player_id,
            code_name: code_name.into(),
            country: None,
            portrait: None,
        }
    }

    /// The sentinel player owning unclaimed fixtures.
    pub fn independent() -> Self {
        Self::new(-1, INDEPENDENT_NAME)
    }

    pub fn is_independent(&self) -> bool {
        self.code_name.eq_ignore_ascii_case(INDEPENDENT_NAME)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{} of {}", self.code_name, country),
            None => write!(f, "{}", self.code_name),
        }
    }
}
