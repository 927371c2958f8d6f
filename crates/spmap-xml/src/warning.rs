//! Recoverable anomalies and the pluggable warning policy.

use thiserror::Error;

use spmap_model::Point;

use crate::{Error, Result};

/// A recoverable anomaly found while reading.
///
/// Every one of these funnels through the single [`Warner`] owned by the
/// parse; the permissive policy records it and moves on, the strict policy
/// turns it into a hard failure.
#[derive(Debug, Clone, Error)]
pub enum Warning {
    /// An attribute is present but not recognized for this tag.
    #[error("line {line}: <{tag}> does not support attribute \"{attribute}\"")]
    UnsupportedProperty {
        tag: String,
        attribute: String,
        line: u64,
    },

    /// A legacy attribute name was used where a preferred one exists.
    #[error(
        "line {line}: <{tag}> attribute \"{deprecated}\" is deprecated, use \"{preferred}\""
    )]
    DeprecatedProperty {
        tag: String,
        deprecated: &'static str,
        preferred: &'static str,
        line: u64,
    },

    /// A fixture element carried no `id`; one was generated.
    #[error("line {line}: <{tag}> has no id, generated {generated}")]
    MissingId {
        tag: String,
        generated: i32,
        line: u64,
    },

    /// Two elements claimed the same ID; the later claimant was reassigned.
    #[error("id {requested} already in use, reassigned to {reassigned}")]
    DuplicateId { requested: i32, reassigned: i32 },

    /// The map `version` attribute is not the supported value.
    #[error("map version {found} not supported, treating as version {coerced}")]
    MapVersion { found: i32, coerced: i32 },

    /// A reserved forward-compatibility tag was skipped.
    #[error("line {line}: skipping <{tag}>, reserved for future use")]
    FutureTag { tag: String, line: u64 },

    /// The `view` wrapper named a current player the map never declared.
    #[error("current player {player} not found in map, leaving unset")]
    MissingCurrentPlayer { player: i32 },

    /// One tile holds two fortresses owned by the same player.
    #[error("tile {location} has multiple fortresses owned by player {owner}")]
    DuplicateFortress { owner: i32, location: Point },

    /// A tile was written without a terrain kind; historically legal.
    #[error("line {line}: tile {location} has no terrain kind")]
    MissingTerrain { location: Point, line: u64 },
}

/// The warning policy for one parse.
#[derive(Debug)]
pub enum Warner {
    /// Record every warning (and log it) and keep going.
    Permissive(Vec<Warning>),
    /// Escalate the first warning to a hard failure.
    Strict,
}

impl Warner {
    pub fn permissive() -> Self {
        Warner::Permissive(Vec::new())
    }

    pub fn strict() -> Self {
        Warner::Strict
    }

    /// Handle one anomaly according to the policy.
    pub fn handle(&mut self, warning: Warning) -> Result<()> {
        match self {
            Warner::Permissive(recorded) => {
                tracing::warn!("{warning}");
                recorded.push(warning);
                Ok(())
            }
            Warner::Strict => Err(Error::Strict(warning)),
        }
    }

    /// The warnings recorded so far (always empty under the strict policy).
    pub fn recorded(&self) -> &[Warning] {
        match self {
            Warner::Permissive(recorded) => recorded,
            Warner::Strict => &[],
        }
    }

    /// Consumes the policy, yielding the recorded warnings.
    pub fn into_recorded(self) -> Vec<Warning> {
        match self {
            Warner::Permissive(recorded) => recorded,
            Warner::Strict => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_records_and_continues() {
        let mut warner = Warner::permissive();
        warner
            .handle(Warning::MapVersion {
                found: 1,
                coerced: 2,
            })
            .unwrap();
        assert_eq!(warner.recorded().len(), 1);
    }

    #[test]
    fn strict_escalates() {
        let mut warner = Warner::strict();
        let result = warner.handle(Warning::MapVersion {
            found: 1,
            coerced: 2,
        });
        assert!(matches!(result, Err(Error::Strict(_))));
    }
}
