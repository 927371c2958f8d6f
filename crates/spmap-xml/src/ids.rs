//! Document-wide fixture ID tracking.

use rustc_hash::FxHashSet;

use crate::{Result, Warner, Warning};

/// Tracks every numeric ID claimed during one parse (or by one freshly
/// constructed document) and hands out fresh ones.
///
/// One registry per single-threaded parse; never shared.
#[derive(Debug, Default)]
pub struct IdRegistry {
    used: FxHashSet<i32>,
    /// Cursor below which every non-negative ID is known used.
    cursor: i32,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims an explicitly requested ID.
    ///
    /// If the ID is already used the duplicate is never silently accepted:
    /// a warning is issued and a freshly generated ID returned instead.
    pub fn register(&mut self, candidate: i32, warner: &mut Warner) -> Result<i32> {
        if self.used.insert(candidate) {
            return Ok(candidate);
        }
        let reassigned = self.create();
        warner.handle(Warning::DuplicateId {
            requested: candidate,
            reassigned,
        })?;
        Ok(reassigned)
    }

    /// Returns the smallest unused non-negative ID and marks it used.
    pub fn create(&mut self) -> i32 {
        while self.used.contains(&self.cursor) {
            self.cursor += 1;
        }
        self.used.insert(self.cursor);
        self.cursor
    }

    pub fn is_used(&self, id: i32) -> bool {
        self.used.contains(&id)
    }
}
