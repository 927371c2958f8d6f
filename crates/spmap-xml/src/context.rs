//! Per-parse shared state.

use crate::{IdRegistry, Warner};

/// State threaded through every element reader during one parse.
///
/// Passed explicitly rather than held in any ambient global, so parsing
/// independent documents in parallel is trivially safe.
#[derive(Debug)]
pub struct ParseContext {
    pub warner: Warner,
    pub ids: IdRegistry,
    /// Current game turn from the `view` wrapper; -1 until one is seen.
    pub current_turn: i32,
}

impl ParseContext {
    pub fn new(warner: Warner) -> Self {
        Self {
            warner,
            ids: IdRegistry::new(),
            current_turn: -1,
        }
    }

    pub fn permissive() -> Self {
        Self::new(Warner::permissive())
    }

    pub fn strict() -> Self {
        Self::new(Warner::strict())
    }
}
