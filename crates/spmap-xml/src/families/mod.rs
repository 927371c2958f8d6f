//! Per-family element readers and writers.
//!
//! Each submodule owns the tags of one fixture family: it validates the
//! tag and attribute set, consumes the element's whole subtree, and
//! returns a typed fixture. Writers mirror the readers, omitting
//! attributes whose value equals the read-side default.

pub mod community;
pub mod explorable;
pub mod mobile;
pub mod resource;
pub mod terrain;
pub mod towns;
pub mod unit;
