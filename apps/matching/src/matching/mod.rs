//! Skill matching: scoring and reconciliation of persisted job matches.

pub mod locks;
pub mod recalculate;
pub mod scoring;
