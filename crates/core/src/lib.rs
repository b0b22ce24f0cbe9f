//! Pure domain logic for the fasting tracker.
//!
//! No I/O lives here: the challenge and score engines operate on plain
//! in-memory session records, and everything is deterministic for a fixed
//! input and reference date.

pub mod challenges;
pub mod error;
pub mod fasting;
pub mod profile;
pub mod score;
pub mod types;
