//! # tally-core
//!
//! Core types and pure computations for Tally.
//!
//! This crate provides the foundational types shared across all Tally crates:
//! - Entity structs for audit records, line items, sector summaries, and
//!   schedule entries
//! - Entry type, schedule status, and accuracy band enums
//! - Lenient numeric deserialization for hand-edited or legacy collections
//! - The summary aggregator and dashboard report builders
//! - The schedule matcher with its deterministic class attribution
//! - The class catalog (built-in dictionary + external overlay)
//! - ID generation and draft validation
//!
//! Nothing here touches storage. Every function takes the full record list and
//! recomputes derived values from scratch.

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod lenient;
pub mod period;
pub mod report;
pub mod schedule;
pub mod summary;
pub mod validate;
