//! Domain operations on `TallyService`.
//!
//! Each module adds methods to `TallyService` via `impl TallyService` blocks.

pub mod audit;
pub mod report;
pub mod schedule;
