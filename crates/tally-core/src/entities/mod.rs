//! Entity structs for the Tally domain.
//!
//! Each entity is stored as an element of a JSON array under a fixed key (see
//! `tally-store`). Field names serialize as `camelCase` so that collections
//! written by earlier clients read back unchanged. All structs derive
//! `JsonSchema` for schema validation in tests.

mod audit;
mod class_info;
mod draft;
mod schedule;

pub use audit::{AuditLineItem, AuditRecord, SectorSummary};
pub use class_info::ClassInfo;
pub use draft::AuditDraft;
pub use schedule::{NewScheduleEntry, ScheduleEntry};

/// Anything stored in a collection that is addressed by a string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for AuditRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ScheduleEntry {
    fn id(&self) -> &str {
        &self.id
    }
}
