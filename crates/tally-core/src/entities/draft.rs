use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AuditLineItem, AuditRecord, SectorSummary};
use crate::enums::EntryType;

/// An audit record as entered, before the store assigns it an id.
///
/// See [`crate::validate::finalize_draft`] for the rules a draft must satisfy
/// to be saved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditDraft {
    pub date: NaiveDate,
    #[serde(default)]
    pub auditor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub entry_type: EntryType,
    #[serde(default)]
    pub uses_batches: bool,
    #[serde(default)]
    pub items: Vec<AuditLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_info: Option<SectorSummary>,
}

impl AuditDraft {
    /// An empty draft dated `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            auditor: String::new(),
            location: String::new(),
            entry_type: EntryType::Street,
            uses_batches: false,
            items: Vec::new(),
            sector_info: None,
        }
    }

    /// Attach the assigned id. Does not validate.
    #[must_use]
    pub fn into_record(self, id: String) -> AuditRecord {
        AuditRecord {
            id,
            date: self.date,
            auditor: self.auditor,
            location: self.location,
            entry_type: self.entry_type,
            uses_batches: self.uses_batches,
            items: self.items,
            sector_info: self.sector_info,
        }
    }
}

impl From<AuditRecord> for AuditDraft {
    fn from(record: AuditRecord) -> Self {
        Self {
            date: record.date,
            auditor: record.auditor,
            location: record.location,
            entry_type: record.entry_type,
            uses_batches: record.uses_batches,
            items: record.items,
            sector_info: record.sector_info,
        }
    }
}
