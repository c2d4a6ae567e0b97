use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ScheduleStatus;
use crate::lenient;
use crate::period::Period;

const fn default_monthly_target() -> u32 {
    1
}

/// A tracked class expected to be audited in a given month.
///
/// `completed`, `last_audit_date`, `audit_count`, and `status` are derived by
/// the schedule matcher and overwritten on every refresh; never trust them
/// without recomputing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: String,
    pub class_code: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub warehouse: String,
    pub month: u32,
    pub year: i32,
    /// Matching audits needed in the month for `completed`.
    #[serde(
        default = "default_monthly_target",
        deserialize_with = "lenient::count"
    )]
    #[schemars(with = "u32")]
    pub monthly_target: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_audit_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub audit_count: u32,
    #[serde(default)]
    pub status: ScheduleStatus,
}

impl ScheduleEntry {
    /// The entry's target period, if its month/year are valid.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        Period::new(self.month, self.year).ok()
    }

    /// Target clamped to at least one audit.
    #[must_use]
    pub fn effective_target(&self) -> u32 {
        self.monthly_target.max(1)
    }
}

/// Input for creating a schedule entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEntry {
    pub class_code: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub warehouse: String,
    pub period: Period,
    #[serde(default = "default_monthly_target")]
    pub monthly_target: u32,
}

impl NewScheduleEntry {
    /// Build the stored entry with derived fields reset.
    #[must_use]
    pub fn into_entry(self, id: String) -> ScheduleEntry {
        ScheduleEntry {
            id,
            class_code: self.class_code,
            class_name: self.class_name,
            category: self.category,
            warehouse: self.warehouse,
            month: self.period.month,
            year: self.period.year,
            monthly_target: self.monthly_target.max(1),
            completed: false,
            last_audit_date: None,
            audit_count: 0,
            status: ScheduleStatus::Pending,
        }
    }
}
