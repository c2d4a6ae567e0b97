//! Schedule entry update builder.

use serde::Serialize;
use tally_core::period::Period;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_target: Option<u32>,
}

impl ScheduleEntryUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.class_code.is_none()
            && self.class_name.is_none()
            && self.category.is_none()
            && self.warehouse.is_none()
            && self.period.is_none()
            && self.monthly_target.is_none()
    }

    /// Whether applying this update invalidates the derived fields.
    #[must_use]
    pub const fn changes_matching(&self) -> bool {
        self.class_code.is_some() || self.period.is_some() || self.monthly_target.is_some()
    }
}

pub struct ScheduleEntryUpdateBuilder(ScheduleEntryUpdate);

impl Default for ScheduleEntryUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleEntryUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ScheduleEntryUpdate::default())
    }

    #[must_use]
    pub fn class_code(mut self, val: impl Into<String>) -> Self {
        self.0.class_code = Some(val.into());
        self
    }

    #[must_use]
    pub fn class_name(mut self, val: impl Into<String>) -> Self {
        self.0.class_name = Some(val.into());
        self
    }

    #[must_use]
    pub fn category(mut self, val: impl Into<String>) -> Self {
        self.0.category = Some(val.into());
        self
    }

    #[must_use]
    pub fn warehouse(mut self, val: impl Into<String>) -> Self {
        self.0.warehouse = Some(val.into());
        self
    }

    #[must_use]
    pub const fn period(mut self, val: Period) -> Self {
        self.0.period = Some(val);
        self
    }

    #[must_use]
    pub const fn monthly_target(mut self, val: u32) -> Self {
        self.0.monthly_target = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> ScheduleEntryUpdate {
        self.0
    }
}
