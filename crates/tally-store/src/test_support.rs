//! Shared test utilities for tally-store unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use tally_core::entities::{AuditDraft, AuditLineItem, NewScheduleEntry};
    use tally_core::enums::EntryType;
    use tally_core::period::Period;

    use crate::service::TallyService;

    /// Memory-backed service with the built-in catalog.
    pub fn test_service() -> TallyService {
        TallyService::in_memory()
    }

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Street audit with a single line item.
    pub fn draft_at(day: &str, location: &str, expected: u32, actual: u32) -> AuditDraft {
        let mut draft = AuditDraft::new(date(day));
        draft.auditor = "QA".into();
        draft.location = location.into();
        draft.entry_type = EntryType::Street;
        draft.items = vec![AuditLineItem {
            product_code: "P-1".into(),
            product_name: "Parafuso".into(),
            expected_quantity: expected,
            actual_quantity: actual,
            ..AuditLineItem::default()
        }];
        draft
    }

    /// Class audit with one item carrying `code` and `name`.
    pub fn class_draft(day: &str, code: &str, name: &str) -> AuditDraft {
        let mut draft = AuditDraft::new(date(day));
        draft.location = "Galpão 02".into();
        draft.entry_type = EntryType::Class;
        draft.items = vec![AuditLineItem {
            product_code: code.into(),
            product_name: name.into(),
            expected_quantity: 10,
            actual_quantity: 10,
            ..AuditLineItem::default()
        }];
        draft
    }

    pub fn new_entry(code: &str, month: u32, year: i32) -> NewScheduleEntry {
        NewScheduleEntry {
            class_code: code.into(),
            class_name: String::new(),
            category: String::new(),
            warehouse: String::new(),
            period: Period::new(month, year).unwrap(),
            monthly_target: 1,
        }
    }
}
