//! Draft validation and finalization.
//!
//! A draft is saveable when it carries at least one line item or a sector
//! summary with something filled in. Finalization assigns the record id and
//! fills in missing line-item ids. Nothing is partially saved: either the
//! whole record is produced or an error is returned.

use crate::entities::{AuditDraft, AuditRecord, NewScheduleEntry};
use crate::errors::CoreError;
use crate::ids;

/// Check that a draft has content worth saving.
///
/// # Errors
///
/// Returns `CoreError::Validation` when there are no items and the sector
/// summary is absent or blank.
pub fn validate_draft(draft: &AuditDraft) -> Result<(), CoreError> {
    let has_items = !draft.items.is_empty();
    let has_sector = draft.sector_info.as_ref().is_some_and(|s| !s.is_blank());
    if !has_items && !has_sector {
        return Err(CoreError::Validation(
            "add at least one line item or fill in the sector summary before saving".to_string(),
        ));
    }
    Ok(())
}

/// Validate a draft and turn it into a record with fresh ids.
///
/// # Errors
///
/// Returns `CoreError::Validation` from [`validate_draft`], or
/// `CoreError::Other` if id generation fails.
pub fn finalize_draft(mut draft: AuditDraft) -> Result<AuditRecord, CoreError> {
    validate_draft(&draft)?;
    for item in &mut draft.items {
        if item.id.trim().is_empty() {
            item.id = ids::generate(ids::PREFIX_ITEM)?;
        }
    }
    let id = ids::generate(ids::PREFIX_AUDIT)?;
    Ok(draft.into_record(id))
}

/// Validate schedule entry input.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an empty class code.
pub fn validate_schedule_entry(entry: &NewScheduleEntry) -> Result<(), CoreError> {
    if entry.class_code.trim().is_empty() {
        return Err(CoreError::Validation(
            "schedule entry needs a class code".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::{AuditLineItem, SectorSummary};
    use crate::period::Period;

    fn draft() -> AuditDraft {
        AuditDraft::new(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap())
    }

    #[test]
    fn rejects_empty_draft() {
        let err = validate_draft(&draft()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn rejects_blank_sector_without_items() {
        let mut d = draft();
        d.sector_info = Some(SectorSummary::default());
        assert!(validate_draft(&d).is_err());
    }

    #[test]
    fn accepts_sector_only_draft() {
        let mut d = draft();
        d.sector_info = Some(SectorSummary {
            sector_name: "Rua 25".into(),
            ..SectorSummary::default()
        });
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn finalize_assigns_missing_ids_only() {
        let mut d = draft();
        d.items = vec![
            AuditLineItem {
                id: "keep-me".into(),
                ..AuditLineItem::default()
            },
            AuditLineItem::default(),
        ];
        let record = finalize_draft(d).unwrap();
        assert!(record.id.starts_with("aud-"));
        assert_eq!(record.items[0].id, "keep-me");
        assert!(record.items[1].id.starts_with("itm-"));
    }

    #[test]
    fn schedule_entry_requires_code() {
        let entry = NewScheduleEntry {
            class_code: "  ".into(),
            class_name: String::new(),
            category: String::new(),
            warehouse: String::new(),
            period: Period::new(1, 2025).unwrap(),
            monthly_target: 1,
        };
        assert!(validate_schedule_entry(&entry).is_err());
    }
}
