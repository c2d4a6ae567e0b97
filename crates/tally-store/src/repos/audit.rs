//! Audit record repository: validated save, lookup, listing, delete.

use tally_core::entities::{AuditDraft, AuditRecord};
use tally_core::enums::EntryType;
use tally_core::period::Period;
use tally_core::validate::finalize_draft;

use crate::error::StoreError;
use crate::service::TallyService;

/// Listing filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Case-insensitive substring of the record location.
    pub location: Option<String>,
    pub entry_type: Option<EntryType>,
    pub period: Option<Period>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(ref wanted) = self.location {
            let wanted = wanted.trim().to_lowercase();
            if !record.location.to_lowercase().contains(&wanted) {
                return false;
            }
        }
        if self.entry_type.is_some_and(|t| t != record.entry_type) {
            return false;
        }
        self.period.is_none_or(|p| p.contains(record.date))
    }
}

impl TallyService {
    /// Validate a draft, assign ids, and append it to the audit collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core(CoreError::Validation)` for a draft with no
    /// items and no sector summary; nothing is written in that case.
    pub fn save_audit(&self, draft: AuditDraft) -> Result<AuditRecord, StoreError> {
        let record = finalize_draft(draft)?;
        self.audits().append(record.clone())?;
        tracing::info!(id = %record.id, items = record.items.len(), "audit saved");
        Ok(record)
    }

    /// Every stored record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn all_audits(&self) -> Result<Vec<AuditRecord>, StoreError> {
        self.audits().all()
    }

    /// Records matching `filter`, newest (last saved) first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn list_audits(
        &self,
        filter: &AuditFilter,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        Ok(self
            .audits()
            .all()?
            .into_iter()
            .rev()
            .filter(|record| filter.matches(record))
            .take(limit)
            .collect())
    }

    /// # Errors
    ///
    /// Returns a not-found error if no record has `id`.
    pub fn get_audit(&self, id: &str) -> Result<AuditRecord, StoreError> {
        self.audits()
            .get(id)?
            .ok_or_else(|| StoreError::not_found("audit", id))
    }

    /// Delete the record with `id`. Deleting a missing id is a no-op that
    /// returns `false`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn delete_audit(&self, id: &str) -> Result<bool, StoreError> {
        let removed = self.audits().remove(id)?;
        if removed {
            tracing::info!(id, "audit deleted");
        } else {
            tracing::debug!(id, "delete of unknown audit ignored");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tally_core::errors::CoreError;

    use super::*;
    use crate::test_support::helpers::{class_draft, draft_at, test_service};

    #[test]
    fn save_assigns_id_and_persists() {
        let svc = test_service();
        let saved = svc.save_audit(draft_at("2025-03-04", "Rua 25", 100, 80)).unwrap();
        assert!(saved.id.starts_with("aud-"));
        assert_eq!(svc.get_audit(&saved.id).unwrap(), saved);
        assert_eq!(svc.all_audits().unwrap().len(), 1);
    }

    #[test]
    fn invalid_draft_writes_nothing() {
        let svc = test_service();
        let mut draft = draft_at("2025-03-04", "Rua 25", 1, 1);
        draft.items.clear();
        let err = svc.save_audit(draft).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(svc.all_audits().unwrap().is_empty());
        assert_eq!(svc.store().get("audits").unwrap(), None);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let svc = test_service();
        assert!(svc.get_audit("aud-nope").unwrap_err().is_not_found());
    }

    #[test]
    fn list_filters_and_orders_newest_first() {
        let svc = test_service();
        let a = svc.save_audit(draft_at("2025-03-01", "Rua 25", 1, 1)).unwrap();
        let b = svc.save_audit(class_draft("2025-03-02", "9098", "A9098Z")).unwrap();
        let c = svc.save_audit(draft_at("2025-04-01", "rua 26", 1, 1)).unwrap();

        let all = svc.list_audits(&AuditFilter::default(), 10).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), b.id.as_str(), a.id.as_str()]);

        let streets = AuditFilter {
            location: Some("RUA".into()),
            entry_type: Some(EntryType::Street),
            ..AuditFilter::default()
        };
        assert_eq!(svc.list_audits(&streets, 10).unwrap().len(), 2);

        let march = AuditFilter {
            period: Some(Period::new(3, 2025).unwrap()),
            ..AuditFilter::default()
        };
        assert_eq!(svc.list_audits(&march, 1).unwrap(), vec![b]);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let svc = test_service();
        svc.save_audit(draft_at("2025-03-01", "Rua 25", 1, 1)).unwrap();
        let before = svc.store().get("audits").unwrap();
        assert!(!svc.delete_audit("aud-missing").unwrap());
        assert_eq!(svc.store().get("audits").unwrap(), before);
    }
}
