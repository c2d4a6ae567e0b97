//! Schedule repository: entry CRUD, catalog seeding, and status refresh.
//!
//! Derived fields are never read back as truth. Listing recomputes them in
//! memory; [`TallyService::refresh_schedule`] recomputes one period and writes
//! the whole collection back.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tally_core::entities::{AuditRecord, NewScheduleEntry, ScheduleEntry};
use tally_core::enums::ScheduleStatus;
use tally_core::ids::{self, PREFIX_SCHEDULE};
use tally_core::period::Period;
use tally_core::schedule::evaluate_schedule;
use tally_core::validate::validate_schedule_entry;

use crate::error::StoreError;
use crate::service::TallyService;
use crate::updates::schedule::ScheduleEntryUpdate;

/// Result of seeding a period from the class catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub added: Vec<ScheduleEntry>,
    /// Classes already scheduled for the period.
    pub skipped: usize,
}

/// Evaluate every period present in `entries`.
fn evaluate_all(
    entries: &[ScheduleEntry],
    records: &[AuditRecord],
    today: NaiveDate,
) -> Vec<ScheduleEntry> {
    let periods: BTreeSet<Period> = entries.iter().filter_map(ScheduleEntry::period).collect();
    periods
        .into_iter()
        .fold(entries.to_vec(), |current, period| {
            evaluate_schedule(&current, records, period, today)
        })
}

fn reset_derived(entry: &mut ScheduleEntry) {
    entry.completed = false;
    entry.last_audit_date = None;
    entry.audit_count = 0;
    entry.status = ScheduleStatus::Pending;
}

impl TallyService {
    /// Fill blank descriptive fields from the class catalog.
    fn enrich(&self, mut input: NewScheduleEntry) -> NewScheduleEntry {
        input.class_code = input.class_code.trim().to_string();
        if let Some(info) = self.catalog().get(&input.class_code) {
            if input.class_name.trim().is_empty() {
                input.class_name.clone_from(&info.name);
            }
            if input.category.trim().is_empty() {
                input.category = info.category.clone().unwrap_or_default();
            }
            if input.warehouse.trim().is_empty() {
                input.warehouse = info.warehouse.clone().unwrap_or_default();
            }
        }
        input
    }

    /// Add a schedule entry. Blank name, category, and warehouse are taken
    /// from the class catalog when the code is known.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty class code, or `StoreError`
    /// if the store cannot be read or written.
    pub fn add_schedule_entry(&self, input: NewScheduleEntry) -> Result<ScheduleEntry, StoreError> {
        validate_schedule_entry(&input)?;
        let id = ids::generate(PREFIX_SCHEDULE)?;
        let entry = self.enrich(input).into_entry(id);
        self.schedule().append(entry.clone())?;
        tracing::info!(id = %entry.id, class = %entry.class_code, "schedule entry added");
        Ok(entry)
    }

    /// # Errors
    ///
    /// Returns a not-found error if no entry has `id`.
    pub fn get_schedule_entry(&self, id: &str) -> Result<ScheduleEntry, StoreError> {
        self.schedule()
            .get(id)?
            .ok_or_else(|| StoreError::not_found("schedule entry", id))
    }

    /// Apply `update` to the entry with `id`. Changing the code, period, or
    /// target resets the derived fields until the next refresh.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, a validation error if the
    /// class code would become empty, or `StoreError` on store failure.
    pub fn update_schedule_entry(
        &self,
        id: &str,
        update: ScheduleEntryUpdate,
    ) -> Result<ScheduleEntry, StoreError> {
        let mut entries = self.schedule().all()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::not_found("schedule entry", id))?;

        if update.is_empty() {
            return Ok(entry.clone());
        }

        if let Some(code) = update.class_code.as_deref() {
            let code = code.trim();
            if code.is_empty() {
                return Err(tally_core::errors::CoreError::Validation(
                    "schedule entry needs a class code".to_string(),
                )
                .into());
            }
            entry.class_code = code.to_string();
        }
        if let Some(name) = update.class_name.as_ref() {
            entry.class_name.clone_from(name);
        }
        if let Some(category) = update.category.as_ref() {
            entry.category.clone_from(category);
        }
        if let Some(warehouse) = update.warehouse.as_ref() {
            entry.warehouse.clone_from(warehouse);
        }
        if let Some(period) = update.period {
            entry.month = period.month;
            entry.year = period.year;
        }
        if let Some(target) = update.monthly_target {
            entry.monthly_target = target.max(1);
        }
        if update.changes_matching() {
            reset_derived(entry);
        }

        let updated = entry.clone();
        self.schedule().replace_all(&entries)?;
        tracing::info!(id, "schedule entry updated");
        Ok(updated)
    }

    /// Remove the entry with `id`; a missing id is a no-op returning `false`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn remove_schedule_entry(&self, id: &str) -> Result<bool, StoreError> {
        self.schedule().remove(id)
    }

    /// Entries with derived fields recomputed against the current records,
    /// optionally restricted to one period. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn list_schedule(
        &self,
        period: Option<Period>,
        today: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, StoreError> {
        let entries = self.schedule().all()?;
        let records = self.audits().all()?;
        let mut evaluated = match period {
            Some(period) => evaluate_schedule(&entries, &records, period, today),
            None => evaluate_all(&entries, &records, today),
        };
        if let Some(period) = period {
            evaluated.retain(|e| e.period() == Some(period));
        }
        Ok(evaluated)
    }

    /// Recompute the entries of `period` and write the whole collection back.
    /// Returns the entries of `period`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn refresh_schedule(
        &self,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<ScheduleEntry>, StoreError> {
        let entries = self.schedule().all()?;
        let records = self.audits().all()?;
        let evaluated = evaluate_schedule(&entries, &records, period, today);
        self.schedule().replace_all(&evaluated)?;

        let in_period: Vec<ScheduleEntry> = evaluated
            .into_iter()
            .filter(|e| e.period() == Some(period))
            .collect();
        let completed = in_period.iter().filter(|e| e.completed).count();
        tracing::debug!(%period, entries = in_period.len(), completed, "schedule refreshed");
        Ok(in_period)
    }

    /// Add one entry per catalog class (optionally one category) for
    /// `period`, skipping classes already scheduled for it.
    ///
    /// `monthly_target` falls back to the configured default.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn seed_schedule(
        &self,
        period: Period,
        category: Option<&str>,
        monthly_target: Option<u32>,
    ) -> Result<SeedOutcome, StoreError> {
        let target = monthly_target.unwrap_or_else(|| self.default_target());
        let mut entries = self.schedule().all()?;
        let existing: BTreeSet<String> = entries
            .iter()
            .filter(|e| e.period() == Some(period))
            .map(|e| e.class_code.trim().to_string())
            .collect();

        let mut outcome = SeedOutcome::default();
        for input in self.catalog().schedule_inputs(period, category, target) {
            if existing.contains(&input.class_code) {
                outcome.skipped += 1;
                continue;
            }
            let entry = input.into_entry(ids::generate(PREFIX_SCHEDULE)?);
            outcome.added.push(entry.clone());
            entries.push(entry);
        }

        if !outcome.added.is_empty() {
            self.schedule().replace_all(&entries)?;
        }
        tracing::info!(%period, added = outcome.added.len(), skipped = outcome.skipped, "schedule seeded");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::{class_draft, date, new_entry, test_service};
    use crate::updates::schedule::ScheduleEntryUpdateBuilder;

    #[test]
    fn add_fills_details_from_catalog() {
        let svc = test_service();
        let entry = svc.add_schedule_entry(new_entry("9098", 6, 2025)).unwrap();
        assert!(entry.id.starts_with("sch-"));
        assert_eq!(entry.class_name, "Tampas");
        assert_eq!(entry.category, "Relé");
        assert_eq!(entry.warehouse, "Galpão 02");
        assert_eq!(svc.get_schedule_entry(&entry.id).unwrap(), entry);
    }

    #[test]
    fn add_rejects_empty_code() {
        let svc = test_service();
        assert!(svc.add_schedule_entry(new_entry("  ", 6, 2025)).is_err());
    }

    #[test]
    fn refresh_writes_back_derived_fields() {
        let svc = test_service();
        let hit = svc.add_schedule_entry(new_entry("9098", 6, 2025)).unwrap();
        let miss = svc.add_schedule_entry(new_entry("XYZ", 6, 2025)).unwrap();
        svc.save_audit(class_draft("2025-06-10", "A9098Z", "Tampa")).unwrap();

        let refreshed = svc.refresh_schedule(Period::new(6, 2025).unwrap(), date("2025-06-15")).unwrap();
        assert_eq!(refreshed.len(), 2);

        let stored = svc.get_schedule_entry(&hit.id).unwrap();
        assert!(stored.completed);
        assert_eq!(stored.status, ScheduleStatus::Completed);
        assert_eq!(stored.audit_count, 1);
        assert_eq!(stored.last_audit_date, Some(date("2025-06-10")));

        let stored = svc.get_schedule_entry(&miss.id).unwrap();
        assert_eq!(stored.status, ScheduleStatus::Pending);
        assert!(!stored.completed);
    }

    #[test]
    fn list_recomputes_without_writing() {
        let svc = test_service();
        let entry = svc.add_schedule_entry(new_entry("9098", 5, 2025)).unwrap();
        svc.save_audit(class_draft("2025-05-03", "9098", "Tampas")).unwrap();
        let before = svc.store().get("schedule").unwrap();

        let listed = svc.list_schedule(None, date("2025-07-01")).unwrap();
        assert_eq!(listed[0].id, entry.id);
        assert!(listed[0].completed);
        assert_eq!(svc.store().get("schedule").unwrap(), before);
    }

    #[test]
    fn list_by_period_only_returns_that_period() {
        let svc = test_service();
        svc.add_schedule_entry(new_entry("9098", 5, 2025)).unwrap();
        svc.add_schedule_entry(new_entry("9601", 6, 2025)).unwrap();
        let june = svc
            .list_schedule(Some(Period::new(6, 2025).unwrap()), date("2025-06-01"))
            .unwrap();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].class_code, "9601");
    }

    #[test]
    fn update_resets_derived_when_matching_changes() {
        let svc = test_service();
        let entry = svc.add_schedule_entry(new_entry("9098", 6, 2025)).unwrap();
        svc.save_audit(class_draft("2025-06-10", "9098", "Tampas")).unwrap();
        svc.refresh_schedule(Period::new(6, 2025).unwrap(), date("2025-06-11")).unwrap();

        let cosmetic = svc
            .update_schedule_entry(&entry.id, ScheduleEntryUpdateBuilder::new().warehouse("G9").build())
            .unwrap();
        assert!(cosmetic.completed);
        assert_eq!(cosmetic.warehouse, "G9");

        let moved = svc
            .update_schedule_entry(
                &entry.id,
                ScheduleEntryUpdateBuilder::new()
                    .period(Period::new(7, 2025).unwrap())
                    .build(),
            )
            .unwrap();
        assert_eq!(moved.month, 7);
        assert!(!moved.completed);
        assert_eq!(moved.audit_count, 0);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let svc = test_service();
        let err = svc
            .update_schedule_entry("sch-none", ScheduleEntryUpdateBuilder::new().class_name("x").build())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_is_noop_for_unknown_id() {
        let svc = test_service();
        let entry = svc.add_schedule_entry(new_entry("9098", 6, 2025)).unwrap();
        assert!(!svc.remove_schedule_entry("sch-none").unwrap());
        assert!(svc.remove_schedule_entry(&entry.id).unwrap());
        assert!(svc.list_schedule(None, date("2025-06-01")).unwrap().is_empty());
    }

    #[test]
    fn seed_skips_existing_classes() {
        let svc = test_service();
        let period = Period::new(3, 2025).unwrap();
        svc.add_schedule_entry(new_entry("9527", 3, 2025)).unwrap();

        let outcome = svc.seed_schedule(period, Some("ALMOX. GERAL"), None).unwrap();
        assert_eq!(outcome.added.len(), 3);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.added.iter().all(|e| e.monthly_target == 1));

        let again = svc.seed_schedule(period, Some("ALMOX. GERAL"), Some(2)).unwrap();
        assert!(again.added.is_empty());
        assert_eq!(again.skipped, 4);
    }

    #[test]
    fn seed_uses_configured_default_target() {
        let svc = test_service().with_default_target(3);
        let outcome = svc
            .seed_schedule(Period::new(1, 2026).unwrap(), Some("Estamparia"), None)
            .unwrap();
        assert_eq!(outcome.added[0].monthly_target, 3);
    }
}
