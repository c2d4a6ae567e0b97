//! Summary aggregation over audit records.
//!
//! Accuracy is a single global ratio, `100 * (expected - |expected - actual|) /
//! expected`, not an average of per-item accuracies. It goes negative when the
//! actual count exceeds twice the expected count, and is exactly 0 when nothing
//! was expected.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditRecord;
use crate::enums::ErrorCategory;

/// Sums of the four discrepancy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCounts {
    pub not_found_batches: u64,
    pub unregistered_boxes: u64,
    pub wrong_location_boxes: u64,
    pub quantity_mismatches: u64,
}

impl ErrorCounts {
    #[must_use]
    pub const fn get(&self, category: ErrorCategory) -> u64 {
        match category {
            ErrorCategory::NotFoundBatches => self.not_found_batches,
            ErrorCategory::UnregisteredBoxes => self.unregistered_boxes,
            ErrorCategory::WrongLocationBoxes => self.wrong_location_boxes,
            ErrorCategory::QuantityMismatches => self.quantity_mismatches,
        }
    }

    pub const fn add(&mut self, category: ErrorCategory, amount: u64) {
        match category {
            ErrorCategory::NotFoundBatches => self.not_found_batches += amount,
            ErrorCategory::UnregisteredBoxes => self.unregistered_boxes += amount,
            ErrorCategory::WrongLocationBoxes => self.wrong_location_boxes += amount,
            ErrorCategory::QuantityMismatches => self.quantity_mismatches += amount,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        for category in ErrorCategory::ALL {
            self.add(category, other.get(category));
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        ErrorCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Totals across a list of audit records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_items: u64,
    pub audited_quantity: u64,
    pub real_quantity: u64,
    pub error_margin: u64,
    #[serde(flatten)]
    pub errors: ErrorCounts,
    pub accuracy_percentage: f64,
}

/// Error counters of one record.
///
/// Item counters always count. The sector's batch-related counters count only
/// when the record tracks batches; its quantity mismatches always count.
#[must_use]
pub fn record_errors(record: &AuditRecord) -> ErrorCounts {
    let mut counts = ErrorCounts::default();
    for item in &record.items {
        for category in ErrorCategory::ALL {
            counts.add(category, u64::from(item.counter(category)));
        }
    }
    for category in ErrorCategory::ALL {
        counts.add(category, u64::from(record.sector_contribution(category)));
    }
    counts
}

/// `100 * (expected - |expected - actual|) / expected`, or 0 when nothing was
/// expected.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy_percentage(expected: u64, actual: u64) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    let margin = expected.abs_diff(actual) as f64;
    let expected = expected as f64;
    (expected - margin) / expected * 100.0
}

/// Fold records into summary totals. Never fails; absent counters are 0.
#[must_use]
pub fn summarize(records: &[AuditRecord]) -> SummaryTotals {
    let mut totals = SummaryTotals::default();
    for record in records {
        totals.total_items += record.items.len() as u64;
        totals.audited_quantity += record.expected_total();
        totals.real_quantity += record.actual_total();
        totals.errors.merge(&record_errors(record));
    }
    totals.error_margin = totals.audited_quantity.abs_diff(totals.real_quantity);
    totals.accuracy_percentage = accuracy_percentage(totals.audited_quantity, totals.real_quantity);
    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::{AuditLineItem, SectorSummary};
    use crate::enums::EntryType;

    fn item(expected: u32, actual: u32) -> AuditLineItem {
        AuditLineItem {
            expected_quantity: expected,
            actual_quantity: actual,
            ..AuditLineItem::default()
        }
    }

    fn record(items: Vec<AuditLineItem>, sector: Option<SectorSummary>, batches: bool) -> AuditRecord {
        AuditRecord {
            id: "r".into(),
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            auditor: String::new(),
            location: String::new(),
            entry_type: EntryType::Product,
            uses_batches: batches,
            items,
            sector_info: sector,
        }
    }

    #[test]
    fn single_item_example() {
        let totals = summarize(&[record(vec![item(100, 80)], None, false)]);
        assert_eq!(totals.total_items, 1);
        assert_eq!(totals.audited_quantity, 100);
        assert_eq!(totals.real_quantity, 80);
        assert_eq!(totals.error_margin, 20);
        assert!((totals.accuracy_percentage - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(&[]), SummaryTotals::default());
    }

    #[test]
    fn accuracy_zero_when_nothing_expected() {
        let totals = summarize(&[record(vec![item(0, 50)], None, false)]);
        assert_eq!(totals.error_margin, 50);
        assert!(totals.accuracy_percentage.abs() < f64::EPSILON);
    }

    #[test]
    fn accuracy_can_go_negative() {
        let totals = summarize(&[record(vec![item(10, 35)], None, false)]);
        assert_eq!(totals.error_margin, 25);
        assert!((totals.accuracy_percentage + 150.0).abs() < 1e-9);
    }

    #[test]
    fn sector_without_batches_contributes_only_mismatches() {
        let sector = SectorSummary {
            not_found_batches: 5,
            quantity_mismatches: 3,
            ..SectorSummary::default()
        };
        let totals = summarize(&[record(Vec::new(), Some(sector), false)]);
        assert_eq!(totals.errors.total(), 3);
        assert_eq!(totals.errors.not_found_batches, 0);
        assert_eq!(totals.errors.quantity_mismatches, 3);
    }

    #[test]
    fn sector_with_batches_contributes_everything() {
        let sector = SectorSummary {
            not_found_batches: 5,
            unregistered_boxes: 1,
            wrong_location_boxes: 2,
            quantity_mismatches: 3,
            expected_components: 40,
            found_components: 38,
            ..SectorSummary::default()
        };
        let totals = summarize(&[record(vec![item(10, 10)], Some(sector), true)]);
        assert_eq!(totals.errors.total(), 11);
        assert_eq!(totals.audited_quantity, 50);
        assert_eq!(totals.real_quantity, 48);
        assert_eq!(totals.error_margin, 2);
    }

    #[test]
    fn item_counters_count_regardless_of_batch_flag() {
        let flagged = AuditLineItem {
            not_found_batches: Some(4),
            wrong_location_boxes: Some(1),
            ..item(1, 1)
        };
        let totals = summarize(&[record(vec![flagged], None, false)]);
        assert_eq!(totals.errors.not_found_batches, 4);
        assert_eq!(totals.errors.wrong_location_boxes, 1);
    }

    #[test]
    fn total_items_is_sum_of_item_lists() {
        let records = vec![
            record(vec![item(1, 1), item(2, 2)], None, false),
            record(Vec::new(), Some(SectorSummary::default()), false),
            record(vec![item(3, 0)], None, true),
        ];
        let totals = summarize(&records);
        let expected: usize = records.iter().map(|r| r.items.len()).sum();
        assert_eq!(totals.total_items, expected as u64);
    }

    #[test]
    fn serializes_with_flattened_error_counts() {
        let totals = summarize(&[record(vec![item(100, 80)], None, false)]);
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["auditedQuantity"], 100);
        assert_eq!(json["notFoundBatches"], 0);
        assert_eq!(json["accuracyPercentage"], 80.0);
    }
}
