//! Dashboard data series derived from audit records.
//!
//! These are the aggregate views behind the charts and tables: error
//! distribution, expected-vs-actual per record, error trend per record,
//! locations ranked by error count, and recent audits with their accuracy.
//! Like the summary, everything is recomputed from the full record list.

use std::collections::HashMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditRecord;
use crate::enums::{AccuracyBand, EntryType, ErrorCategory};
use crate::summary::{ErrorCounts, accuracy_percentage, record_errors};

/// Label used when a record has no location.
pub const NO_LOCATION: &str = "(no location)";

/// One non-zero slice of the error distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorSlice {
    pub category: ErrorCategory,
    pub label: String,
    pub value: u64,
}

/// Expected vs. actual quantity of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuantityPoint {
    pub id: String,
    pub label: String,
    pub expected: u64,
    pub actual: u64,
}

/// Error counters of one record, keyed by its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub errors: ErrorCounts,
}

/// Per-location totals for the ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationErrors {
    pub location: String,
    pub total_errors: u64,
    pub expected_quantity: u64,
    pub actual_quantity: u64,
    pub difference: u64,
}

/// One row of the recent audits table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentAudit {
    pub id: String,
    pub date: NaiveDate,
    pub auditor: String,
    pub location: String,
    pub entry_type: EntryType,
    pub item_count: usize,
    pub accuracy_percentage: f64,
    pub band: AccuracyBand,
}

fn location_label(record: &AuditRecord) -> String {
    let trimmed = record.location.trim();
    if trimmed.is_empty() {
        NO_LOCATION.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Error totals by category, omitting categories with nothing recorded.
#[must_use]
pub fn error_distribution(records: &[AuditRecord]) -> Vec<ErrorSlice> {
    let mut totals = ErrorCounts::default();
    for record in records {
        totals.merge(&record_errors(record));
    }
    ErrorCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let value = totals.get(category);
            (value > 0).then(|| ErrorSlice {
                category,
                label: category.label().to_string(),
                value,
            })
        })
        .collect()
}

/// Expected vs. actual per record, in record order.
#[must_use]
pub fn quantity_comparison(records: &[AuditRecord]) -> Vec<QuantityPoint> {
    records
        .iter()
        .map(|record| QuantityPoint {
            id: record.id.clone(),
            label: location_label(record),
            expected: record.expected_total(),
            actual: record.actual_total(),
        })
        .collect()
}

/// Error counters per record, in record order.
#[must_use]
pub fn error_trend(records: &[AuditRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|record| TrendPoint {
            id: record.id.clone(),
            date: record.date,
            errors: record_errors(record),
        })
        .collect()
}

/// Locations ranked by total errors, highest first, at most `limit` rows.
///
/// Unlike the summary, the item-level batch-related counters also count only
/// when the record tracks batches. Ties keep first-seen location order.
#[must_use]
pub fn location_ranking(records: &[AuditRecord], limit: usize) -> Vec<LocationErrors> {
    let mut order: Vec<String> = Vec::new();
    let mut by_location: HashMap<String, LocationErrors> = HashMap::new();

    for record in records {
        let label = location_label(record);
        let entry = by_location.entry(label.clone()).or_insert_with(|| {
            order.push(label.clone());
            LocationErrors {
                location: label,
                total_errors: 0,
                expected_quantity: 0,
                actual_quantity: 0,
                difference: 0,
            }
        });

        entry.expected_quantity += record.expected_total();
        entry.actual_quantity += record.actual_total();

        for category in ErrorCategory::ALL {
            if category.is_batch_related() && !record.uses_batches {
                continue;
            }
            let items: u64 = record
                .items
                .iter()
                .map(|item| u64::from(item.counter(category)))
                .sum();
            entry.total_errors += items + u64::from(record.sector_contribution(category));
        }
        entry.difference = entry.expected_quantity.abs_diff(entry.actual_quantity);
    }

    let mut ranked: Vec<LocationErrors> = order
        .into_iter()
        .filter_map(|label| by_location.remove(&label))
        .collect();
    ranked.sort_by(|a, b| b.total_errors.cmp(&a.total_errors));
    ranked.truncate(limit);
    ranked
}

/// Accuracy of a single record, same formula as the summary.
#[must_use]
pub fn record_accuracy(record: &AuditRecord) -> f64 {
    accuracy_percentage(record.expected_total(), record.actual_total())
}

/// The last `count` records, newest (last saved) first.
#[must_use]
pub fn recent_audits(records: &[AuditRecord], count: usize) -> Vec<RecentAudit> {
    records
        .iter()
        .rev()
        .take(count)
        .map(|record| {
            let accuracy = record_accuracy(record);
            RecentAudit {
                id: record.id.clone(),
                date: record.date,
                auditor: record.auditor.clone(),
                location: record.location.clone(),
                entry_type: record.entry_type,
                item_count: record.items.len(),
                accuracy_percentage: accuracy,
                band: AccuracyBand::from_percentage(accuracy),
            }
        })
        .collect()
}
