//! Schedule matcher.
//!
//! Decides, for each schedule entry of a period, whether the class has been
//! audited that month.
//!
//! A record can satisfy an entry when it is a class audit dated inside the
//! period and one of its line items matches the entry's class code:
//!
//! ```text
//! item.code == code             → exact
//! item.code contains code       → code_contains
//! item.name contains code       → name_contains
//! ```
//!
//! Matching is a fuzzy join, so one item can match several entries (`909` and
//! `9098` both match `A9098Z`). Each item is attributed to exactly one entry
//! code: best kind first (exact, then code, then name), then the longest code,
//! then the lexicographically smallest code. Only the winner gets credit.
//!
//! Records outside the evaluated month never count.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AuditLineItem, AuditRecord, ScheduleEntry};
use crate::enums::{EntryType, ScheduleStatus};
use crate::period::Period;

/// How a line item matched a class code. Ordered best first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    CodeContains,
    NameContains,
}

/// How `item` matches `code`, if at all. Blank codes never match.
#[must_use]
pub fn match_kind(code: &str, item: &AuditLineItem) -> Option<MatchKind> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    let item_code = item.product_code.trim();
    if item_code == code {
        Some(MatchKind::Exact)
    } else if item_code.contains(code) {
        Some(MatchKind::CodeContains)
    } else if item.product_name.contains(code) {
        Some(MatchKind::NameContains)
    } else {
        None
    }
}

/// The bare predicate: a class record with at least one item matching `code`.
///
/// Ignores dates and competing entries; see [`evaluate_schedule`] for the
/// attribution rules used when computing statuses.
#[must_use]
pub fn record_matches(code: &str, record: &AuditRecord) -> bool {
    record.entry_type == EntryType::Class
        && record
            .items
            .iter()
            .any(|item| match_kind(code, item).is_some())
}

/// The code among `codes` that `item` is attributed to.
#[must_use]
pub fn attribute_item<'a>(item: &AuditLineItem, codes: &[&'a str]) -> Option<&'a str> {
    codes
        .iter()
        .filter_map(|code| match_kind(code, item).map(|kind| (kind, *code)))
        .min_by(|(kind_a, code_a), (kind_b, code_b)| {
            kind_a
                .cmp(kind_b)
                .then_with(|| code_b.len().cmp(&code_a.len()))
                .then_with(|| code_a.cmp(code_b))
        })
        .map(|(_, code)| code)
}

/// Derive the graduated status from a match count.
#[must_use]
pub fn derive_status(count: u32, target: u32, period: Period, today: NaiveDate) -> ScheduleStatus {
    if count >= target.max(1) {
        ScheduleStatus::Completed
    } else if count > 0 {
        ScheduleStatus::InProgress
    } else if period.has_ended(today) {
        ScheduleStatus::Overdue
    } else {
        ScheduleStatus::Pending
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count: u32,
    last: Option<NaiveDate>,
}

/// Recompute derived fields of every entry scheduled for `period`.
///
/// Entries for other periods (or with an invalid month) are returned
/// unchanged. Input order is preserved, and every untouched field is copied
/// forward so the result can replace the stored collection wholesale.
#[must_use]
pub fn evaluate_schedule(
    entries: &[ScheduleEntry],
    records: &[AuditRecord],
    period: Period,
    today: NaiveDate,
) -> Vec<ScheduleEntry> {
    let codes: Vec<&str> = entries
        .iter()
        .filter(|entry| entry.period() == Some(period))
        .map(|entry| entry.class_code.trim())
        .filter(|code| !code.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for record in records
        .iter()
        .filter(|r| r.entry_type == EntryType::Class && period.contains(r.date))
    {
        let credited: BTreeSet<&str> = record
            .items
            .iter()
            .filter_map(|item| attribute_item(item, &codes))
            .collect();
        for code in credited {
            let tally = tallies.entry(code).or_default();
            tally.count += 1;
            tally.last = tally.last.max(Some(record.date));
        }
    }

    entries
        .iter()
        .map(|entry| {
            if entry.period() != Some(period) {
                return entry.clone();
            }
            let tally = tallies
                .get(entry.class_code.trim())
                .copied()
                .unwrap_or_default();
            let status = derive_status(tally.count, entry.effective_target(), period, today);
            ScheduleEntry {
                completed: status.is_completed(),
                last_audit_date: tally.last,
                audit_count: tally.count,
                status,
                ..entry.clone()
            }
        })
        .collect()
}
