//! End-to-end computations over a collection in the stored wire format.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tally_core::entities::{AuditRecord, ScheduleEntry};
use tally_core::enums::{ErrorCategory, ScheduleStatus};
use tally_core::period::Period;
use tally_core::report::{error_distribution, location_ranking, recent_audits};
use tally_core::schedule::evaluate_schedule;
use tally_core::summary::summarize;

const AUDITS: &str = r#"[
  {
    "id": "1717400000000",
    "date": "2024-06-03",
    "auditor": "Ana",
    "location": "Rua 25",
    "entryType": "rua",
    "usesBatches": false,
    "items": [],
    "sectorInfo": {
      "sectorName": "Rua 25",
      "totalComponents": 80,
      "expectedComponents": 80,
      "foundComponents": 76,
      "notFoundBatches": 5,
      "unregisteredBoxes": 2,
      "wrongLocationBoxes": 1,
      "quantityMismatches": 3,
      "notes": ""
    }
  },
  {
    "id": "1717500000000",
    "date": "2024-06-04",
    "auditor": "Bruno",
    "location": "Galpão 02",
    "entryType": "classe",
    "usesBatches": true,
    "items": [
      {"id": "a", "productCode": "A9098Z", "productName": "Tampas", "expectedQuantity": 100, "actualQuantity": 80,
       "batchNumber": "", "boxNumber": "", "correctLocation": "", "actualLocation": "",
       "notFoundBatches": 1, "unregisteredBoxes": 0, "wrongLocationBoxes": 2, "quantityMismatches": 1},
      {"id": "b", "productCode": "X-1", "productName": "Molas 9618", "expectedQuantity": 20, "actualQuantity": 20}
    ]
  },
  {
    "id": "1719800000000",
    "date": "2024-07-01",
    "auditor": "Ana",
    "location": "",
    "entryType": "produto",
    "usesBatches": false,
    "items": [
      {"id": "c", "productCode": "9601", "productName": "Carcaças", "expectedQuantity": 0, "actualQuantity": 4}
    ]
  }
]"#;

const SCHEDULE: &str = r#"[
  {"id": "s1", "classCode": "9098", "className": "Tampas", "category": "Relé", "warehouse": "Galpão 02", "month": 6, "year": 2024},
  {"id": "s2", "classCode": "9618", "className": "Molas", "category": "Relé", "warehouse": "Galpão 02", "month": 6, "year": 2024},
  {"id": "s3", "classCode": "9601", "className": "Carcaças", "category": "Relé", "warehouse": "Galpão 02", "month": 6, "year": 2024},
  {"id": "s4", "classCode": "9601", "className": "Carcaças", "category": "Relé", "warehouse": "Galpão 02", "month": 7, "year": 2024, "status": "completed", "completed": true}
]"#;

fn audits() -> Vec<AuditRecord> {
    serde_json::from_str(AUDITS).expect("fixture parses")
}

#[test]
fn summary_over_fixture() {
    let totals = summarize(&audits());
    assert_eq!(totals.total_items, 3);
    assert_eq!(totals.audited_quantity, 200);
    assert_eq!(totals.real_quantity, 180);
    assert_eq!(totals.error_margin, 20);
    // sector of record 1 ignores batch counters; record 2 items always count
    assert_eq!(totals.errors.not_found_batches, 1);
    assert_eq!(totals.errors.unregistered_boxes, 0);
    assert_eq!(totals.errors.wrong_location_boxes, 2);
    assert_eq!(totals.errors.quantity_mismatches, 4);
    assert!((totals.accuracy_percentage - 90.0).abs() < 1e-9);
}

#[test]
fn reports_over_fixture() {
    let records = audits();
    let distribution = error_distribution(&records);
    let categories: Vec<_> = distribution.iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![
            ErrorCategory::NotFoundBatches,
            ErrorCategory::WrongLocationBoxes,
            ErrorCategory::QuantityMismatches,
        ]
    );

    let ranking = location_ranking(&records, 5);
    assert_eq!(ranking[0].location, "Galpão 02");
    assert_eq!(ranking[0].total_errors, 4);
    assert_eq!(ranking[1].location, "Rua 25");
    assert_eq!(ranking[1].total_errors, 3);
    assert_eq!(ranking[2].location, "(no location)");

    let recent = recent_audits(&records, 5);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].id, "1719800000000");
    assert!(recent[0].accuracy_percentage.abs() < f64::EPSILON);
}

#[test]
fn schedule_over_fixture() {
    let entries: Vec<ScheduleEntry> = serde_json::from_str(SCHEDULE).expect("fixture parses");
    let june = Period::new(6, 2024).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
    let out = evaluate_schedule(&entries, &audits(), june, today);

    let statuses: Vec<_> = out.iter().map(|e| (e.id.as_str(), e.status)).collect();
    assert_eq!(
        statuses,
        vec![
            ("s1", ScheduleStatus::Completed),
            ("s2", ScheduleStatus::Completed),
            ("s3", ScheduleStatus::Overdue),
            ("s4", ScheduleStatus::Completed),
        ]
    );
    assert_eq!(
        out[1].last_audit_date,
        NaiveDate::from_ymd_opt(2024, 6, 4)
    );
}
