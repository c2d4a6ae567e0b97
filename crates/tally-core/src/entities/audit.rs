use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntryType, ErrorCategory};
use crate::lenient;

/// One submitted stock-count session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub auditor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub entry_type: EntryType,
    /// Whether the batch-related sector counters count toward totals.
    #[serde(default)]
    pub uses_batches: bool,
    #[serde(default)]
    pub items: Vec<AuditLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_info: Option<SectorSummary>,
}

impl AuditRecord {
    /// Expected quantity of the record: items plus sector components.
    #[must_use]
    pub fn expected_total(&self) -> u64 {
        let items: u64 = self
            .items
            .iter()
            .map(|item| u64::from(item.expected_quantity))
            .sum();
        items
            + self
                .sector_info
                .as_ref()
                .map_or(0, |s| u64::from(s.expected_components))
    }

    /// Actual quantity of the record: items plus sector components.
    #[must_use]
    pub fn actual_total(&self) -> u64 {
        let items: u64 = self
            .items
            .iter()
            .map(|item| u64::from(item.actual_quantity))
            .sum();
        items
            + self
                .sector_info
                .as_ref()
                .map_or(0, |s| u64::from(s.found_components))
    }

    /// The sector's contribution to `category`, honoring `uses_batches`.
    #[must_use]
    pub fn sector_contribution(&self, category: ErrorCategory) -> u32 {
        match &self.sector_info {
            Some(sector) if self.uses_batches || !category.is_batch_related() => {
                sector.counter(category)
            }
            _ => 0,
        }
    }
}

/// One product/class/aisle entry within an audit record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLineItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub expected_quantity: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub actual_quantity: u32,
    #[serde(default)]
    pub batch_number: String,
    #[serde(default)]
    pub box_number: String,
    #[serde(default)]
    pub correct_location: String,
    #[serde(default)]
    pub actual_location: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<u32>")]
    pub not_found_batches: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<u32>")]
    pub unregistered_boxes: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<u32>")]
    pub wrong_location_boxes: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<u32>")]
    pub quantity_mismatches: Option<u32>,
}

impl AuditLineItem {
    /// Counter value for `category`; absent counters read as 0.
    #[must_use]
    pub fn counter(&self, category: ErrorCategory) -> u32 {
        match category {
            ErrorCategory::NotFoundBatches => self.not_found_batches,
            ErrorCategory::UnregisteredBoxes => self.unregistered_boxes,
            ErrorCategory::WrongLocationBoxes => self.wrong_location_boxes,
            ErrorCategory::QuantityMismatches => self.quantity_mismatches,
        }
        .unwrap_or(0)
    }
}

/// Aggregate counters for a whole location rather than individual items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    #[serde(default)]
    pub sector_name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub total_components: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub expected_components: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub found_components: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub not_found_batches: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub unregistered_boxes: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub wrong_location_boxes: u32,
    #[serde(default, deserialize_with = "lenient::count")]
    #[schemars(with = "u32")]
    pub quantity_mismatches: u32,
    #[serde(default)]
    pub notes: String,
}

impl SectorSummary {
    #[must_use]
    pub const fn counter(&self, category: ErrorCategory) -> u32 {
        match category {
            ErrorCategory::NotFoundBatches => self.not_found_batches,
            ErrorCategory::UnregisteredBoxes => self.unregistered_boxes,
            ErrorCategory::WrongLocationBoxes => self.wrong_location_boxes,
            ErrorCategory::QuantityMismatches => self.quantity_mismatches,
        }
    }

    /// True when nothing was filled in: blank name and notes, all numbers 0.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.sector_name.trim().is_empty()
            && self.notes.trim().is_empty()
            && self.total_components == 0
            && self.expected_components == 0
            && self.found_components == 0
            && ErrorCategory::ALL.iter().all(|c| self.counter(*c) == 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(uses_batches: bool, sector: Option<SectorSummary>) -> AuditRecord {
        AuditRecord {
            id: "aud-00000001".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            auditor: "R. Lima".into(),
            location: "Rua 25".into(),
            entry_type: EntryType::Street,
            uses_batches,
            items: vec![
                AuditLineItem {
                    expected_quantity: 10,
                    actual_quantity: 8,
                    ..AuditLineItem::default()
                },
                AuditLineItem {
                    expected_quantity: 5,
                    actual_quantity: 6,
                    ..AuditLineItem::default()
                },
            ],
            sector_info: sector,
        }
    }

    #[test]
    fn totals_include_sector_components() {
        let sector = SectorSummary {
            expected_components: 100,
            found_components: 90,
            ..SectorSummary::default()
        };
        let r = record(false, Some(sector));
        assert_eq!(r.expected_total(), 115);
        assert_eq!(r.actual_total(), 104);
    }

    #[test]
    fn sector_batch_counters_gated_by_flag() {
        let sector = SectorSummary {
            not_found_batches: 5,
            quantity_mismatches: 3,
            ..SectorSummary::default()
        };
        let off = record(false, Some(sector.clone()));
        assert_eq!(off.sector_contribution(ErrorCategory::NotFoundBatches), 0);
        assert_eq!(off.sector_contribution(ErrorCategory::QuantityMismatches), 3);

        let on = record(true, Some(sector));
        assert_eq!(on.sector_contribution(ErrorCategory::NotFoundBatches), 5);
    }

    #[test]
    fn reads_legacy_record_with_missing_and_malformed_fields() {
        let json = r#"{
            "id": "1718000000000",
            "date": "2024-06-10",
            "auditor": "Ana",
            "location": "Galpão 02",
            "items": [{
                "id": "1",
                "productCode": "9098",
                "productName": "Tampas",
                "expectedQuantity": "40",
                "actualQuantity": null,
                "quantityMismatches": 2
            }],
            "sectorInfo": {"sectorName": "Rua 3", "expectedComponents": -4, "notes": ""}
        }"#;
        let record: AuditRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.entry_type, EntryType::Street);
        assert!(!record.uses_batches);
        let item = &record.items[0];
        assert_eq!(item.expected_quantity, 40);
        assert_eq!(item.actual_quantity, 0);
        assert_eq!(item.counter(ErrorCategory::QuantityMismatches), 2);
        assert_eq!(item.counter(ErrorCategory::NotFoundBatches), 0);
        assert_eq!(record.sector_info.unwrap().expected_components, 0);
    }

    #[test]
    fn absent_counters_are_not_written_back() {
        let item = AuditLineItem {
            id: "i1".into(),
            product_code: "9601".into(),
            ..AuditLineItem::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("notFoundBatches").is_none());
        assert_eq!(json["productCode"], "9601");
    }

    #[test]
    fn blank_sector_detection() {
        assert!(SectorSummary::default().is_blank());
        assert!(SectorSummary {
            sector_name: "   ".into(),
            ..SectorSummary::default()
        }
        .is_blank());
        assert!(!SectorSummary {
            notes: "pallet missing".into(),
            ..SectorSummary::default()
        }
        .is_blank());
        assert!(!SectorSummary {
            wrong_location_boxes: 1,
            ..SectorSummary::default()
        }
        .is_blank());
    }
}
