//! Entry types, schedule statuses, accuracy bands, and error categories.
//!
//! Enums that live in persisted collections keep the wire spelling used by
//! existing stored data (`rua`, `classe`, `produto`) and accept the English
//! spellings on input. Everything else uses `snake_case`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntryType
// ---------------------------------------------------------------------------

/// What an audit record was counted against.
///
/// Records written without an `entryType` read back as [`EntryType::Street`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum EntryType {
    /// A street/aisle of the warehouse.
    #[default]
    #[serde(rename = "rua", alias = "street", alias = "aisle")]
    Street,
    /// A product class (the only type the schedule matcher considers).
    #[serde(rename = "classe", alias = "class")]
    Class,
    /// A single product.
    #[serde(rename = "produto", alias = "product")]
    Product,
}

impl EntryType {
    /// Stored spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Street => "rua",
            Self::Class => "classe",
            Self::Product => "produto",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::Class => "class",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ScheduleStatus
// ---------------------------------------------------------------------------

/// Derived completion status of a schedule entry for its period.
///
/// ```text
/// count == 0, period open      → pending
/// count == 0, period ended     → overdue
/// 0 < count < monthly_target   → in_progress
/// count >= monthly_target      → completed
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl ScheduleStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AccuracyBand
// ---------------------------------------------------------------------------

/// Coarse grading of a record's accuracy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyBand {
    /// 95% and above.
    Good,
    /// 80% up to 95%.
    Fair,
    /// Below 80%.
    Poor,
}

impl AccuracyBand {
    #[must_use]
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 95.0 {
            Self::Good
        } else if pct >= 80.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// The four discrepancy counters tracked per line item and per sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotFoundBatches,
    UnregisteredBoxes,
    WrongLocationBoxes,
    QuantityMismatches,
}

impl ErrorCategory {
    pub const ALL: [Self; 4] = [
        Self::NotFoundBatches,
        Self::UnregisteredBoxes,
        Self::WrongLocationBoxes,
        Self::QuantityMismatches,
    ];

    /// Whether the counter only applies when a record tracks batches.
    #[must_use]
    pub const fn is_batch_related(self) -> bool {
        !matches!(self, Self::QuantityMismatches)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFoundBatches => "not_found_batches",
            Self::UnregisteredBoxes => "unregistered_boxes",
            Self::WrongLocationBoxes => "wrong_location_boxes",
            Self::QuantityMismatches => "quantity_mismatches",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotFoundBatches => "Batches not found",
            Self::UnregisteredBoxes => "Unregistered boxes",
            Self::WrongLocationBoxes => "Wrong location",
            Self::QuantityMismatches => "Quantity mismatch",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
