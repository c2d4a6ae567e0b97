//! Aggregates recomputed from the stored audit records on every call.

use tally_core::entities::AuditRecord;
use tally_core::period::Period;
use tally_core::report::{
    self, ErrorSlice, LocationErrors, QuantityPoint, RecentAudit, TrendPoint,
};
use tally_core::summary::{self, SummaryTotals};

use crate::error::StoreError;
use crate::service::TallyService;

impl TallyService {
    fn audits_in(&self, period: Option<Period>) -> Result<Vec<AuditRecord>, StoreError> {
        let mut records = self.audits().all()?;
        if let Some(period) = period {
            records.retain(|r| period.contains(r.date));
        }
        Ok(records)
    }

    /// Summary totals over all records, or those dated in `period`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn summary(&self, period: Option<Period>) -> Result<SummaryTotals, StoreError> {
        Ok(summary::summarize(&self.audits_in(period)?))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn error_distribution(&self, period: Option<Period>) -> Result<Vec<ErrorSlice>, StoreError> {
        Ok(report::error_distribution(&self.audits_in(period)?))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn quantity_comparison(
        &self,
        period: Option<Period>,
    ) -> Result<Vec<QuantityPoint>, StoreError> {
        Ok(report::quantity_comparison(&self.audits_in(period)?))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn error_trend(&self, period: Option<Period>) -> Result<Vec<TrendPoint>, StoreError> {
        Ok(report::error_trend(&self.audits_in(period)?))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn location_ranking(
        &self,
        period: Option<Period>,
        limit: usize,
    ) -> Result<Vec<LocationErrors>, StoreError> {
        Ok(report::location_ranking(&self.audits_in(period)?, limit))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn recent_audits(
        &self,
        period: Option<Period>,
        count: usize,
    ) -> Result<Vec<RecentAudit>, StoreError> {
        Ok(report::recent_audits(&self.audits_in(period)?, count))
    }
}
