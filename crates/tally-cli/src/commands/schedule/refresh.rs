use chrono::NaiveDate;
use serde::Serialize;
use tally_core::entities::ScheduleEntry;
use tally_core::enums::ScheduleStatus;
use tally_core::period::Period;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{period_or_current, today};
use crate::context::AppContext;
use crate::output::output_rows;

/// A refreshed month with per-status counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProgress {
    pub period: String,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub overdue: usize,
    pub entries: Vec<ScheduleEntry>,
}

impl PeriodProgress {
    pub fn new(period: Period, mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by(|a, b| a.class_code.cmp(&b.class_code));
        let count = |status: ScheduleStatus| entries.iter().filter(|e| e.status == status).count();
        Self {
            period: period.to_string(),
            total: entries.len(),
            completed: count(ScheduleStatus::Completed),
            in_progress: count(ScheduleStatus::InProgress),
            pending: count(ScheduleStatus::Pending),
            overdue: count(ScheduleStatus::Overdue),
            entries,
        }
    }
}

/// Recompute `period` and store the result.
pub fn refresh_period(ctx: &AppContext, period: Period, today: NaiveDate) -> anyhow::Result<PeriodProgress> {
    let entries = ctx.service.refresh_schedule(period, today)?;
    Ok(PeriodProgress::new(period, entries))
}

pub fn run(period: &PeriodArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let today = today();
    let period = period_or_current(period, today)?;
    let progress = refresh_period(ctx, period, today)?;
    output_rows(&progress, &progress.entries, flags.format)
}
