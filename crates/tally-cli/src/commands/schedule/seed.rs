use serde::Serialize;
use tally_core::entities::ScheduleEntry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{period_or_current, today};
use crate::context::AppContext;
use crate::output::output_rows;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeedResponse {
    period: String,
    skipped: usize,
    added: Vec<ScheduleEntry>,
}

pub fn run(
    period: &PeriodArgs,
    category: Option<&str>,
    target: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let period = period_or_current(period, today())?;
    let outcome = ctx.service.seed_schedule(period, category, target)?;
    let response = SeedResponse {
        period: period.to_string(),
        skipped: outcome.skipped,
        added: outcome.added,
    };
    output_rows(&response, &response.added, flags.format)
}
