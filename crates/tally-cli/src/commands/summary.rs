use serde::Serialize;
use tally_core::period::Period;
use tally_core::summary::SummaryTotals;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{optional_period, today};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<String>,
    audits: usize,
    #[serde(flatten)]
    totals: SummaryTotals,
}

/// Handle `tly summary`.
pub fn handle(args: &PeriodArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let period = optional_period(args, today())?;
    let totals = ctx.service.summary(period)?;
    let audits = count_audits(ctx, period)?;
    output(
        &SummaryResponse {
            period: period.map(|p| p.to_string()),
            audits,
            totals,
        },
        flags.format,
    )
}

fn count_audits(ctx: &AppContext, period: Option<Period>) -> anyhow::Result<usize> {
    let records = ctx.service.all_audits()?;
    Ok(period.map_or(records.len(), |p| {
        records.iter().filter(|r| p.contains(r.date)).count()
    }))
}
