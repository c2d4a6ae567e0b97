use tally_core::enums::ScheduleStatus;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::period::{optional_period, today};
use crate::context::AppContext;
use crate::output::output;

pub fn run(
    period: &PeriodArgs,
    status: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let today = today();
    let period = optional_period(period, today)?;
    let status = status
        .map(|raw| parse_enum::<ScheduleStatus>(raw, "status"))
        .transpose()?;

    let mut entries = ctx.service.list_schedule(period, today)?;
    if let Some(status) = status {
        entries.retain(|entry| entry.status == status);
    }
    entries.sort_by(|a, b| {
        (a.year, a.month, a.class_code.as_str()).cmp(&(b.year, b.month, b.class_code.as_str()))
    });
    if let Some(limit) = flags.limit {
        entries.truncate(usize::try_from(limit)?);
    }
    output(&entries, flags.format)
}
