use tally_core::entities::NewScheduleEntry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{period_or_current, today};
use crate::context::AppContext;
use crate::output::output;

pub struct AddInput<'a> {
    pub code: &'a str,
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub warehouse: Option<&'a str>,
    pub target: Option<u32>,
}

pub fn run(
    input: AddInput<'_>,
    period: &PeriodArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let entry = NewScheduleEntry {
        class_code: input.code.to_string(),
        class_name: input.name.unwrap_or_default().to_string(),
        category: input.category.unwrap_or_default().to_string(),
        warehouse: input.warehouse.unwrap_or_default().to_string(),
        period: period_or_current(period, today())?,
        monthly_target: input.target.unwrap_or_else(|| ctx.service.default_target()),
    };
    output(&ctx.service.add_schedule_entry(entry)?, flags.format)
}
