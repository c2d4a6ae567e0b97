use tally_store::updates::schedule::{ScheduleEntryUpdate, ScheduleEntryUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PeriodArgs;
use crate::commands::shared::period::{optional_period, today};
use crate::context::AppContext;
use crate::output::output;

pub struct UpdateInput<'a> {
    pub code: Option<&'a str>,
    pub name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub warehouse: Option<&'a str>,
    pub target: Option<u32>,
}

pub fn run(
    id: &str,
    input: UpdateInput<'_>,
    period: &PeriodArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let update = build_update(&input, period)?;
    if update.is_empty() {
        tracing::warn!(id, "no fields to update");
    }
    output(&ctx.service.update_schedule_entry(id, update)?, flags.format)
}

fn build_update(input: &UpdateInput<'_>, period: &PeriodArgs) -> anyhow::Result<ScheduleEntryUpdate> {
    let mut builder = ScheduleEntryUpdateBuilder::new();
    if let Some(code) = input.code {
        builder = builder.class_code(code);
    }
    if let Some(name) = input.name {
        builder = builder.class_name(name);
    }
    if let Some(category) = input.category {
        builder = builder.category(category);
    }
    if let Some(warehouse) = input.warehouse {
        builder = builder.warehouse(warehouse);
    }
    if let Some(period) = optional_period(period, today())? {
        builder = builder.period(period);
    }
    if let Some(target) = input.target {
        builder = builder.monthly_target(target);
    }
    Ok(builder.build())
}
