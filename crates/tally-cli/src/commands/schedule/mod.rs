mod add;
mod list;
mod refresh;
mod seed;
mod update;
mod watch;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ScheduleCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveResponse<'a> {
    id: &'a str,
    removed: bool,
}

/// Handle `tly schedule`.
pub async fn handle(
    action: &ScheduleCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ScheduleCommands::Add {
            code,
            name,
            category,
            warehouse,
            period,
            target,
        } => add::run(
            add::AddInput {
                code,
                name: name.as_deref(),
                category: category.as_deref(),
                warehouse: warehouse.as_deref(),
                target: *target,
            },
            period,
            ctx,
            flags,
        ),
        ScheduleCommands::Update {
            id,
            code,
            name,
            category,
            warehouse,
            period,
            target,
        } => update::run(
            id,
            update::UpdateInput {
                code: code.as_deref(),
                name: name.as_deref(),
                category: category.as_deref(),
                warehouse: warehouse.as_deref(),
                target: *target,
            },
            period,
            ctx,
            flags,
        ),
        ScheduleCommands::Remove { id } => {
            let removed = ctx.service.remove_schedule_entry(id)?;
            output(&RemoveResponse { id, removed }, flags.format)
        }
        ScheduleCommands::List { period, status } => {
            list::run(period, status.as_deref(), ctx, flags)
        }
        ScheduleCommands::Seed {
            period,
            category,
            target,
        } => seed::run(period, category.as_deref(), *target, ctx, flags),
        ScheduleCommands::Refresh { period } => refresh::run(period, ctx, flags),
        ScheduleCommands::Watch { period, interval } => {
            watch::run(period, *interval, ctx, flags).await
        }
    }
}
