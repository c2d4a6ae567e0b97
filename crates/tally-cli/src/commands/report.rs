use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::limit::effective_count;
use crate::commands::shared::period::{optional_period, today};
use crate::context::AppContext;
use crate::output::output;

/// Handle `tly report`.
pub fn handle(action: &ReportCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let general = &ctx.config.general;
    match action {
        ReportCommands::Distribution { period } => {
            let period = optional_period(period, today())?;
            output(&ctx.service.error_distribution(period)?, flags.format)
        }
        ReportCommands::Comparison { period } => {
            let period = optional_period(period, today())?;
            output(&ctx.service.quantity_comparison(period)?, flags.format)
        }
        ReportCommands::Trend { period } => {
            let period = optional_period(period, today())?;
            output(&ctx.service.error_trend(period)?, flags.format)
        }
        ReportCommands::Locations { period, top } => {
            let period = optional_period(period, today())?;
            let limit = effective_count(*top, flags.limit, general.ranking_limit);
            output(&ctx.service.location_ranking(period, limit)?, flags.format)
        }
        ReportCommands::Recent { period, count } => {
            let period = optional_period(period, today())?;
            let count = effective_count(*count, flags.limit, general.recent_count);
            output(&ctx.service.recent_audits(period, count)?, flags.format)
        }
    }
}
