mod add;
mod item_spec;

use serde::Serialize;
use tally_store::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::commands::shared::limit::effective_count;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::period::{optional_period, today};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteResponse<'a> {
    id: &'a str,
    deleted: bool,
}

/// Handle `tly audit`.
pub fn handle(action: &AuditCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuditCommands::Add(args) => add::run(args, ctx, flags),
        AuditCommands::List {
            location,
            entry_type,
            period,
        } => {
            let filter = AuditFilter {
                location: location.clone(),
                entry_type: entry_type
                    .as_deref()
                    .map(|raw| parse_enum(raw, "entry type"))
                    .transpose()?,
                period: optional_period(period, today())?,
            };
            let limit = effective_count(None, flags.limit, ctx.default_limit());
            output(&ctx.service.list_audits(&filter, limit)?, flags.format)
        }
        AuditCommands::Get { id } => output(&ctx.service.get_audit(id)?, flags.format),
        AuditCommands::Delete { id } => {
            let deleted = ctx.service.delete_audit(id)?;
            output(&DeleteResponse { id, deleted }, flags.format)
        }
    }
}
