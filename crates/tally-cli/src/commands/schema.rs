use schemars::schema_for;
use tally_core::catalog::CatalogEntry;
use tally_core::entities::{AuditDraft, AuditRecord, ScheduleEntry};
use tally_core::summary::SummaryTotals;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaEntity};
use crate::output::output;

/// Handle `tly schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_of(args.entity), flags.format)
}

fn schema_of(entity: SchemaEntity) -> schemars::Schema {
    match entity {
        SchemaEntity::Audit => schema_for!(AuditRecord),
        SchemaEntity::Draft => schema_for!(AuditDraft),
        SchemaEntity::Schedule => schema_for!(ScheduleEntry),
        SchemaEntity::Class => schema_for!(CatalogEntry),
        SchemaEntity::Summary => schema_for!(SummaryTotals),
    }
}
