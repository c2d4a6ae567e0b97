use anyhow::Context;
use chrono::NaiveDate;
use tally_core::entities::{AuditDraft, SectorSummary};
use tally_core::enums::EntryType;

use super::item_spec::parse_item;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditAddArgs;
use crate::commands::shared::parse::{parse_date, parse_enum};
use crate::commands::shared::period::today;
use crate::context::AppContext;
use crate::output::output;

pub fn run(args: &AuditAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = match args.from_file.as_deref() {
        Some(path) => read_draft(path)?,
        None => draft_from_args(args, today())?,
    };
    let record = ctx.service.save_audit(draft)?;
    output(&record, flags.format)
}

fn read_draft(path: &str) -> anyhow::Result<AuditDraft> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("invalid audit draft in {path}"))
}

fn draft_from_args(args: &AuditAddArgs, today: NaiveDate) -> anyhow::Result<AuditDraft> {
    let date = args.date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
    let mut draft = AuditDraft::new(date);
    draft.auditor = args.auditor.clone().unwrap_or_default();
    draft.location = args.location.clone().unwrap_or_default();
    draft.entry_type = args
        .entry_type
        .as_deref()
        .map(|raw| parse_enum::<EntryType>(raw, "entry type"))
        .transpose()?
        .unwrap_or_default();
    draft.uses_batches = args.uses_batches;
    draft.items = args
        .items
        .iter()
        .map(|spec| parse_item(spec))
        .collect::<anyhow::Result<Vec<_>>>()?;
    draft.sector_info = sector_from_args(args);
    Ok(draft)
}

/// A sector summary when any `--sector-*` flag was given.
fn sector_from_args(args: &AuditAddArgs) -> Option<SectorSummary> {
    let any_count = [
        args.sector_total,
        args.sector_expected,
        args.sector_found,
        args.sector_not_found_batches,
        args.sector_unregistered_boxes,
        args.sector_wrong_location_boxes,
        args.sector_quantity_mismatches,
    ]
    .iter()
    .any(Option::is_some);
    if !any_count && args.sector_name.is_none() && args.sector_notes.is_none() {
        return None;
    }

    Some(SectorSummary {
        sector_name: args.sector_name.clone().unwrap_or_default(),
        total_components: args.sector_total.unwrap_or_default(),
        expected_components: args.sector_expected.unwrap_or_default(),
        found_components: args.sector_found.unwrap_or_default(),
        not_found_batches: args.sector_not_found_batches.unwrap_or_default(),
        unregistered_boxes: args.sector_unregistered_boxes.unwrap_or_default(),
        wrong_location_boxes: args.sector_wrong_location_boxes.unwrap_or_default(),
        quantity_mismatches: args.sector_quantity_mismatches.unwrap_or_default(),
        notes: args.sector_notes.clone().unwrap_or_default(),
    })
}
