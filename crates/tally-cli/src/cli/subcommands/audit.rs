use clap::{Args, Subcommand};

use crate::cli::root_commands::PeriodArgs;

/// Audit record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Record an audit from flags or a JSON draft file.
    Add(AuditAddArgs),
    /// List audits, newest first.
    List {
        /// Location substring (case-insensitive)
        #[arg(long)]
        location: Option<String>,
        /// rua|classe|produto (or street|class|product)
        #[arg(long)]
        entry_type: Option<String>,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Get an audit by ID.
    Get { id: String },
    /// Delete an audit by ID. Unknown IDs are a no-op.
    Delete { id: String },
}

/// Arguments for `tly audit add`.
#[derive(Clone, Debug, Default, Args)]
pub struct AuditAddArgs {
    /// Audit date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub auditor: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    /// rua|classe|produto (or street|class|product)
    #[arg(long)]
    pub entry_type: Option<String>,
    /// Count the sector's batch-related counters
    #[arg(long)]
    pub uses_batches: bool,
    /// Line item: CODE:NAME:EXPECTED:ACTUAL[:nf=N,ur=N,wl=N,qm=N]
    #[arg(long = "item")]
    pub items: Vec<String>,
    #[arg(long)]
    pub sector_name: Option<String>,
    #[arg(long)]
    pub sector_total: Option<u32>,
    #[arg(long)]
    pub sector_expected: Option<u32>,
    #[arg(long)]
    pub sector_found: Option<u32>,
    #[arg(long)]
    pub sector_not_found_batches: Option<u32>,
    #[arg(long)]
    pub sector_unregistered_boxes: Option<u32>,
    #[arg(long)]
    pub sector_wrong_location_boxes: Option<u32>,
    #[arg(long)]
    pub sector_quantity_mismatches: Option<u32>,
    #[arg(long)]
    pub sector_notes: Option<String>,
    /// Read the whole draft from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["items", "date", "auditor", "location", "entry_type", "sector_name"])]
    pub from_file: Option<String>,
}
