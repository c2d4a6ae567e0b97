use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{AuditCommands, CatalogCommands, ReportCommands, ScheduleCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize tally for a project.
    Init(InitArgs),
    /// Audit records.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Summary totals and accuracy over stored audits.
    Summary(PeriodArgs),
    /// Dashboard data series.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Monthly class audit schedule.
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommands,
    },
    /// Class catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Print the JSON schema of a stored entity.
    Schema(SchemaArgs),
}

/// Arguments for `tly init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file with defaults.
    #[arg(long)]
    pub force: bool,
}

/// Optional (month, year) period. A month without a year means the current
/// year.
#[derive(Clone, Debug, Default, Args)]
pub struct PeriodArgs {
    /// Month (1-12)
    #[arg(long)]
    pub month: Option<u32>,
    /// Four-digit year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Arguments for `tly schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub entity: SchemaEntity,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaEntity {
    Audit,
    Draft,
    Schedule,
    Class,
    Summary,
}
