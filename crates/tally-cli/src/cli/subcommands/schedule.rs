use clap::Subcommand;

use crate::cli::root_commands::PeriodArgs;

/// Schedule entry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ScheduleCommands {
    /// Schedule a class for a month.
    Add {
        /// Class code
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        warehouse: Option<String>,
        #[command(flatten)]
        period: PeriodArgs,
        /// Audits required in the month
        #[arg(long)]
        target: Option<u32>,
    },
    /// Update a schedule entry.
    Update {
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        warehouse: Option<String>,
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        target: Option<u32>,
    },
    /// Remove a schedule entry. Unknown IDs are a no-op.
    Remove { id: String },
    /// List entries with freshly computed status.
    List {
        #[command(flatten)]
        period: PeriodArgs,
        /// pending|in_progress|completed|overdue
        #[arg(long)]
        status: Option<String>,
    },
    /// Schedule every catalog class (optionally one category) for a month.
    Seed {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        target: Option<u32>,
    },
    /// Recompute a month's statuses and store them.
    Refresh {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Keep a month's statuses current until interrupted.
    Watch {
        #[command(flatten)]
        period: PeriodArgs,
        /// Poll interval in seconds (defaults to schedule.poll_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },
}
