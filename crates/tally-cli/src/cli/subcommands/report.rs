use clap::Subcommand;

use crate::cli::root_commands::PeriodArgs;

/// Dashboard data series.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Error totals by category.
    Distribution {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Expected vs. actual quantity per audit.
    Comparison {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Error counters per audit.
    Trend {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Locations ranked by error count.
    Locations {
        #[command(flatten)]
        period: PeriodArgs,
        /// Rows to show (defaults to general.ranking_limit)
        #[arg(long)]
        top: Option<u32>,
    },
    /// Most recent audits with accuracy.
    Recent {
        #[command(flatten)]
        period: PeriodArgs,
        /// Rows to show (defaults to general.recent_count)
        #[arg(long)]
        count: Option<u32>,
    },
}
