use clap::Subcommand;

/// Class catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// List classes sorted by code.
    List {
        /// Category name (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Look up a class by code.
    Get { code: String },
}
