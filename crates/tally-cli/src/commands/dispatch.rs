use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Audit { action } => commands::audit::handle(&action, ctx, flags),
        Commands::Summary(args) => commands::summary::handle(&args, ctx, flags),
        Commands::Report { action } => commands::report::handle(&action, ctx, flags),
        Commands::Schedule { action } => commands::schedule::handle(&action, ctx, flags).await,
        Commands::Catalog { action } => commands::catalog::handle(&action, ctx, flags),
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run without a project context")
        }
    }
}
