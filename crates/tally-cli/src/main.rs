use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tally_config::PROJECT_DIR;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("tly error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    match &cli.command {
        cli::Commands::Init(args) => return commands::init::handle(args, &flags),
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let project_root = resolve_project_root(flags.project.as_deref(), flags.data_dir.is_some())?;
    let config = bootstrap::load_config(&project_root)?;
    context::warn_misconfigured(&config, &project_root);

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(write_lock::acquire_for_project(&project_root).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(project_root, config, flags.data_dir.as_deref())
        .context("failed to initialize tally application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Find the project root from `--project` or by walking up from the current
/// directory. With an explicit data directory, a directory without `.tally`
/// is accepted as the root.
fn resolve_project_root(
    project_override: Option<&str>,
    has_data_dir: bool,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.tally' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    if let Some(root) = context::find_project_root(&start) {
        return Ok(root);
    }
    if has_data_dir {
        return Ok(start);
    }
    anyhow::bail!("not a tally project (no .tally directory found). Run 'tly init' first.")
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{AuditCommands, ScheduleCommands};

    match command {
        cli::Commands::Audit { action } => {
            matches!(action, AuditCommands::Add(_) | AuditCommands::Delete { .. })
        }
        cli::Commands::Schedule { action } => matches!(
            action,
            ScheduleCommands::Add { .. }
                | ScheduleCommands::Update { .. }
                | ScheduleCommands::Remove { .. }
                | ScheduleCommands::Seed { .. }
                | ScheduleCommands::Refresh { .. }
        ),
        cli::Commands::Summary(_)
        | cli::Commands::Report { .. }
        | cli::Commands::Catalog { .. }
        | cli::Commands::Init(_)
        | cli::Commands::Schema(_) => false,
    }
}
