use tally_core::catalog::CatalogEntry;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CatalogCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tly catalog`.
pub fn handle(action: &CatalogCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = ctx.service.catalog();
    match action {
        CatalogCommands::List { category } => {
            output(&catalog.entries(category.as_deref()), flags.format)
        }
        CatalogCommands::Get { code } => {
            let info = catalog
                .get(code)
                .ok_or_else(|| anyhow::anyhow!("unknown class code '{code}'"))?;
            output(
                &CatalogEntry {
                    code: code.trim().to_string(),
                    info: info.clone(),
                },
                flags.format,
            )
        }
    }
}
