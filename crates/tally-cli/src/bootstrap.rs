use std::path::Path;

use anyhow::Context;
use tally_config::TallyConfig;

/// Load the project's `.env` (if any) and then the layered configuration.
pub fn load_config(project_root: &Path) -> anyhow::Result<TallyConfig> {
    load_project_dotenv(project_root)?;
    TallyConfig::load_from(project_root).with_context(|| {
        format!(
            "failed to load configuration for {}",
            project_root.display()
        )
    })
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}
