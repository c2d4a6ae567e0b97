use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tally_config::{PROJECT_DIR, TallyConfig};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InitResponse {
    project_root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_written: bool,
}

/// Handle `tly init`: create `.tally/` with a default config and data dir.
pub fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match flags.project.as_deref() {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = init_project(&root, args.force)?;
    output(&response, flags.format)
}

fn init_project(root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = TallyConfig::project_config_path(root);
    let config_written = if config_path.exists() && !force {
        tracing::info!(path = %config_path.display(), "keeping existing config");
        false
    } else {
        let text = toml::to_string_pretty(&TallyConfig::default())
            .context("failed to serialize default config")?;
        std::fs::write(&config_path, text)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        true
    };

    let config = TallyConfig::load_from(root).context("failed to load project config")?;
    let data_dir = config.storage.resolve_data_dir(root);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    Ok(InitResponse {
        project_root: root.to_path_buf(),
        config_path,
        data_dir,
        config_written,
    })
}

#[cfg(test)]
mod tests {
    use tally_config::TallyConfig;

    use super::init_project;

    #[test]
    fn creates_layout_and_default_config() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let response = init_project(temp.path(), false).expect("init should succeed");

        assert!(response.config_written);
        assert!(temp.path().join(".tally/config.toml").is_file());
        assert!(response.data_dir.is_dir());

        let text = std::fs::read_to_string(&response.config_path).expect("config should read");
        let parsed: TallyConfig = toml::from_str(&text).expect("config should parse");
        assert_eq!(parsed, TallyConfig::default());
    }

    #[test]
    fn keeps_existing_config_without_force() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".tally")).expect(".tally should create");
        let config_path = temp.path().join(".tally/config.toml");
        std::fs::write(&config_path, "[general]\ndefault_limit = 7\n").expect("config should write");

        let response = init_project(temp.path(), false).expect("init should succeed");
        assert!(!response.config_written);
        let text = std::fs::read_to_string(&config_path).expect("config should read");
        assert!(text.contains("default_limit = 7"));

        let forced = init_project(temp.path(), true).expect("forced init should succeed");
        assert!(forced.config_written);
        let text = std::fs::read_to_string(&config_path).expect("config should read");
        assert!(!text.contains("default_limit = 7"));
    }
}
