use std::path::{Path, PathBuf};

use tally_config::TallyConfig;
use tally_store::TallyService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TallyService,
    pub config: TallyConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the project's collections. A relative `--data-dir` resolves
    /// against the current directory.
    pub fn init(
        project_root: PathBuf,
        config: TallyConfig,
        data_dir: Option<&str>,
    ) -> anyhow::Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => Some(absolute(Path::new(dir))?),
            None => None,
        };
        let service = TallyService::open(&config, &project_root, data_dir);
        Ok(Self {
            service,
            config,
            project_root,
        })
    }

    /// Limit for list commands: `--limit`, else `general.default_limit`.
    #[must_use]
    pub fn default_limit(&self) -> u32 {
        self.config.general.default_limit
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
