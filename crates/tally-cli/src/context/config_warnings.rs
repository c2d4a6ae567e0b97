use std::path::Path;

use tally_config::TallyConfig;

const ENV_PREFIX: &str = "TALLY_";
const SECTIONS: [&str; 4] = ["STORAGE", "SCHEDULE", "CATALOG", "GENERAL"];

/// Emit warnings for settings that silently fell back to defaults.
pub fn warn_misconfigured(config: &TallyConfig, project_root: &Path) {
    for warning in collect_warnings(config, project_root, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_warnings<I>(config: &TallyConfig, project_root: &Path, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();

    for (key, _) in env {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest.contains("__") {
            continue;
        }
        if let Some(section) = SECTIONS
            .iter()
            .find(|section| rest.starts_with(&format!("{section}_")))
        {
            let field = &rest[section.len() + 1..];
            warnings.push(format!(
                "{key} is ignored. Use double underscores (example: {ENV_PREFIX}{section}__{field})."
            ));
        }
    }

    if let Some(path) = config.catalog.resolve_classes_path(project_root) {
        if !path.exists() {
            warnings.push(format!(
                "catalog.classes_path points to {} which does not exist; using built-in classes only.",
                path.display()
            ));
        }
    }

    warnings
}
