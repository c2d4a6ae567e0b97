//! Class catalog overlay location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON file merged over the built-in classes. Empty means built-in only.
    #[serde(default)]
    pub classes_path: String,
}

impl CatalogConfig {
    /// Overlay path resolved against the project root, if one is configured.
    #[must_use]
    pub fn resolve_classes_path(&self, project_root: &Path) -> Option<PathBuf> {
        let configured = self.classes_path.trim();
        if configured.is_empty() {
            return None;
        }
        let path = PathBuf::from(configured);
        Some(if path.is_absolute() {
            path
        } else {
            project_root.join(path)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_means_builtin_only() {
        assert_eq!(
            CatalogConfig::default().resolve_classes_path(Path::new("/p")),
            None
        );
    }

    #[test]
    fn relative_path_resolves_against_project() {
        let config = CatalogConfig {
            classes_path: ".tally/classes.json".into(),
        };
        assert_eq!(
            config.resolve_classes_path(Path::new("/p")),
            Some(PathBuf::from("/p/.tally/classes.json"))
        );
    }
}
