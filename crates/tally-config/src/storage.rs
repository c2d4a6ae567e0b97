//! Key-value store location and collection keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PROJECT_DIR};

fn default_audits_key() -> String {
    "audits".to_string()
}

fn default_schedule_key() -> String {
    "schedule".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one `<key>.json` file per collection. Empty means
    /// `<project>/.tally/data`; relative paths resolve against the project.
    #[serde(default)]
    pub data_dir: String,

    /// Key of the audit record collection.
    #[serde(default = "default_audits_key")]
    pub audits_key: String,

    /// Key of the schedule entry collection.
    #[serde(default = "default_schedule_key")]
    pub schedule_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            audits_key: default_audits_key(),
            schedule_key: default_schedule_key(),
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory for a project.
    #[must_use]
    pub fn resolve_data_dir(&self, project_root: &Path) -> PathBuf {
        let configured = self.data_dir.trim();
        if configured.is_empty() {
            return project_root.join(PROJECT_DIR).join("data");
        }
        let path = PathBuf::from(configured);
        if path.is_absolute() {
            path
        } else {
            project_root.join(path)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, key) in [
            ("storage.audits_key", &self.audits_key),
            ("storage.schedule_key", &self.schedule_key),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            if key.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not contain path separators".to_string(),
                });
            }
        }
        if self.audits_key == self.schedule_key {
            return Err(ConfigError::InvalidValue {
                field: "storage.schedule_key".to_string(),
                reason: "must differ from storage.audits_key".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_dir_defaults_under_project() {
        let config = StorageConfig::default();
        assert_eq!(
            config.resolve_data_dir(Path::new("/p")),
            PathBuf::from("/p/.tally/data")
        );
    }

    #[test]
    fn relative_data_dir_resolves_against_project() {
        let config = StorageConfig {
            data_dir: "store".into(),
            ..StorageConfig::default()
        };
        assert_eq!(config.resolve_data_dir(Path::new("/p")), PathBuf::from("/p/store"));
    }

    #[test]
    fn absolute_data_dir_is_kept() {
        let config = StorageConfig {
            data_dir: "/var/lib/tally".into(),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.resolve_data_dir(Path::new("/p")),
            PathBuf::from("/var/lib/tally")
        );
    }

    #[test]
    fn rejects_clashing_keys() {
        let config = StorageConfig {
            schedule_key: "audits".into(),
            ..StorageConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_keys_with_separators() {
        let config = StorageConfig {
            audits_key: "../audits".into(),
            ..StorageConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
