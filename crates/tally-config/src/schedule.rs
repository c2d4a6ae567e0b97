//! Schedule refresh settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default seconds between store polls in `schedule watch`.
const fn default_poll_interval_secs() -> u64 {
    5
}

/// Default audits required per class per month.
const fn default_monthly_target() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Target applied to entries added or seeded without an explicit one.
    #[serde(default = "default_monthly_target")]
    pub default_monthly_target: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            default_monthly_target: default_monthly_target(),
        }
    }
}

impl ScheduleConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "schedule.poll_interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_monthly_target == 0 {
            return Err(ConfigError::InvalidValue {
                field: "schedule.default_monthly_target".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_is_rejected() {
        let config = ScheduleConfig {
            poll_interval_secs: 0,
            ..ScheduleConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("schedule.poll_interval_secs"));
    }

    #[test]
    fn zero_target_is_rejected() {
        let config = ScheduleConfig {
            default_monthly_target: 0,
            ..ScheduleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
