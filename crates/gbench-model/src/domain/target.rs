use serde::{Deserialize, Serialize};

use super::ConfigError;

/// The external binary and the global flags every invocation carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Program to spawn (path or name resolved via `PATH`).
    pub bin_path: String,
    /// Value of `--store`.
    pub store_path: String,
    /// Value of `--driver`; the flag is omitted when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    /// Value of `--log-level`.
    pub log_level: String,
}

impl Target {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bin_path.trim().is_empty() {
            return Err(ConfigError::EmptyBinary);
        }
        if self.store_path.trim().is_empty() {
            return Err(ConfigError::EmptyStore);
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }
        Ok(())
    }
}

impl Default for Target {
    fn default() -> Self {
        Self {
            bin_path: "grootfs".to_string(),
            store_path: "/var/lib/grootfs".to_string(),
            driver: None,
            log_level: "debug".to_string(),
        }
    }
}
