use std::{ffi::OsString, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides every other data directory source.
pub const HOME_ENV: &str = "SPENDING_TRACKER_HOME";

const DEFAULT_CURRENCY_SYMBOL: &str = "₹";
const APP_DIR: &str = "spending-tracker";

/// Stores user-configurable preferences for the tracker host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    /// Whether the remote mirror is reachable and should receive writes.
    #[serde(default)]
    pub remote_enabled: bool,
    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the snapshot file.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            remote_enabled: false,
            color_enabled: Self::default_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        DEFAULT_CURRENCY_SYMBOL.into()
    }

    pub fn default_color_enabled() -> bool {
        true
    }

    /// Directory holding the snapshot file, honouring [`HOME_ENV`] first.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.resolve_data_dir_from(std::env::var_os(HOME_ENV))
    }

    pub fn resolve_data_dir_from(&self, env_override: Option<OsString>) -> PathBuf {
        if let Some(path) = env_override.filter(|value| !value.is_empty()) {
            return PathBuf::from(path);
        }
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        dirs::data_dir()
            .map(|base| base.join(APP_DIR))
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
