use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{model::HOME_ENV, Config, ConfigError};

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "spending-tracker";
const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base).map_err(ConfigError::io(&base))?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    /// `$SPENDING_TRACKER_HOME`, else the platform config dir, else home, else `.`.
    pub fn default_base_dir() -> PathBuf {
        if let Some(path) = std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|base| base.join(APP_DIR))
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file yields [`Config::default`].
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data =
                fs::read_to_string(&self.config_path).map_err(ConfigError::io(&self.config_path))?;
            serde_json::from_str(&data).map_err(|source| ConfigError::Malformed {
                path: self.config_path.clone(),
                source,
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_file(&tmp, &json).map_err(ConfigError::io(&tmp))?;
        fs::rename(&tmp, &self.config_path).map_err(ConfigError::io(&self.config_path))?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
