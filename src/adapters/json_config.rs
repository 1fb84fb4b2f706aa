//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a JSON file. Missing fields take their
//! defaults; a missing file yields [`SimConfig::default()`]. Configuration
//! is validated on both load and save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SimConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SimConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "JsonConfigFile: {} not found, using defaults",
                    self.path.display()
                );
                return Ok(SimConfig::default());
            }
            Err(e) => return Err(ConfigError::Io(e.kind())),
        };

        let cfg: SimConfig = serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &SimConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        fs::write(&self.path, json + "\n").map_err(|e| ConfigError::Io(e.kind()))?;
        info!("JsonConfigFile: saved {}", self.path.display());
        Ok(())
    }
}
