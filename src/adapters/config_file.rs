//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] by reading a [`PetConfig`] from a JSON file.
//! Missing fields keep their defaults; the loaded value is validated
//! before it is returned.

use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PetConfig;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("config: reading {} failed: {e}", self.path.display());
                ConfigError::IoError
            }
        })?;
        let config: PetConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("config: {} is not valid: {e}", self.path.display());
            ConfigError::Corrupted
        })?;
        config.validate()?;
        info!("config: loaded {}", self.path.display());
        Ok(config)
    }
}
