//! # configs
//!
//! Layered settings for the portal binary: built-in defaults, then an
//! optional TOML file, then `LF__*` environment variables
//! (`LF__SERVER__PORT=9000`, `LF__STORAGE__DATA_DIR=/var/lib/lf`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// File read when `LF_CONFIG` is not set. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "lost-found.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the slot file.
    pub data_dir: PathBuf,
    /// Slot name; the file is `<slot>.json`.
    pub slot: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaSettings {
    /// Uploads above this size are submitted without the image.
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub media: MediaSettings,
}

impl Settings {
    /// Reads the config file named by `LF_CONFIG` (or `lost-found.toml`),
    /// then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("LF_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(Some(Path::new(&file)), None)
    }

    /// Builds settings from an optional file and an explicit environment
    /// map (`None` reads the real process environment).
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("storage.data_dir", "./data")?
            .set_default("storage.slot", "lf_items_v1")?
            .set_default("media.max_image_bytes", 5 * 1024 * 1024)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("LF")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        log::debug!("settings: {:?}", settings);
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let slot = &self.storage.slot;
        if slot.is_empty() || slot.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                key: "storage.slot",
                reason: format!("{slot:?} must be a plain file stem"),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}
