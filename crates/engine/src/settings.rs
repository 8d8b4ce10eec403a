//! Slot-value persistence.
//!
//! The five raw slot values live in a small JSON file in the standard
//! configuration directory (`~/.config/softnav/settings.json` on most
//! platforms). The file is re-read on construction and on every
//! reorientation; a missing file means defaults, and a malformed file
//! degrades to defaults with a warning rather than failing the bar.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use softnav_types::{SlotPosition, SlotValues};
use thiserror::Error;
use tracing::warn;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "SOFTNAV_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Error surfaced when reading or writing slot settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("settings serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Anything that can supply the five raw slot values on demand.
///
/// The bar re-reads its source on construction and on every explicit
/// reorientation, so implementations should return current values each call.
pub trait SettingsSource {
    fn reload(&mut self) -> SlotValues;
}

/// Fixed in-memory source. Useful for tests and non-persistent previews.
impl SettingsSource for SlotValues {
    fn reload(&mut self) -> SlotValues {
        *self
    }
}

/// JSON-file-backed slot settings store.
#[derive(Debug)]
pub struct SlotSettings {
    path: PathBuf,
    values: SlotValues,
    persist_to_disk: bool,
}

impl SlotSettings {
    /// Creates a store at the default path (env override respected).
    pub fn new() -> Result<SlotSettings, SettingsError> {
        SlotSettings::at(default_settings_path())
    }

    /// Creates a store rooted at the provided path.
    pub fn at(path: PathBuf) -> Result<SlotSettings, SettingsError> {
        let values = load_values(&path)?;
        Ok(SlotSettings {
            path,
            values,
            persist_to_disk: true,
        })
    }

    /// In-memory store used as a fallback when the config directory cannot
    /// be accessed.
    pub fn ephemeral() -> SlotSettings {
        SlotSettings {
            path: PathBuf::new(),
            values: SlotValues::default(),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last loaded values.
    pub fn values(&self) -> SlotValues {
        self.values
    }

    /// Persists a new raw value for one slot.
    pub fn set_slot(&mut self, position: SlotPosition, raw: u8) -> Result<(), SettingsError> {
        self.values.set(position, raw);
        if self.persist_to_disk {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl SettingsSource for SlotSettings {
    fn reload(&mut self) -> SlotValues {
        if self.persist_to_disk {
            match load_values(&self.path) {
                Ok(values) => self.values = values,
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        error = %error,
                        "Failed to reload slot settings; keeping last values"
                    );
                }
            }
        }
        self.values
    }
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("softnav")
        .join(SETTINGS_FILE_NAME)
}

fn load_values(path: &Path) -> Result<SlotValues, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(values) => Ok(values),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse slot settings; using defaults"
                );
                Ok(SlotValues::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(SlotValues::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}
