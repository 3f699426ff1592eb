use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AppError;
use crate::settings::StampSettings;
use crate::stamp::SettingsStore;

const SETTINGS_FILE: &str = "data.json";

/// Default settings location: `<config_dir>/timestamper/data.json`.
pub(crate) fn default_settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("timestamper").join(SETTINGS_FILE))
}

/// Settings kept as a JSON document on disk.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<StampSettings, AppError> {
        debug!(target: "settings", "Loading Settings from {}", self.path.display());
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(target: "settings", "  no settings file, using defaults");
                return Ok(StampSettings::default());
            }
            Err(source) => {
                return Err(AppError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<StampSettings>(&content) {
            Ok(settings) => {
                settings.log_fields();
                Ok(settings)
            }
            Err(e) => {
                warn!(
                    target: "settings",
                    "Failed to parse {}: {}; using defaults",
                    self.path.display(),
                    e
                );
                Ok(StampSettings::default())
            }
        }
    }

    fn save(&self, settings: &StampSettings) -> Result<(), AppError> {
        debug!(target: "settings", "Saving Settings to {}", self.path.display());
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| AppError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(|source| AppError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(target: "settings", "  Done.");
        Ok(())
    }
}

/// In-memory store that records every save.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    initial: StampSettings,
    saves: std::cell::RefCell<Vec<StampSettings>>,
    fail_saves: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn with(initial: StampSettings) -> Self {
        MemoryStore {
            initial,
            ..MemoryStore::default()
        }
    }

    pub(crate) fn failing() -> Self {
        MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        }
    }

    pub(crate) fn saved(&self) -> Vec<StampSettings> {
        self.saves.borrow().clone()
    }
}

#[cfg(test)]
impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<StampSettings, AppError> {
        Ok(self.initial.clone())
    }

    fn save(&self, settings: &StampSettings) -> Result<(), AppError> {
        if self.fail_saves {
            return Err(AppError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "read-only store"),
            });
        }
        self.saves.borrow_mut().push(settings.clone());
        Ok(())
    }
}
