use std::fs;
use std::io;
use std::path::Path;

use crate::state::settings::FieldSettings;

#[derive(Debug)]
pub enum SettingsIoError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SettingsIoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsIoError::Io(e) => write!(f, "IO error: {e}"),
            SettingsIoError::Parse(e) => write!(f, "Settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsIoError {}

impl From<io::Error> for SettingsIoError {
    fn from(e: io::Error) -> Self {
        SettingsIoError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsIoError {
    fn from(e: serde_json::Error) -> Self {
        SettingsIoError::Parse(e)
    }
}

/// Field settings from a JSON file; a missing file means defaults.
pub fn load_settings(path: &Path) -> Result<FieldSettings, SettingsIoError> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(FieldSettings::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_settings(path: &Path, settings: &FieldSettings) -> Result<(), SettingsIoError> {
    let content = serde_json::to_string_pretty(settings)?;
    super::atomic_write_string(path, &content)?;
    Ok(())
}
