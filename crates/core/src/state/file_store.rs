//! JSON file persistence collaborator.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, error};
use serde_json::Value;

use super::{AppBlob, StateStoreTrait};
use crate::errors::{Error, Result, ValidationError};

/// Stores the application state blob as a single pretty-printed JSON file.
///
/// A missing file loads as an empty blob. Saves go to a sibling temporary
/// file that is then renamed over the target, so readers never observe a
/// partially written blob.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStateStore { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl StateStoreTrait for JsonFileStateStore {
    fn load(&self) -> Result<AppBlob> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("State file {} not found, starting empty", self.path.display());
                return Ok(AppBlob::new());
            }
            Err(e) => {
                error!("Failed to read state file {}: {}", self.path.display(), e);
                return Err(e.into());
            }
        };

        if contents.trim().is_empty() {
            return Ok(AppBlob::new());
        }

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(blob) => Ok(blob),
            _ => Err(Error::Validation(ValidationError::MalformedState(format!(
                "state file {} does not contain a JSON object",
                self.path.display()
            )))),
        }
    }

    fn save(&self, blob: &AppBlob) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(blob)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            error!("Failed to replace state file {}: {}", self.path.display(), e);
            Error::from(e)
        })?;
        Ok(())
    }
}
