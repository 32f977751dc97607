//! One TOML file per preset under `<root>/presets/`, plus a single
//! `<root>/session.toml` cache.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use lift_core::{Preset, PresetRepository, SessionState, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

const PRESETS_DIR: &str = "presets";
const SESSION_FILE: &str = "session.toml";
const EXTENSION: &str = "toml";

pub struct TomlDirectoryRepository {
    root: PathBuf,
}

impl TomlDirectoryRepository {
    /// Opens `root`, creating it and the presets directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let repo = Self { root: root.into() };
        fs::create_dir_all(repo.presets_dir())
            .await
            .map_err(|e| io_error(&repo.presets_dir(), e))?;
        debug!(root = %repo.root.display(), "Opened TOML preset store");
        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn presets_dir(&self) -> PathBuf {
        self.root.join(PRESETS_DIR)
    }

    fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    fn preset_path(
        &self,
        name: &str,
    ) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.presets_dir().join(format!("{name}.{EXTENSION}")))
    }
}

/// Preset names become file names, so only a conservative character set
/// is accepted.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::Configuration(format!(
            "invalid preset name '{name}'; use letters, digits, '-' or '_'"
        )))
    }
}

fn io_error(
    path: &Path,
    err: std::io::Error,
) -> StoreError {
    StoreError::Io(format!("{}: {err}", path.display()))
}

async fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))
}

async fn write_toml<T: Serialize>(
    path: &Path,
    value: &T,
) -> Result<(), StoreError> {
    let text = toml::to_string_pretty(value)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;
    fs::write(path, text).await.map_err(|e| io_error(path, e))
}

#[async_trait]
impl PresetRepository for TomlDirectoryRepository {
    async fn list_presets(&self) -> Result<Vec<String>, StoreError> {
        let dir = self.presets_dir();
        let mut entries = fs::read_dir(&dir).await.map_err(|e| io_error(&dir, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, e))? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get_preset(
        &self,
        name: &str,
    ) -> Result<Preset, StoreError> {
        let path = self.preset_path(name)?;
        let mut preset: Preset = read_toml(&path)
            .await?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        // The file name is authoritative.
        preset.name = name.to_string();
        Ok(preset)
    }

    async fn save_preset(
        &self,
        preset: &Preset,
    ) -> Result<(), StoreError> {
        let path = self.preset_path(&preset.name)?;
        write_toml(&path, preset).await?;
        debug!(preset = %preset.name, path = %path.display(), "Saved preset");
        Ok(())
    }

    async fn delete_preset(
        &self,
        name: &str,
    ) -> Result<(), StoreError> {
        let path = self.preset_path(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    async fn load_session(&self) -> Result<Option<SessionState>, StoreError> {
        read_toml(&self.session_path()).await
    }

    async fn save_session(
        &self,
        session: &SessionState,
    ) -> Result<(), StoreError> {
        let stamped = SessionState {
            saved_at: Some(Utc::now()),
            ..session.clone()
        };
        write_toml(&self.session_path(), &stamped).await
    }

    async fn clear_session(&self) -> Result<(), StoreError> {
        let path = self.session_path();
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(&path, e)),
            _ => Ok(()),
        }
    }
}
