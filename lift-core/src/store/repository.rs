use async_trait::async_trait;
use thiserror::Error;

use crate::{Preset, SessionState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[async_trait]
pub trait PresetRepository: Send + Sync {
    // Presets
    async fn list_presets(&self) -> Result<Vec<String>, StoreError>;

    async fn get_preset(
        &self,
        name: &str,
    ) -> Result<Preset, StoreError>;

    /// Inserts or replaces the preset with the same name.
    async fn save_preset(
        &self,
        preset: &Preset,
    ) -> Result<(), StoreError>;

    async fn delete_preset(
        &self,
        name: &str,
    ) -> Result<(), StoreError>;

    // Session cache
    /// `Ok(None)` when nothing has been cached yet.
    async fn load_session(&self) -> Result<Option<SessionState>, StoreError>;

    async fn save_session(
        &self,
        session: &SessionState,
    ) -> Result<(), StoreError>;

    async fn clear_session(&self) -> Result<(), StoreError>;
}
