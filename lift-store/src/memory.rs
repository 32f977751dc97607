use std::collections::BTreeMap;

use async_trait::async_trait;
use lift_core::{Preset, PresetRepository, SessionState, StoreError};
use tokio::sync::RwLock;

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    presets: RwLock<BTreeMap<String, Preset>>,
    session: RwLock<Option<SessionState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresetRepository for MemoryRepository {
    async fn list_presets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.presets.read().await.keys().cloned().collect())
    }

    async fn get_preset(
        &self,
        name: &str,
    ) -> Result<Preset, StoreError> {
        self.presets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn save_preset(
        &self,
        preset: &Preset,
    ) -> Result<(), StoreError> {
        self.presets
            .write()
            .await
            .insert(preset.name.clone(), preset.clone());
        Ok(())
    }

    async fn delete_preset(
        &self,
        name: &str,
    ) -> Result<(), StoreError> {
        self.presets
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    async fn load_session(&self) -> Result<Option<SessionState>, StoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn save_session(
        &self,
        session: &SessionState,
    ) -> Result<(), StoreError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StoreError> {
        *self.session.write().await = None;
        Ok(())
    }
}
