use async_trait::async_trait;
use lift_core::{PresetRepository, RepositoryFactory, RepositoryRegistry, StoreConfig, StoreError};

use crate::memory::MemoryRepository;
use crate::toml_dir::TomlDirectoryRepository;

/// [`RepositoryFactory`] for the `"toml"` backend.
///
/// ```rust,no_run
/// use lift_core::RepositoryRegistry;
/// use lift_store::TomlRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(TomlRepositoryFactory));
/// ```
pub struct TomlRepositoryFactory;

#[async_trait]
impl RepositoryFactory for TomlRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "toml"
    }

    /// `config.location` is the store directory; it is created if missing.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn PresetRepository>, StoreError> {
        if config.location.trim().is_empty() {
            return Err(StoreError::Configuration(
                "the toml backend needs a store directory".to_string(),
            ));
        }
        let repo = TomlDirectoryRepository::open(&config.location).await?;
        Ok(Box::new(repo))
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend. `location` is ignored.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StoreConfig,
    ) -> Result<Box<dyn PresetRepository>, StoreError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}

/// Registers every backend this crate provides.
pub fn register_builtin_backends(registry: &mut RepositoryRegistry) {
    registry.register(Box::new(TomlRepositoryFactory));
    registry.register(Box::new(MemoryRepositoryFactory));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::new();
        register_builtin_backends(&mut registry);
        registry
    }

    #[test]
    fn builtin_backends_are_registered() {
        assert_eq!(registry().available_backends(), vec!["memory", "toml"]);
    }

    #[tokio::test]
    async fn memory_backend_opens_without_location() {
        let repo = registry()
            .create(&StoreConfig::default())
            .await
            .expect("memory backend should open");

        assert!(repo.list_presets().await.expect("Should list").is_empty());
    }

    #[tokio::test]
    async fn toml_backend_requires_location() {
        let config = StoreConfig {
            backend: "toml".to_string(),
            location: " ".to_string(),
        };

        let result = registry().create(&config).await;

        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn toml_backend_opens_directory() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StoreConfig {
            backend: "toml".to_string(),
            location: dir.path().join("store").display().to_string(),
        };

        let repo = registry().create(&config).await.expect("toml backend should open");

        assert!(repo.list_presets().await.expect("Should list").is_empty());
        assert!(dir.path().join("store/presets").is_dir());
    }
}
