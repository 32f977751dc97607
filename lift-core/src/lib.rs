pub mod calculations;
pub mod models;
pub mod session;
pub mod store;

pub use models::*;
pub use session::SessionState;
pub use store::{PresetRepository, RepositoryFactory, RepositoryRegistry, StoreConfig, StoreError};
