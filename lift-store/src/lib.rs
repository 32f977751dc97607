pub mod factory;
pub mod memory;
pub mod toml_dir;

pub use factory::{MemoryRepositoryFactory, TomlRepositoryFactory, register_builtin_backends};
pub use memory::MemoryRepository;
pub use toml_dir::TomlDirectoryRepository;
