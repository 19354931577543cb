//! Storage layer for atomic file operations and secure key-value stores.

mod atomic_toml;
mod file_secure_storage;
mod memory_storage;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_secure_storage::FileSecureStorage;
pub use memory_storage::InMemorySecureStorage;
