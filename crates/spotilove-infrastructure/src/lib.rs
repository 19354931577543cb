//! Infrastructure layer for the SpotiLove client.
//!
//! File-backed secure storage, the session store built on top of it,
//! platform paths and configuration loading.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::SpotiLovePaths;
pub use session_store::SecureSessionStore;
pub use storage::{FileSecureStorage, InMemorySecureStorage};
