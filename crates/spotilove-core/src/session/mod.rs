//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the persisted `Session` record and its storage keys
//! - `store`: `SecureStorage` and `SessionStore` traits

mod model;
mod store;

pub use model::{Session, keys};
pub use store::{SecureStorage, SessionStore};
