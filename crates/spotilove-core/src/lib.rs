//! Core domain layer of the SpotiLove client.
//!
//! Holds the models, the error type, the traits the outer layers implement
//! (`SpotiLoveApi`, `SecureStorage`, `SessionStore`) and the pure onboarding
//! logic: callback parsing, completeness classification and routing.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod music;
pub mod navigation;
pub mod profile;
pub mod session;
pub mod validation;

pub use error::{Result, SpotiLoveError};
