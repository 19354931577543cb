//! Authentication domain module.

mod callback;

pub use callback::{AuthCallback, CallbackParser};
