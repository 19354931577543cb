//! Profile domain module.
//!
//! # Module Structure
//!
//! - `model`: `Profile`, `MusicProfile` and swipe-card helpers
//! - `completeness`: the onboarding classifier

mod completeness;
mod model;

pub use completeness::{Completeness, classify};
pub use model::{MusicProfile, Profile, SwipeCandidate};
