//! Application layer: the SpotiLove use cases.
//!
//! Each use case talks to the backend through `SpotiLoveApi`, persists
//! through `SessionStore` and reports to the user through `Presenter`.
//! Routing decisions come back as `Navigation` values for the front end
//! to act on.

pub mod artist_selection;
pub mod auth_usecase;
pub mod bootstrap;
pub mod chat_list;
pub mod in_flight;
pub mod presenter;
pub mod profile_setup;
pub mod song_selection;
pub mod swipe_feed;

#[cfg(test)]
mod test_support;

pub use artist_selection::{ArtistChoice, ArtistSelection};
pub use auth_usecase::AuthUseCase;
pub use bootstrap::{BootstrapOutcome, BootstrapPhase, ProfileBootstrap, RetryPolicy};
pub use chat_list::{ChatList, ChatSummary};
pub use in_flight::InFlight;
pub use presenter::Presenter;
pub use profile_setup::ProfileSetup;
pub use song_selection::{SongChoice, SongSelection};
pub use swipe_feed::SwipeFeed;
