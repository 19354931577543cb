//! Basic profile completion: age, gender, interest and bio.

use crate::in_flight::InFlight;
use crate::presenter::Presenter;
use spotilove_core::api::{ApiError, SpotiLoveApi};
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::navigation::{Navigation, Notice, Screen};
use spotilove_core::validation::BasicProfileForm;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct ProfileSetup {
    api: Arc<dyn SpotiLoveApi>,
    presenter: Arc<dyn Presenter>,
    in_flight: InFlight,
}

impl ProfileSetup {
    pub fn new(api: Arc<dyn SpotiLoveApi>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            api,
            presenter,
            in_flight: InFlight::new("Profile update"),
        }
    }

    /// Validates and submits the form, then moves on to artist selection.
    pub async fn submit(&self, user_id: Uuid, form: &BasicProfileForm) -> Result<Navigation> {
        let update = form.validate()?;
        let _guard = self.in_flight.begin()?;

        if let Err(e) = self.api.update_basic_profile(user_id, &update).await {
            warn!("Basic profile update failed: {}", e);
            let detail = match &e {
                ApiError::Status { body, .. } if !body.trim().is_empty() => body.clone(),
                other => other.to_string(),
            };
            self.presenter.notify(Notice::error(
                "Error",
                format!("Failed to update profile: {}", detail),
            ));
            return Err(SpotiLoveError::from(e));
        }

        info!("Basic profile saved for {}", user_id);
        Ok(Navigation::with_notice(
            Screen::ArtistSelection { user_id },
            Notice::info("Success", "Profile updated! Let's find your music taste."),
        ))
    }

    /// Leaves the basic fields for later.
    pub fn skip(&self, user_id: Uuid) -> Navigation {
        Navigation::to(Screen::ArtistSelection { user_id })
    }
}
