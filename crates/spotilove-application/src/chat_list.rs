//! Chat list built from the user's matches.

use spotilove_core::api::SpotiLoveApi;
use spotilove_core::error::Result;
use spotilove_core::profile::Profile;
use spotilove_core::session::Session;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_PROFILE_IMAGE: &str = "default_user.png";
pub const MATCHED_MESSAGE: &str = "You matched! Say hi 👋";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub user_id: Uuid,
    pub name: String,
    pub profile_image: String,
    pub last_message: String,
    pub has_unread: bool,
}

impl From<&Profile> for ChatSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id,
            name: profile.display_name().to_string(),
            profile_image: profile
                .primary_image()
                .unwrap_or(DEFAULT_PROFILE_IMAGE)
                .to_string(),
            last_message: MATCHED_MESSAGE.to_string(),
            has_unread: false,
        }
    }
}

pub struct ChatList {
    api: Arc<dyn SpotiLoveApi>,
    chats: Vec<ChatSummary>,
}

impl ChatList {
    pub fn new(api: Arc<dyn SpotiLoveApi>) -> Self {
        Self {
            api,
            chats: Vec::new(),
        }
    }

    pub async fn load(&mut self, session: &Session) -> Result<&[ChatSummary]> {
        let matches = self.api.fetch_matches(session.user_id).await.map_err(|e| {
            warn!("Loading matches failed: {}", e);
            e
        })?;
        debug!("{} matches for {}", matches.len(), session.user_id);
        self.chats = matches.iter().map(ChatSummary::from).collect();
        Ok(&self.chats)
    }

    pub fn chats(&self) -> &[ChatSummary] {
        &self.chats
    }

    /// Case-insensitive search over name and last message.
    pub fn filter(&self, query: &str) -> Vec<&ChatSummary> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.chats.iter().collect();
        }
        self.chats
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query)
                    || c.last_message.to_lowercase().contains(&query)
            })
            .collect()
    }
}
