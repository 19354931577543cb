//! Swipe feed: a queue of candidates consumed by like and dislike.

use crate::in_flight::InFlight;
use crate::presenter::Presenter;
use spotilove_core::api::{SpotiLoveApi, SwipeDecision};
use spotilove_core::error::{Result, SpotiLoveError};
use spotilove_core::navigation::Notice;
use spotilove_core::profile::SwipeCandidate;
use spotilove_core::session::Session;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Default)]
struct FeedState {
    queue: VecDeque<SwipeCandidate>,
    /// Users already liked or disliked in this feed.
    decided: HashSet<Uuid>,
}

pub struct SwipeFeed {
    api: Arc<dyn SpotiLoveApi>,
    presenter: Arc<dyn Presenter>,
    user_id: Uuid,
    batch_size: u32,
    state: Mutex<FeedState>,
    in_flight: InFlight,
}

impl SwipeFeed {
    pub fn new(
        api: Arc<dyn SpotiLoveApi>,
        presenter: Arc<dyn Presenter>,
        session: &Session,
        batch_size: u32,
    ) -> Self {
        Self {
            api,
            presenter,
            user_id: session.user_id,
            batch_size,
            state: Mutex::new(FeedState::default()),
            in_flight: InFlight::new("Swipe"),
        }
    }

    /// The candidate currently shown, if any.
    pub async fn current(&self) -> Option<SwipeCandidate> {
        self.state.lock().await.queue.front().cloned()
    }

    pub async fn remaining(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    /// Fetches a batch and appends the users not yet seen. Returns how many
    /// were added.
    pub async fn refill(&self) -> Result<usize> {
        let batch = match self.api.fetch_candidates(self.user_id, self.batch_size).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!("Candidate fetch failed: {}", e);
                self.presenter
                    .notify(Notice::error("Error", "Failed to load users"));
                return Err(SpotiLoveError::from(e));
            }
        };

        let mut state = self.state.lock().await;
        let before = state.queue.len();
        for candidate in batch {
            let id = candidate.user_id;
            if id == self.user_id
                || state.decided.contains(&id)
                || state.queue.iter().any(|c| c.user_id == id)
            {
                continue;
            }
            state.queue.push_back(candidate);
        }
        let added = state.queue.len() - before;
        debug!("Feed refilled with {} candidates", added);
        Ok(added)
    }

    pub async fn like(&self) -> Result<Option<SwipeCandidate>> {
        self.decide(true).await
    }

    pub async fn dislike(&self) -> Result<Option<SwipeCandidate>> {
        self.decide(false).await
    }

    /// Records a decision on the head and returns the next candidate.
    ///
    /// On failure the head stays in place.
    async fn decide(&self, is_like: bool) -> Result<Option<SwipeCandidate>> {
        let _guard = self.in_flight.begin()?;

        let Some(head) = self.current().await else {
            return Ok(None);
        };
        let decision = SwipeDecision {
            from_user_id: self.user_id,
            to_user_id: head.user_id,
            is_like,
        };

        if let Err(e) = self.api.swipe(&decision).await {
            warn!("Swipe on {} failed: {}", head.user_id, e);
            let message = if is_like {
                "Failed to like user"
            } else {
                "Failed to dislike user"
            };
            self.presenter.notify(Notice::error("Error", message));
            return Err(SpotiLoveError::from(e));
        }
        info!(
            "{} {}",
            if is_like { "Liked" } else { "Passed on" },
            head.user_id
        );

        let exhausted = {
            let mut state = self.state.lock().await;
            state.decided.insert(head.user_id);
            if state.queue.front().is_some_and(|c| c.user_id == head.user_id) {
                state.queue.pop_front();
            }
            state.queue.is_empty()
        };

        if exhausted {
            // The error is already reported; the feed just shows as empty.
            if let Err(e) = self.refill().await {
                debug!("Refill after swipe failed: {}", e);
            }
        }
        Ok(self.current().await)
    }
}
