//! # Suggestion Client
use crate::model::{Suggestion, SuggestionCreate, SuggestionId, UserId, VenueId};
use crate::suggestion_actor::SuggestionError;
use async_trait::async_trait;
use canteen_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct SuggestionClient {
    inner: ResourceClient<Suggestion>,
}

impl SuggestionClient {
    pub fn new(inner: ResourceClient<Suggestion>) -> Self {
        Self { inner }
    }

    /// Sends a trimmed message to the venue. Blank messages are rejected.
    #[instrument(skip(self, message))]
    pub async fn submit(
        &self,
        user_id: UserId,
        venue_id: VenueId,
        message: &str,
    ) -> Result<SuggestionId, SuggestionError> {
        if message.trim().is_empty() {
            return Err(SuggestionError::Empty);
        }
        let params = SuggestionCreate {
            user_id,
            venue_id,
            message: message.to_string(),
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Suggestion> for SuggestionClient {
    type Error = SuggestionError;

    fn inner(&self) -> &ResourceClient<Suggestion> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SuggestionError::from(e)
    }
}
