use crate::model::{Suggestion, SuggestionCreate, SuggestionFilter, SuggestionId};
use crate::suggestion_actor::SuggestionError;
use async_trait::async_trait;
use canteen_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Suggestion {
    type Id = SuggestionId;
    type Create = SuggestionCreate;
    type Update = ();
    type Filter = SuggestionFilter;
    type Context = ();
    type Error = SuggestionError;

    fn from_create_params(id: SuggestionId, params: SuggestionCreate) -> Result<Self, Self::Error> {
        let message = params.message.trim();
        if message.is_empty() {
            return Err(SuggestionError::Empty);
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            venue_id: params.venue_id,
            message: message.to_string(),
        })
    }

    fn matches(&self, filter: &SuggestionFilter) -> bool {
        filter.venue_id.is_none_or(|venue| venue == self.venue_id)
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
