//! The `suggestions` table: free-text feedback sent to a venue.

use crate::model::{SuggestionId, UserId, VenueId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: SuggestionId,
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SuggestionCreate {
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionFilter {
    pub venue_id: Option<VenueId>,
}
