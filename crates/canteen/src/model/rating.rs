//! The `ratings` table: at most one rating per order.

use crate::model::{OrderId, RatingId, UserId, VenueId};
use serde::{Deserialize, Serialize};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: RatingId,
    pub user_id: UserId,
    pub order_id: OrderId,
    pub venue_id: VenueId,
    pub stars: u8,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct RatingCreate {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub venue_id: VenueId,
    pub stars: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Default)]
pub struct RatingFilter {
    pub order_id: Option<OrderId>,
    pub user_id: Option<UserId>,
}
