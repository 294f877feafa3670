use crate::model::OrderId;
use canteen_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during rating operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RatingError {
    /// A rating for this order is already stored.
    #[error("Order {0} has already been rated")]
    AlreadyRated(OrderId),

    #[error("Stars must be between {min} and {max}, got {got}")]
    InvalidStars { got: u8, min: u8, max: u8 },

    #[error("Rating not found: {0}")]
    NotFound(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl RatingError {
    /// Maps a framework error for the rating of `order_id`.
    ///
    /// The table's only uniqueness constraint is one rating per order, so a conflict always
    /// means that order was rated before.
    pub fn for_order(order_id: OrderId, e: FrameworkError) -> Self {
        if e.is_conflict() {
            return RatingError::AlreadyRated(order_id);
        }
        Self::from(e)
    }
}

impl From<FrameworkError> for RatingError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity::<RatingError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => RatingError::NotFound(id),
            Err(other) => RatingError::ActorCommunicationError(other.to_string()),
        }
    }
}
