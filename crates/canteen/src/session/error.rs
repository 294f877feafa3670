use crate::model::OrderId;
use crate::order_actor::OrderError;
use crate::rating_actor::RatingError;
use crate::session::block::BlockState;
use thiserror::Error;

/// Why an order could not be submitted. The cart is kept in every case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Ordering is blocked: {0}")]
    Blocked(BlockState),
    #[error("No venue selected")]
    NoVenue,
    #[error("The venue is not taking orders right now")]
    Closed,
    #[error("The cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("Order {0} is not in this venue's history")]
    UnknownOrder(OrderId),
    #[error("Order {0} has not been delivered")]
    NotDelivered(OrderId),
    #[error("Order {0} has already been rated")]
    AlreadyRated(OrderId),
    #[error(transparent)]
    Rating(RatingError),
}
