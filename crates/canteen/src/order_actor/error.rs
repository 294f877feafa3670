//! Error types for the order tables.

use crate::model::{OrderId, OrderStatus};
use canteen_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A delivered order was moved back to an earlier status.
    #[error("Invalid status change for {id}: {from} -> {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Only delivered orders can be rated.
    #[error("Order {0} has not been delivered")]
    NotDelivered(OrderId),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The header was written but its lines were not. The header stays in the table.
    #[error("Order {order_id} was created without its items: {reason}")]
    Headless { order_id: OrderId, reason: String },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
