use canteen_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during venue operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VenueError {
    #[error("Venue not found: {0}")]
    NotFound(String),

    #[error("Venue validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for VenueError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity::<VenueError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => VenueError::NotFound(id),
            Err(other) => VenueError::ActorCommunicationError(other.to_string()),
        }
    }
}
