use canteen_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur while sending a suggestion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SuggestionError {
    #[error("Suggestion is empty")]
    Empty,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for SuggestionError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity::<SuggestionError>() {
            Ok(err) => err,
            Err(other) => SuggestionError::ActorCommunicationError(other.to_string()),
        }
    }
}
