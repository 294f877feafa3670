//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the per-table errors each
//! entity defines.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// An insert collided with the table's uniqueness constraint.
    #[error("Unique constraint violated: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the failure is a uniqueness violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, FrameworkError::Conflict(_))
    }

    /// Recover the entity's own error type from an `EntityError`.
    ///
    /// Returns `self` unchanged when this is not an entity error of type `E`.
    pub fn into_entity<E: std::error::Error + 'static>(self) -> Result<E, Self> {
        match self {
            FrameworkError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::EntityError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("sold out")]
    struct SoldOut;

    #[test]
    fn test_into_entity_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(SoldOut));
        assert_eq!(err.into_entity::<SoldOut>().unwrap(), SoldOut);
    }

    #[test]
    fn test_into_entity_keeps_other_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            err.into_entity::<SoldOut>(),
            Err(FrameworkError::EntityError(_))
        ));
        assert!(matches!(
            FrameworkError::ActorClosed.into_entity::<SoldOut>(),
            Err(FrameworkError::ActorClosed)
        ));
    }
}
