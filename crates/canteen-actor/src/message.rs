//! # Generic Messages
//!
//! Request messages sent from a `ResourceClient` to its `ResourceActor`, and the change events the
//! actor publishes after each successful mutation.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the row operations of a table: insert (`Create`), point read (`Get`),
/// filtered read (`List`), `Update` and `Delete`.
/// All payload types come from the entity's associated types, so an order insert can't be sent
/// to the venue table.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::List { .. } => "list",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
        }
    }
}

/// A row change published on the table's live feed.
///
/// `Update` carries the row as it was before the change so subscribers can detect transitions
/// without keeping their own copy.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent<T> {
    Insert(T),
    Update { old: T, new: T },
    Delete(T),
}

impl<T> ChangeEvent<T> {
    /// The row as it is after the change (the removed row for `Delete`).
    pub fn record(&self) -> &T {
        match self {
            ChangeEvent::Insert(new) => new,
            ChangeEvent::Update { new, .. } => new,
            ChangeEvent::Delete(old) => old,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::Insert(_) => "insert",
            ChangeEvent::Update { .. } => "update",
            ChangeEvent::Delete(_) => "delete",
        }
    }
}
