//! # Generic Actor Server
//!
//! `ResourceActor` owns one table: the row store, the request receiver, and the sender half of the
//! table's change feed. It processes requests sequentially, so the store needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ChangeEvent, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of each table's change feed. Slow subscribers past this see `Lagged`.
pub const FEED_CAPACITY: usize = 256;

/// The generic actor that manages one table of rows.
///
/// Each actor runs in its own Tokio task and handles one request at a time, which gives the store
/// exclusive ownership without `Mutex` or `RwLock`.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop.
///
/// ```rust
/// use canteen_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Row { id: u32 }
/// #[derive(Debug)] struct RowCreate;
/// #[derive(Debug)] struct RowUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
///
/// #[async_trait]
/// impl ActorEntity for Row {
///     type Id = u32; type Create = RowCreate; type Update = RowUpdate;
///     type Filter = (); type Context = (); type Error = RowError;
///     fn from_create_params(id: u32, _: RowCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: RowUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Row>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(RowCreate).await.unwrap();
///     assert_eq!(client.list(()).await.unwrap().len(), 1);
///     assert!(client.get(id).await.unwrap().is_some());
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: next id from the counter, `from_create_params`, uniqueness check, `on_create`,
///   insert, publish `Insert`.
/// * **Get**: clone of the row or `None`.
/// * **List**: clones of every row whose `matches(filter)` holds.
/// * **Update**: `on_update` on the stored row, publish `Update { old, new }`.
/// * **Delete**: `on_delete`, remove, publish `Delete`.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    events: broadcast::Sender<ChangeEvent<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(FEED_CAPACITY);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            events: events.clone(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender, events);
        (actor, client)
    }

    fn publish(&self, event: ChangeEvent<T>) {
        // No subscribers is not an error: the feed is fire-and-forget.
        let _ = self.events.send(event);
    }

    fn violates_unique(&self, item: &T) -> Option<String> {
        let key = item.unique_key()?;
        self.store
            .values()
            .any(|row| row.unique_key().as_deref() == Some(key.as_str()))
            .then_some(key)
    }

    /// Runs the actor's event loop until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(key) = self.violates_unique(&item) {
                        warn!(entity_type, %key, "Unique constraint violated");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.next_id += 1;
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    self.publish(ChangeEvent::Insert(item));
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let rows: Vec<T> = self
                        .store
                        .values()
                        .filter(|row| row.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = rows.len(), "List");
                    let _ = respond_to.send(Ok(rows));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let old = item.clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        // Hooks may have partially mutated the row before failing.
                        *item = old;
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let new = item.clone();
                    info!(entity_type, %id, "Updated");
                    self.publish(ChangeEvent::Update {
                        old,
                        new: new.clone(),
                    });
                    let _ = respond_to.send(Ok(new));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(removed) = self.store.remove(&id) {
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        self.publish(ChangeEvent::Delete(removed));
                    }
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
