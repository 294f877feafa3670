//! # ActorClient Trait
//!
//! Common interface for table-specific clients: default `get`, `list` and `delete` on top of a
//! generic `ResourceClient`, with framework errors mapped into the table's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for table-specific clients to inherit the standard row reads.
///
/// # Example
///
/// ```rust
/// use canteen_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Venue { id: u32 }
/// #[derive(Debug)] struct VenueCreate;
/// #[derive(Debug)] struct VenueUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct VenueError(String);
///
/// #[async_trait]
/// impl ActorEntity for Venue {
///     type Id = u32; type Create = VenueCreate; type Update = VenueUpdate;
///     type Filter = (); type Context = (); type Error = VenueError;
///     fn from_create_params(id: u32, _: VenueCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: VenueUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct VenueClient { inner: ResourceClient<Venue> }
///
/// #[async_trait]
/// impl ActorClient<Venue> for VenueClient {
///     type Error = VenueError;
///     fn inner(&self) -> &ResourceClient<Venue> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { VenueError(e.to_string()) }
/// }
///
/// async fn usage(client: VenueClient) {
///     let _ = client.get(1).await;
///     let _ = client.list(()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the table's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row selected by `filter`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Delete a row by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
