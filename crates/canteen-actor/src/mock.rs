//! # Mock Tables & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue of
//! scripted expectations instead of a running actor. It also owns the change feed, so tests can
//! push feed events with [`MockClient::emit`] exactly when they want them.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, responses are scripted | Real rows |
//! | **Error injection** | `return_err` | Needs a specific state |
//! | **Feed** | `emit` on demand | Published on each mutation |
//! | **Use case** | Logic *around* the client | The table itself or the whole system |
//!
//! ## Example
//!
//! ```rust
//! use canteen_actor::mock::MockClient;
//! use canteen_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Row { id: u32 }
//! #[derive(Debug)] struct RowCreate;
//! #[derive(Debug)] struct RowUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
//!
//! #[async_trait]
//! impl ActorEntity for Row {
//!     type Id = u32; type Create = RowCreate; type Update = RowUpdate;
//!     type Filter = (); type Context = (); type Error = RowError;
//!     fn from_create_params(id: u32, _: RowCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: RowUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Row>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::actor::FEED_CAPACITY;
use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ChangeEvent, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request of a given kind.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::List(_) => "list",
            Expectation::Create(_) => "create",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock table with expectation tracking.
///
/// Expectations are answered in the order they were registered. A request that does not match
/// the next expectation panics the background task, which surfaces in the test as
/// `FrameworkError::ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    events: broadcast::Sender<ChangeEvent<T>>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn reply<R>(respond_to: oneshot::Sender<Result<R, FrameworkError>>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (events, _) = broadcast::channel(FEED_CAPACITY);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        reply(respond_to, r)
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        reply(respond_to, r)
                    }
                    (request, next) => panic!(
                        "Unexpected {} request, next expectation: {}",
                        request.kind(),
                        next.as_ref().map_or("none", Expectation::kind)
                    ),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, events.clone()),
            events,
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Publish a change event to every subscriber of this mock's feed.
    pub fn emit(&self, event: ChangeEvent<T>) {
        let _ = self.events.send(event);
    }

    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .push_back((self.wrap)(response));
    }

    /// Answer the request successfully.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the request with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
    }

    #[derive(Debug)]
    struct DishUpdate;

    #[derive(Debug, thiserror::Error)]
    #[error("Dish error")]
    struct DishError;

    #[async_trait]
    impl ActorEntity for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = DishUpdate;
        type Filter = ();
        type Context = ();
        type Error = DishError;

        fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        fn matches(&self, _filter: &()) -> bool {
            true
        }

        async fn on_update(&mut self, _update: DishUpdate, _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn dish(id: u32, name: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_scripted_answers_in_order() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create().return_ok(1);
        mock.expect_list().return_ok(vec![dish(1, "Latte")]);
        mock.expect_get(2).return_ok(None);

        let client = mock.client();
        let id = client
            .create(DishCreate {
                name: "Latte".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.list(()).await.unwrap(), vec![dish(1, "Latte")]);
        assert!(client.get(2).await.unwrap().is_none());

        mock.verify();
    }

    #[tokio::test]
    async fn test_conflict_is_reported() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("Latte".to_string()));

        let err = mock
            .client()
            .create(DishCreate {
                name: "Latte".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_emit_reaches_subscribers() {
        let mock = MockClient::<Dish>::new();
        let mut feed = mock.client().subscribe();

        mock.emit(ChangeEvent::Insert(dish(3, "Mocha")));

        let event = feed.recv().await.unwrap();
        assert_eq!(event, ChangeEvent::Insert(dish(3, "Mocha")));
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_response() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_list().return_ok(vec![]);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
