//! # Canteen Actor
//!
//! The table layer of the canteen workspace. Every backend table (orders, order lines, venues,
//! menu items, ratings, suggestions) is a [`ResourceActor`] that owns its rows in a Tokio task and
//! is reached through a cloneable [`ResourceClient`].
//!
//! ## What a table offers
//!
//! - **Row operations**: insert, point read, filtered list, update and delete.
//! - **Live change feed**: every successful mutation is published as a [`ChangeEvent`] on a
//!   broadcast channel; [`ResourceClient::subscribe`] returns a receiver.
//! - **Uniqueness constraint**: an entity may name a [`unique_key`](ActorEntity::unique_key); a
//!   second insert with the same key fails with [`FrameworkError::Conflict`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the row type, its DTOs, its filter, and its hooks.
//! 2. **Runtime** ([`ResourceActor`]): sequential request processing and feed publishing.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): type-safe async calls.
//!
//! ## Concurrency Model
//!
//! - Each table runs in its own Tokio task.
//! - Requests to one table are processed **sequentially**, so row state needs no locks.
//! - Tables run in parallel with each other and with their subscribers.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations and can emit feed events on
//! demand. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ChangeEvent, ResourceRequest, Response};
