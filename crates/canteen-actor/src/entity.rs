//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every table row (orders, order lines, venues, menu
//! items, ratings, suggestions) implements to be held by a generic [`ResourceActor`](crate::ResourceActor).
//! It names the DTOs used to create and update a row, the filter used to list rows, an optional
//! uniqueness key, and the lifecycle hooks the actor calls around each mutation.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_key`]
//!
//! The defaults do nothing (`Ok(())` / `None`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any row type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may call other actors. The `Context` type is injected into
/// every hook when the actor starts (`run(context)`), not when it is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Row identifier. Built from the actor's `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Insert payload.
    type Create: Send + Sync + Debug;

    /// Update payload.
    type Update: Send + Sync + Debug;

    /// Selection criteria for `List` requests (the `WHERE` clause of the table).
    type Filter: Send + Sync + Debug;

    /// Runtime dependencies injected into the hooks. `()` when there are none.
    type Context: Send + Sync;

    /// Per-table error type.
    ///
    /// One enum per table rather than one per message: a client deals with a single
    /// `OrderError`, at the cost of some variants being unreachable from some operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the row from its id and insert payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this row is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Value that must be unique across the table, if the table has such a constraint.
    ///
    /// An insert whose key is already held by another row fails with
    /// [`FrameworkError::Conflict`](crate::FrameworkError::Conflict).
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the row is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the row is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
