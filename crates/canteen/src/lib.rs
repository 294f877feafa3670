//! # Canteen
//!
//! Client-side core of a workplace cafeteria ordering app, running against an in-process stand-in
//! for the hosted backend.
//!
//! - [`model`]: rows of the `orders`, `order_lines`, `venues`, `menu_items`, `ratings` and
//!   `suggestions` tables.
//! - `*_actor`: one [`ResourceActor`](canteen_actor::ResourceActor) per table, with the table's
//!   validation and constraints.
//! - [`clients`]: typed access to the tables.
//! - [`session`]: the ordering session (order book, block state, countdown, cart, ready alerts,
//!   opening hours) and the task that drives it.
//! - [`alerts`]: banners, sounds, system notifications and push payloads.
//! - [`lifecycle`]: starting and stopping the whole system.
//! - [`config`]: `CANTEEN_*` environment settings.

pub mod alerts;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod rating_actor;
pub mod session;
pub mod suggestion_actor;
pub mod venue_actor;
