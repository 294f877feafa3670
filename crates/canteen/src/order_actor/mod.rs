//! # Order Tables
//!
//! The `orders` table (headers) and the `order_lines` table (items). Lines reference their header
//! and are written second, so the two tables are wired together at start-up: the line table gets
//! a client of the order table as its context and checks the header exists on insert.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](canteen_actor::ActorEntity) implementations for
//!   [`Order`](crate::model::Order) and [`OrderLine`](crate::model::OrderLine)
//! - [`error`] - [`OrderError`]
//! - [`new()`] / [`new_lines()`] - factory functions
//!
//! ## Usage
//!
//! ```rust
//! use canteen::order_actor;
//! use canteen::clients::OrderClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (orders, order_table) = order_actor::new(32);
//!     let (lines, line_table) = order_actor::new_lines(32);
//!     tokio::spawn(orders.run(()));
//!     tokio::spawn(lines.run(order_table.clone()));
//!     let _client = OrderClient::new(order_table, line_table);
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Order, OrderLine};
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates the `orders` table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}

/// Creates the `order_lines` table actor and its client. Run it with the `orders` client.
pub fn new_lines(buffer_size: usize) -> (ResourceActor<OrderLine>, ResourceClient<OrderLine>) {
    ResourceActor::new(buffer_size)
}
