//! # System Lifecycle
//!
//! Starts the table actors, wires them together and shuts them down.
//!
//! ## Wiring
//!
//! Actors are created without their dependencies and receive them when they start running:
//!
//! ```rust,ignore
//! let (orders, order_table) = order_actor::new(buffer);
//! let (lines, line_table) = order_actor::new_lines(buffer);
//! tokio::spawn(orders.run(()));
//! tokio::spawn(lines.run(order_table.clone())); // lines check their header exists
//! ```
//!
//! The only dependency is `order_lines -> orders`, so the graph is acyclic and dropping every
//! client is enough to stop everything: the line table stops first, which drops its orders client,
//! which lets the orders table stop.
//!
//! ## Sessions
//!
//! [`CanteenSystem::start_session`] spawns one [`SessionRunner`](crate::session::SessionRunner) per
//! signed-in user. A session holds clients of the tables, so all session handles must be dropped
//! (and the session tasks finished) before [`CanteenSystem::shutdown`] can complete.

pub mod canteen_system;

pub use canteen_system::*;
