//! # Venue Table
//!
//! Cafeterias and their opening configuration. Staff toggle `open` and edit `weekly_hours`; the
//! session reads both to decide whether ordering is possible right now.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Venue;
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates the `venues` table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Venue>, ResourceClient<Venue>) {
    ResourceActor::new(buffer_size)
}
