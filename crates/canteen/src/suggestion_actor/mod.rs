//! # Suggestion Table
//!
//! Free-text feedback a user sends to the venue's staff. Write-only from the session's side.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Suggestion;
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates the `suggestions` table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Suggestion>, ResourceClient<Suggestion>) {
    ResourceActor::new(buffer_size)
}
