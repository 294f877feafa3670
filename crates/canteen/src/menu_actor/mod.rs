//! # Menu Table
//!
//! Items each venue offers. Staff flip `available` during the day; unavailable items stay listed
//! but cannot be added to the cart.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::MenuItem;
use canteen_actor::{ResourceActor, ResourceClient};

/// Creates the `menu_items` table actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<MenuItem>, ResourceClient<MenuItem>) {
    ResourceActor::new(buffer_size)
}
