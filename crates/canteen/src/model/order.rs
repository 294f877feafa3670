//! The `orders` table: one row per submitted order.
//!
//! The row held by the table is the order header. Its `items` are stored in the `order_lines`
//! table and joined in by [`OrderClient::list_for`](crate::clients::OrderClient::list_for); rows
//! arriving on the change feed therefore carry no items.

use crate::model::{OrderId, UserId, VenueId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Fulfillment status. Driven by the kitchen; the client only observes it.
///
/// `Received → Preparing → Ready → Delivered`, with `Delivered` terminal. Steps may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// Not yet delivered.
    pub fn is_active(self) -> bool {
        !matches!(self, OrderStatus::Delivered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string from the backend is not one of the four known values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "received" => Ok(OrderStatus::Received),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One line of an order as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
}

/// An order header, optionally with its joined line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub rated: bool,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Order {
    /// A freshly submitted order: `Received`, unrated, no items yet.
    pub fn new(id: OrderId, user_id: UserId, venue_id: VenueId, placed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            venue_id,
            status: OrderStatus::Received,
            created_at: placed_at,
            updated_at: placed_at,
            rated: false,
            items: Vec::new(),
        }
    }

    /// Whether this order belongs to the given (user, venue) scope.
    pub fn in_scope(&self, user_id: UserId, venue_id: VenueId) -> bool {
        self.user_id == user_id && self.venue_id == venue_id
    }

    /// Delivered and not yet rated: blocks further ordering.
    pub fn awaits_rating(&self) -> bool {
        self.status == OrderStatus::Delivered && !self.rated
    }
}

/// Payload for inserting an order header.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub placed_at: DateTime<Utc>,
}

/// Payload for updating an order header. `at` becomes the new `updated_at`.
#[derive(Debug, Clone)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub rated: Option<bool>,
    pub at: DateTime<Utc>,
}

impl OrderUpdate {
    pub fn status(status: OrderStatus, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            rated: None,
            at,
        }
    }

    pub fn rated(at: DateTime<Utc>) -> Self {
        Self {
            status: None,
            rated: Some(true),
            at,
        }
    }
}

/// Selects order headers. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub user_id: Option<UserId>,
    pub venue_id: Option<VenueId>,
}

impl OrderFilter {
    pub fn scope(user_id: UserId, venue_id: VenueId) -> Self {
        Self {
            user_id: Some(user_id),
            venue_id: Some(venue_id),
        }
    }
}

/// A submission as sent by the session: who, where, when, and the single cart line.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub user_id: UserId,
    pub venue_id: VenueId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<PlaceOrderLine>,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderLine {
    pub menu_item_id: crate::model::MenuItemId,
    pub item_name: String,
    pub quantity: u32,
}
