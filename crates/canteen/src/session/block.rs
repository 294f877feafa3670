//! Whether the user may place an order right now.

use crate::model::OrderId;
use crate::session::orders::OrderBook;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt::Display;

/// Derived from the order book on every change, never stored server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockState {
    #[default]
    Unblocked,
    /// A recent order blocks ordering until `until`.
    TimeLocked { until: DateTime<Utc> },
    /// A delivered order has to be rated first. Never expires.
    RatingLocked { order_id: OrderId },
}

impl BlockState {
    pub fn is_blocked(&self) -> bool {
        !matches!(self, BlockState::Unblocked)
    }
}

impl Display for BlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockState::Unblocked => write!(f, "unblocked"),
            BlockState::TimeLocked { until } => write!(f, "time-locked until {until}"),
            BlockState::RatingLocked { order_id } => write!(f, "rating-locked on {order_id}"),
        }
    }
}

/// Rating lock first, then time lock, else unblocked.
///
/// The rating lock falls on the most recent unrated delivered order. The time lock runs for
/// `window` from the creation of the newest order of either list.
pub fn evaluate(book: &OrderBook, now: DateTime<Utc>, window: TimeDelta) -> BlockState {
    if let Some(unrated) = book.history().iter().find(|o| o.awaits_rating()) {
        return BlockState::RatingLocked {
            order_id: unrated.id,
        };
    }
    let Some(latest) = book.iter().map(|o| o.created_at).max() else {
        return BlockState::Unblocked;
    };
    let until = latest + window;
    if now < until {
        BlockState::TimeLocked { until }
    } else {
        BlockState::Unblocked
    }
}
