//! Type-safe row identifiers.
//!
//! Each table gets its own newtype so an `OrderId` can't be passed where a `VenueId` is expected.
//! Ids are issued by the table's counter, hence `From<u32>`.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// A signed-in employee. Users live in the auth backend, not in a table here.
    UserId,
    "user"
);
define_id!(
    /// A cafeteria location.
    VenueId,
    "venue"
);
define_id!(OrderId, "order");
define_id!(OrderLineId, "line");
define_id!(MenuItemId, "item");
define_id!(RatingId, "rating");
define_id!(SuggestionId, "suggestion");
