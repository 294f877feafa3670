//! # Table Clients
//!
//! Typed wrappers over each table's [`ResourceClient`](canteen_actor::ResourceClient). They map
//! framework errors into the table's error enum and add the multi-step operations the session
//! needs, such as writing an order header followed by its lines.

pub mod menu_client;
pub mod order_client;
pub mod rating_client;
pub mod suggestion_client;
pub mod venue_client;

pub use menu_client::MenuClient;
pub use order_client::OrderClient;
pub use rating_client::RatingClient;
pub use suggestion_client::SuggestionClient;
pub use venue_client::VenueClient;
