//! Row types and their DTOs, one file per table.

pub mod ids;
pub mod menu;
pub mod order;
pub mod order_line;
pub mod rating;
pub mod suggestion;
pub mod venue;

pub use ids::*;
pub use menu::*;
pub use order::*;
pub use order_line::*;
pub use rating::*;
pub use suggestion::*;
pub use venue::*;
