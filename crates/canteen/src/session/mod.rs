//! # Order Session
//!
//! Client-side state of the ordering screen:
//!
//! - [`orders`] - the user's orders split into active and history
//! - [`block`] - rating lock, time lock or unblocked
//! - [`countdown`] - the message shown while blocked
//! - [`cart`] - the single-item order draft
//! - [`ledger`] - ready alerts already shown
//! - [`hours`] - the operating-hours gate
//! - [`birthday`] - the once-a-day greeting
//! - [`controller`] - [`OrderSession`], which ties them together
//! - [`runner`] - [`SessionRunner`], which drives a session from commands, the feed and timers

pub mod birthday;
pub mod block;
pub mod cart;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod hours;
pub mod ledger;
pub mod orders;
pub mod runner;

pub use block::BlockState;
pub use cart::{Cart, CartError, CartLine};
pub use controller::OrderSession;
pub use error::{RateError, SubmitError};
pub use hours::HoursError;
pub use ledger::NotificationLedger;
pub use orders::OrderBook;
pub use runner::{SessionError, SessionHandle, SessionRunner, SessionView};
