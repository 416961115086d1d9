//! The message feed: state machine, store, and pagination trigger.
//!
//! [`store::FeedState`] holds the pure transitions (host-testable, no DOM);
//! [`store::FeedStore`] wraps it in a signal and owns the network calls;
//! [`pagination`] turns sentinel visibility into backward page loads.

pub mod message;
pub mod pagination;
pub mod store;

pub use message::{Delivery, Message, MAX_TEXT_LEN};
pub use store::{FeedState, FeedStore, PAGE_LIMIT};
