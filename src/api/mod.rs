//! Message API client and wire types.
//!
//! The API persists and serves messages and hands out opaque pagination
//! cursors; this module is the only place that knows its field names.

mod client;
mod types;

pub use client::MessageApi;
pub use types::{MessagePage, MessageRecord, PostMessageRequest};
