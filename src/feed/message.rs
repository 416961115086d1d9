//! The chat message domain type.

use chrono::{DateTime, Local, Utc};

use crate::api::MessageRecord;
use crate::auth::Principal;

/// Maximum message length in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Delivery state of a message.
///
/// Rows fetched from the API are `Fetched`; optimistic local rows move
/// `Pending` -> `Sent`/`Failed` as the persist call settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// Served by the API.
    Fetched,
    /// Optimistic row, persist call in flight.
    Pending,
    /// Optimistic row, persist call succeeded.
    Sent,
    /// Optimistic row, persist call failed; retryable.
    Failed,
}

/// One chat entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Server-assigned id for fetched rows; client-generated
    /// epoch-millisecond string for optimistic rows.
    pub id: String,
    /// Message body.
    pub text: String,
    /// Author identifier.
    pub username: String,
    /// When the message was written.
    pub timestamp: DateTime<Utc>,
    /// Whether the author is the current principal. Derived, recomputed on
    /// every fetch and principal change.
    pub is_own: bool,
    /// Delivery state.
    pub delivery: Delivery,
}

impl Message {
    /// Build a message from an API record, deriving ownership from the
    /// given principal.
    #[must_use]
    pub fn from_record(record: MessageRecord, principal: &Principal) -> Self {
        let is_own = record.username == principal.username;
        Self {
            id: record.message_id,
            text: record.text,
            username: record.username,
            timestamp: record.timestamp,
            is_own,
            delivery: Delivery::Fetched,
        }
    }

    /// Build an optimistic local message for the given principal.
    ///
    /// The id is the current epoch millisecond count, matching what the API
    /// never hands out; it is not reconciled against the server-assigned id
    /// of the persisted row.
    #[must_use]
    pub fn local(text: String, principal: &Principal) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            text,
            username: principal.username.clone(),
            timestamp: now,
            is_own: true,
            delivery: Delivery::Pending,
        }
    }

    /// Uppercased first character of the author name, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    /// Timestamp rendered in the viewer's local time, e.g. "3:05 PM".
    #[must_use]
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%-I:%M %p")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(name: &str) -> Principal {
        Principal {
            username: name.to_string(),
            email: None,
        }
    }

    #[test]
    fn test_ownership_derived_from_principal() {
        let record = MessageRecord {
            message_id: "5".to_string(),
            text: "hi".to_string(),
            username: "bob".to_string(),
            timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
        };

        let message = Message::from_record(record.clone(), &principal("bob"));
        assert!(message.is_own);
        assert_eq!(message.id, "5");
        assert_eq!(message.delivery, Delivery::Fetched);

        let message = Message::from_record(record, &principal("alice"));
        assert!(!message.is_own);
    }

    #[test]
    fn test_local_message_is_own_and_pending() {
        let message = Message::local("hello".to_string(), &principal("alice"));

        assert!(message.is_own);
        assert_eq!(message.username, "alice");
        assert_eq!(message.delivery, Delivery::Pending);
        assert_eq!(message.id, message.timestamp.timestamp_millis().to_string());
    }

    #[test]
    fn test_avatar_initial() {
        let mut message = Message::local("x".to_string(), &principal("bob"));
        assert_eq!(message.initial(), "B");

        message.username = String::new();
        assert_eq!(message.initial(), "");
    }
}
