//! Wire types for the message API.
//!
//! These mirror the API's JSON field names exactly; the rest of the crate
//! works with the domain types in [`crate::feed`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted message as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Server-assigned unique identifier.
    #[serde(rename = "messageId")]
    pub message_id: String,
    /// Message body.
    pub text: String,
    /// Author identifier.
    pub username: String,
    /// Server-supplied ISO-8601 timestamp.
    #[serde(rename = "timestamp_utc_iso8601")]
    pub timestamp: DateTime<Utc>,
}

/// One page of messages.
///
/// Pages walk backward through history: the first page holds the newest
/// messages and `next_key` marks the boundary of the next-older page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    /// Messages in this page, newest first.
    #[serde(default)]
    pub items: Vec<MessageRecord>,
    /// Opaque cursor for the next-older page, absent when history is
    /// exhausted.
    #[serde(rename = "nextKey")]
    pub next_key: Option<String>,
}

/// Request body for posting a new message.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageRequest {
    /// Author identifier.
    pub username: String,
    /// Message body.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_api_fields() {
        let json = r#"{
            "items": [{
                "messageId": "5",
                "text": "hi",
                "username": "bob",
                "timestamp_utc_iso8601": "2024-01-01T00:00:00Z"
            }],
            "nextKey": "cursor2"
        }"#;

        let page: MessagePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].message_id, "5");
        assert_eq!(page.items[0].text, "hi");
        assert_eq!(page.items[0].username, "bob");
        assert_eq!(page.items[0].timestamp.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(page.next_key.as_deref(), Some("cursor2"));
    }

    #[test]
    fn test_null_next_key_ends_history() {
        let json = r#"{"items": [], "nextKey": null}"#;

        let page: MessagePage = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_key.is_none());
    }

    #[test]
    fn test_missing_items_defaults_to_empty() {
        let json = r#"{"nextKey": "abc"}"#;

        let page: MessagePage = serde_json::from_str(json).unwrap();
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_post_request_serializes_expected_body() {
        let request = PostMessageRequest {
            username: "alice".to_string(),
            text: "hello".to_string(),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "text": "hello"}));
    }
}
